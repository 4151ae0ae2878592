use crate::Error;
use fancy_regex::Regex;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use std::sync::LazyLock;

static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| unsafe {
    Regex::new(r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/)([^&\n?#]+)")
        .unwrap_unchecked()
});
static ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| unsafe { Regex::new(r"^([a-zA-Z0-9_-]{11})$").unwrap_unchecked() });

const THUMBNAIL_HOST: &str = "https://img.youtube.com/vi";

/// Identifier of a hosted video, as captured from user input.
///
/// Only the raw-ID path guarantees the usual 11 characters; anything captured
/// from a URL is taken as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub(crate) struct VideoId(String);

impl VideoId {
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the identifier only uses the characters YouTube issues.
    pub(crate) fn is_canonical(&self) -> bool {
        matches!(ID_REGEX.is_match(&self.0), Ok(true))
    }
}

impl Display for VideoId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Resolution {
    MaxRes,
    Hq,
    Mq,
    Sd,
    Default,
}

impl Resolution {
    pub(crate) const ALL: [Resolution; 5] = [
        Resolution::MaxRes,
        Resolution::Hq,
        Resolution::Mq,
        Resolution::Sd,
        Resolution::Default,
    ];
    /// Resolutions offered for download. `default` is too small to bother.
    pub(crate) const DOWNLOADABLE: [Resolution; 4] = [
        Resolution::MaxRes,
        Resolution::Hq,
        Resolution::Mq,
        Resolution::Sd,
    ];

    pub(crate) fn tag(self) -> &'static str {
        match self {
            Resolution::MaxRes => "maxres",
            Resolution::Hq => "hq",
            Resolution::Mq => "mq",
            Resolution::Sd => "sd",
            Resolution::Default => "default",
        }
    }

    fn file_name(self) -> &'static str {
        match self {
            Resolution::MaxRes => "maxresdefault",
            Resolution::Hq => "hqdefault",
            Resolution::Mq => "mqdefault",
            Resolution::Sd => "sddefault",
            Resolution::Default => "default",
        }
    }
}

impl Display for Resolution {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for Resolution {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.trim().to_lowercase();
        Resolution::ALL
            .into_iter()
            .find(|resolution| resolution.tag() == text)
            .ok_or(Error::UnknownResolution(text))
    }
}

/// Accepts tags in any case, like the command line does.
impl<'de> Deserialize<'de> for Resolution {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        tag.parse().map_err(de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct ThumbnailUrls {
    pub(crate) maxres: String,
    pub(crate) hq: String,
    pub(crate) mq: String,
    pub(crate) sd: String,
    pub(crate) default: String,
}

impl ThumbnailUrls {
    pub(crate) fn new(id: &VideoId) -> Self {
        let url = |resolution: Resolution| {
            format!("{THUMBNAIL_HOST}/{id}/{}.jpg", resolution.file_name())
        };
        Self {
            maxres: url(Resolution::MaxRes),
            hq: url(Resolution::Hq),
            mq: url(Resolution::Mq),
            sd: url(Resolution::Sd),
            default: url(Resolution::Default),
        }
    }

    pub(crate) fn get(&self, resolution: Resolution) -> &str {
        match resolution {
            Resolution::MaxRes => &self.maxres,
            Resolution::Hq => &self.hq,
            Resolution::Mq => &self.mq,
            Resolution::Sd => &self.sd,
            Resolution::Default => &self.default,
        }
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (Resolution, &str)> {
        Resolution::ALL
            .into_iter()
            .map(move |resolution| (resolution, self.get(resolution)))
    }
}

/// Finds the video identifier in `input`, trying URL shapes before a bare ID.
pub(crate) fn extract_video_id(input: &str) -> Option<VideoId> {
    let input = input.trim();
    for regex in [&*URL_REGEX, &*ID_REGEX] {
        if let Ok(Some(captures)) = regex.captures(input) {
            if let Some(capture) = captures.get(1) {
                if !capture.as_str().is_empty() {
                    return Some(VideoId(capture.as_str().to_string()));
                }
            }
        }
    }
    None
}

/// Like [`extract_video_id`], but tells empty input apart from input that
/// does not look like a video.
pub(crate) fn validate(input: &str) -> Result<VideoId, Error> {
    let input = input.trim();
    if input.is_empty() {
        return Err(Error::EmptyInput);
    }
    extract_video_id(input).ok_or(Error::InvalidUrl)
}

pub(crate) fn watch_url(video: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video.trim())
}
