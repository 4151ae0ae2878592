use super::cdn::Cdn;
use super::probe::{Board, Prober, Request};
use super::utils::filename;
use super::youtube::{self, extract_video_id, Resolution, ThumbnailUrls, VideoId};
use crate::Error;
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

pub(crate) type Probe = JoinHandle<Result<Presentation, Error>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct DownloadLink {
    pub(crate) resolution: Resolution,
    pub(crate) url: String,
    pub(crate) filename: String,
}

/// What the user gets to see once a probe settles on a resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct Presentation {
    #[serde(skip)]
    pub(crate) sequence: u64,
    pub(crate) video_id: VideoId,
    pub(crate) resolution: Resolution,
    pub(crate) url: String,
    pub(crate) urls: ThumbnailUrls,
    pub(crate) downloads: Vec<DownloadLink>,
}

impl Presentation {
    fn new(
        request: &Request,
        resolution: Resolution,
        template: &str,
        timestamp: i64,
    ) -> Result<Self, Error> {
        let downloads = Resolution::DOWNLOADABLE
            .into_iter()
            .map(|resolution| {
                Ok(DownloadLink {
                    resolution,
                    url: request.urls.get(resolution).to_string(),
                    filename: filename(template, &request.video_id, resolution, timestamp)?,
                })
            })
            .collect::<Result<Vec<_>, Error>>()?;
        Ok(Self {
            sequence: request.ticket.sequence(),
            video_id: request.video_id.clone(),
            resolution,
            url: request.urls.get(resolution).to_string(),
            urls: request.urls.clone(),
            downloads,
        })
    }

    pub(crate) fn download(&self, resolution: Resolution) -> Option<&DownloadLink> {
        self.downloads
            .iter()
            .find(|link| link.resolution == resolution)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub(crate) candidates: Vec<Resolution>,
    pub(crate) delay: Duration,
    pub(crate) filename_template: String,
    pub(crate) auto_extract: bool,
}

#[derive(Debug)]
pub(crate) enum Pasted {
    Extracting(Probe),
    Detected(VideoId),
    Ignored,
}

#[derive(Debug, Clone)]
pub(crate) struct Session {
    cdn: Arc<dyn Cdn>,
    board: Board,
    settings: Settings,
}

impl Session {
    pub(crate) fn new(cdn: Arc<dyn Cdn>, settings: Settings) -> Self {
        Self {
            cdn,
            board: Board::default(),
            settings,
        }
    }

    pub(crate) fn cdn(&self) -> &dyn Cdn {
        self.cdn.as_ref()
    }

    pub(crate) fn board(&self) -> &Board {
        &self.board
    }

    /// Validates `input` and starts probing for its thumbnail.
    ///
    /// Input errors are returned right away and never start a probe.
    pub(crate) fn submit(&self, input: &str) -> Result<Probe, Error> {
        let video_id = youtube::validate(input)?;
        let urls = ThumbnailUrls::new(&video_id);
        let request = Request::new(self.board.issue(), video_id, urls);
        let cdn = Arc::clone(&self.cdn);
        let board = self.board.clone();
        let settings = self.settings.clone();
        Ok(thread::spawn(move || {
            run(&request, cdn.as_ref(), &board, &settings)
        }))
    }

    /// Handles text pasted into the input. Only probes when `auto_extract` is on.
    pub(crate) fn paste(&self, text: &str) -> Result<Pasted, Error> {
        match extract_video_id(text) {
            None => Ok(Pasted::Ignored),
            Some(_) if self.settings.auto_extract => Ok(Pasted::Extracting(self.submit(text)?)),
            Some(id) => Ok(Pasted::Detected(id)),
        }
    }
}

fn run(
    request: &Request,
    cdn: &dyn Cdn,
    board: &Board,
    settings: &Settings,
) -> Result<Presentation, Error> {
    if !settings.delay.is_zero() {
        thread::sleep(settings.delay);
    }
    let mut prober = Prober::new(settings.candidates.clone());
    let resolution = prober.resolve(request, cdn)?;
    let timestamp = Utc::now().timestamp_millis();
    let presentation = Presentation::new(
        request,
        resolution,
        &settings.filename_template,
        timestamp,
    )?;
    prober.present(board, &request.ticket, presentation.clone())?;
    Ok(presentation)
}

/// Joins a probe thread. A panic inside it surfaces as [`Error::ProbeFailed`].
pub(crate) fn wait(probe: Probe) -> Result<Presentation, Error> {
    probe.join().unwrap_or(Err(Error::ProbeFailed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thumbnail::cdn::fake::FakeCdn;
    use crate::thumbnail::utils::DEFAULT_TEMPLATE;
    use std::sync::mpsc::{self, Receiver};
    use std::sync::Mutex;

    const ID: &str = "dQw4w9WgXcQ";

    fn settings(auto_extract: bool) -> Settings {
        Settings {
            candidates: vec![Resolution::MaxRes, Resolution::Hq],
            delay: Duration::ZERO,
            filename_template: DEFAULT_TEMPLATE.to_string(),
            auto_extract,
        }
    }

    fn urls(id: &str) -> ThumbnailUrls {
        ThumbnailUrls::new(&youtube::validate(id).unwrap())
    }

    fn session(cdn: Arc<FakeCdn>, auto_extract: bool) -> Session {
        Session::new(cdn, settings(auto_extract))
    }

    #[test]
    fn watch_url_with_parameters_presents_maxres() {
        let urls = urls(ID);
        let cdn = Arc::new(FakeCdn::serving([urls.maxres.clone(), urls.hq.clone()]));
        let session = session(Arc::clone(&cdn), false);
        let probe = session
            .submit("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=10s")
            .unwrap();
        let presentation = wait(probe).unwrap();
        assert_eq!(presentation.video_id.as_str(), ID);
        assert_eq!(presentation.resolution, Resolution::MaxRes);
        assert_eq!(
            presentation.url,
            "https://img.youtube.com/vi/dQw4w9WgXcQ/maxresdefault.jpg"
        );
        assert_eq!(presentation.urls, urls);
        assert_eq!(session.board().current(), Some(presentation));
    }

    #[test]
    fn short_urls_and_bare_ids_resolve_to_the_same_video() {
        let urls = urls(ID);
        let cdn = Arc::new(FakeCdn::serving([urls.maxres.clone()]));
        let session = session(cdn, false);
        let short = wait(session.submit("https://youtu.be/dQw4w9WgXcQ").unwrap()).unwrap();
        let bare = wait(session.submit(ID).unwrap()).unwrap();
        assert_eq!(short.video_id, bare.video_id);
        assert!(bare.sequence > short.sequence);
    }

    #[test]
    fn input_errors_never_start_a_probe() {
        let cdn = Arc::new(FakeCdn::default());
        let session = session(Arc::clone(&cdn), false);
        assert_eq!(session.submit("   ").err(), Some(Error::EmptyInput));
        assert_eq!(session.submit("abc").err(), Some(Error::InvalidUrl));
        assert!(cdn.probes().is_empty());
        assert_eq!(session.board().current(), None);
    }

    #[test]
    fn missing_maxres_presents_hq() {
        let urls = urls(ID);
        let cdn = Arc::new(FakeCdn::serving([urls.hq.clone()]));
        let session = session(cdn, false);
        let presentation = wait(session.submit(ID).unwrap()).unwrap();
        assert_eq!(presentation.resolution, Resolution::Hq);
        assert_eq!(presentation.url, urls.hq);
    }

    #[test]
    fn missing_video_reports_no_thumbnail() {
        let cdn = Arc::new(FakeCdn::default());
        let session = session(cdn, false);
        assert_eq!(wait(session.submit(ID).unwrap()), Err(Error::NoThumbnail));
        assert_eq!(session.board().current(), None);
    }

    #[test]
    fn offers_four_downloads_with_one_timestamp() {
        let urls = urls(ID);
        let cdn = Arc::new(FakeCdn::serving([urls.maxres.clone()]));
        let session = session(cdn, false);
        let presentation = wait(session.submit(ID).unwrap()).unwrap();
        let tags: Vec<_> = presentation
            .downloads
            .iter()
            .map(|link| link.resolution)
            .collect();
        assert_eq!(tags, Resolution::DOWNLOADABLE.to_vec());
        assert!(presentation.download(Resolution::Default).is_none());

        let sd = presentation.download(Resolution::Sd).unwrap();
        assert_eq!(sd.url, urls.sd);
        let suffix = sd
            .filename
            .strip_prefix("youtube-thumbnail-dQw4w9WgXcQ-sd-")
            .and_then(|rest| rest.strip_suffix(".jpg"))
            .unwrap();
        assert!(suffix.parse::<i64>().is_ok());
        for link in &presentation.downloads {
            assert!(link.filename.ends_with(&format!("-{suffix}.jpg")));
        }
    }

    #[test]
    fn paste_only_detects_unless_auto_extract() {
        let urls = urls(ID);
        let cdn = Arc::new(FakeCdn::serving([urls.maxres.clone()]));
        let manual = session(Arc::clone(&cdn), false);
        match manual.paste("https://youtu.be/dQw4w9WgXcQ").unwrap() {
            Pasted::Detected(id) => assert_eq!(id.as_str(), ID),
            other => panic!("expected detection, got {other:?}"),
        }
        assert!(matches!(manual.paste("hello there").unwrap(), Pasted::Ignored));
        assert!(cdn.probes().is_empty());

        let auto = session(Arc::clone(&cdn), true);
        match auto.paste(ID).unwrap() {
            Pasted::Extracting(probe) => {
                assert_eq!(wait(probe).unwrap().resolution, Resolution::MaxRes)
            }
            other => panic!("expected extraction, got {other:?}"),
        }
    }

    /// Holds probes of one video until released.
    #[derive(Debug)]
    struct GateCdn {
        slow: String,
        gate: Mutex<Receiver<()>>,
    }

    impl Cdn for GateCdn {
        fn probe(&self, url: &str) -> bool {
            if url.contains(&self.slow) {
                let _ = self.gate.lock().unwrap().recv();
            }
            true
        }

        fn fetch(&self, _url: &str) -> Result<Vec<u8>, Error> {
            Err(Error::Request)
        }
    }

    #[test]
    fn stale_probe_never_overwrites_a_newer_result() {
        let (release, gate) = mpsc::channel();
        let cdn = Arc::new(GateCdn {
            slow: "aaaaaaaaaaa".to_string(),
            gate: Mutex::new(gate),
        });
        let session = Session::new(cdn, settings(false));
        let stale = session.submit("aaaaaaaaaaa").unwrap();
        let fresh = wait(session.submit("bbbbbbbbbbb").unwrap()).unwrap();
        release.send(()).unwrap();
        assert_eq!(wait(stale), Err(Error::Superseded));
        let shown = session.board().current().unwrap();
        assert_eq!(shown, fresh);
        assert_eq!(shown.video_id.as_str(), "bbbbbbbbbbb");
    }

    #[derive(Debug)]
    struct BrokenCdn;

    impl Cdn for BrokenCdn {
        fn probe(&self, _url: &str) -> bool {
            panic!("connection pool poisoned");
        }

        fn fetch(&self, _url: &str) -> Result<Vec<u8>, Error> {
            Err(Error::Request)
        }
    }

    #[test]
    fn crashed_lookup_is_not_reported_as_superseded() {
        let session = Session::new(Arc::new(BrokenCdn), settings(false));
        let result = wait(session.submit(ID).unwrap());
        assert_eq!(result, Err(Error::ProbeFailed));
        assert_eq!(session.board().current(), None);
    }
}
