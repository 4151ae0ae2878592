use super::youtube::{Resolution, VideoId};
use crate::init::Context;
use crate::Error;
use colored::{Color, Colorize};
use std::collections::HashMap;
use std::fmt::{self, Debug, Formatter};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::LazyLock;
use strfmt::strfmt;
use terminal_spinners::{SpinnerBuilder, SpinnerHandle, DOTS2};
use unicode_general_category::{get_general_category, GeneralCategory};
use unicode_normalization::UnicodeNormalization;

static ACCENTS: LazyLock<HashMap<char, &str>> = LazyLock::new(|| {
    let source = "ÂÃÄÀÁÅÆÇÈÉÊËÌÍÎÏÐÑÒÓÔÕÖŐØŒÙÚÛÜŰÝÞßàáâãäåæçèéêëìíîïðñòóôõöőøœùúûüűýþÿ";
    let replacements = [
        "A", "A", "A", "A", "A", "A", "AE", "C", "E", "E", "E", "E", "I", "I", "I", "I", "D", "N",
        "O", "O", "O", "O", "O", "O", "O", "OE", "U", "U", "U", "U", "U", "Y", "TH", "ss", "a",
        "a", "a", "a", "a", "a", "ae", "c", "e", "e", "e", "e", "i", "i", "i", "i", "d", "n", "o",
        "o", "o", "o", "o", "o", "o", "oe", "u", "u", "u", "u", "u", "y", "th", "y",
    ];
    source.chars().zip(replacements).collect()
});

pub(crate) const DEFAULT_TEMPLATE: &str = "youtube-thumbnail-{id}-{resolution}-{timestamp}.jpg";

pub(super) fn colorize(label: Option<&str>, message: &str, color: Color) -> String {
    if let Some(label) = label {
        format!(
            "{}{label}{} {}",
            "[".bold().color(color),
            "]".bold().color(color),
            message.bold().color(color)
        )
    } else {
        message.bold().color(color).to_string()
    }
}

pub(crate) fn message<T: AsRef<str>>(msg: T, context: &mut Context, threshold: i16) {
    if context.verbosity >= threshold {
        context.spinner.stop();
        println!("{}", msg.as_ref());
        context.spinner.start();
    }
}

pub(crate) fn help_error(message: &str, extra: Option<&[&str]>) {
    error(message, extra);
    eprintln!("\nUSAGE:\n    yt-thumbnail [OPTIONS] <INPUT>...");
    eprintln!("\nFor more information try {}", "yt-thumbnail --help".green());
}

pub(crate) fn good_msg<T: Into<String>>(label: Option<&str>, msg: T, context: &mut Context) {
    message(colorize(label, &msg.into(), Color::BrightGreen), context, 0);
}

pub(crate) fn warn_msg<T: Into<String>>(label: Option<&str>, msg: T, context: &mut Context) {
    message(colorize(label, &msg.into(), Color::BrightYellow), context, 1);
}

pub(crate) fn error_msg<T: Into<String>>(label: Option<&str>, msg: T, context: &mut Context) {
    message(colorize(label, &msg.into(), Color::BrightRed), context, -1);
}

pub(crate) fn error(message: &str, extra: Option<&[&str]>) {
    eprintln!("{} {message}", "error:".bold().bright_red());
    if let Some(extra) = extra {
        for line in extra {
            eprintln!("{line}");
        }
    }
}

pub(super) fn write_file(path: impl AsRef<Path>, bytes: &[u8]) -> Result<(), Error> {
    let path = path.as_ref();
    if path.exists() {
        return Err(Error::AlreadyExists);
    }
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    Ok(())
}

fn is_mark(c: char) -> bool {
    use GeneralCategory::{
        Control, EnclosingMark, Format, NonspacingMark, PrivateUse, SpacingMark, Surrogate,
    };
    matches!(
        get_general_category(c),
        Control | Format | Surrogate | PrivateUse | SpacingMark | EnclosingMark | NonspacingMark
    )
}

fn replace_unsafe(c: char, output: &mut String) {
    match c {
        c if c.is_ascii_alphanumeric() || "-_.".contains(c) => output.push(c),
        c if ACCENTS.contains_key(&c) => output.push_str(ACCENTS[&c]),
        c if c > '\u{7f}' && is_mark(c) => {}
        _ => output.push('_'),
    }
}

/// Restricts `data` to characters every filesystem accepts.
pub(super) fn sanitize(data: &str) -> String {
    let mut output = String::with_capacity(data.len());
    for c in data.nfkc() {
        replace_unsafe(c, &mut output);
    }
    while output.contains("__") {
        output = output.replace("__", "_");
    }
    let output = output.trim_matches('_').trim_start_matches('.');
    if output.is_empty() {
        "_".to_string()
    } else {
        output.to_string()
    }
}

/// Renders the suggested file name for one resolution of a video.
///
/// Canonical identifiers are kept verbatim; anything else captured from a URL
/// is sanitized first.
pub(crate) fn filename(
    template: &str,
    id: &VideoId,
    resolution: Resolution,
    timestamp: i64,
) -> Result<String, Error> {
    let id = if id.is_canonical() {
        id.to_string()
    } else {
        sanitize(id.as_str())
    };
    let vars = HashMap::from([
        ("id".to_string(), id),
        ("resolution".to_string(), resolution.tag().to_string()),
        ("timestamp".to_string(), timestamp.to_string()),
    ]);
    Ok(strfmt(template, &vars)?)
}

pub(crate) struct Spinner {
    handle: Option<SpinnerHandle>,
    message: Option<String>,
    verbosity: i16,
    hidden: bool,
}

impl Debug for Spinner {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let handle = match &self.handle {
            Some(_) => "Some",
            None => "None",
        };
        write!(
            f,
            "Spinner {{ handle: {handle}, message: {:?} }}",
            self.message
        )
    }
}

impl Spinner {
    pub(crate) fn new(verbosity: i16, hidden: bool) -> Self {
        Self {
            handle: None,
            message: None,
            verbosity,
            hidden,
        }
    }
    pub(crate) fn create(&mut self, message: &str) {
        self.message = Some(message.to_string());
        if self.verbosity >= -1 && !self.hidden {
            self.handle = Some(
                SpinnerBuilder::new()
                    .spinner(&DOTS2)
                    .text(message.to_string())
                    .start(),
            );
        }
    }
    pub(crate) fn start(&mut self) {
        if self.handle.is_none() {
            if let Some(msg) = self.message.clone() {
                self.create(&msg);
            }
        }
    }
    pub(crate) fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.stop_and_clear();
        }
    }
    pub(crate) fn end(&mut self) {
        self.stop();
        self.message = None;
    }
}
