use crate::init::external::External;
use std::fmt::Display;
use std::io;

#[derive(Debug, PartialEq)]
pub(crate) enum Error {
    Io,
    JsonParseFailed,
    AlreadyExists,
    EmptyInput,
    InvalidUrl,
    NoThumbnail,
    Superseded,
    ProbeFailed,
    UnknownResolution(String),
    ConfigFileMissing,
    ConfigParseFailed,
    ConfigSerializeFailed,
    Request,
    Format,
    CommandFailed(External),
    Config(String),
}

impl Error {
    /// Whether the error is one the user caused and can fix by retyping.
    pub(crate) fn is_input(&self) -> bool {
        matches!(self, Error::EmptyInput | Error::InvalidUrl)
    }
}

impl From<io::Error> for Error {
    fn from(_: io::Error) -> Error {
        Error::Io
    }
}

impl From<serde_json::Error> for Error {
    fn from(_: serde_json::Error) -> Error {
        Error::JsonParseFailed
    }
}

impl From<toml::de::Error> for Error {
    fn from(_: toml::de::Error) -> Error {
        Error::ConfigParseFailed
    }
}

impl From<toml::ser::Error> for Error {
    fn from(_: toml::ser::Error) -> Error {
        Error::ConfigSerializeFailed
    }
}

impl From<reqwest::Error> for Error {
    fn from(_: reqwest::Error) -> Error {
        Error::Request
    }
}

impl From<strfmt::FmtError> for Error {
    fn from(_: strfmt::FmtError) -> Error {
        Error::Format
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::Io => write!(f, "Reading or writing a file failed"),
            Error::JsonParseFailed => write!(f, "Serializing JSON failed"),
            Error::AlreadyExists => write!(f, "Already exists"),
            Error::EmptyInput => write!(f, "Please enter a YouTube video URL"),
            Error::InvalidUrl => write!(f, "Not a valid YouTube URL or video ID"),
            Error::NoThumbnail => write!(f, "No thumbnail available"),
            Error::Superseded => write!(f, "Superseded by a newer request"),
            Error::ProbeFailed => write!(f, "Probing for the thumbnail failed"),
            Error::UnknownResolution(tag) => write!(f, "Unknown resolution: {tag}"),
            Error::ConfigFileMissing => write!(f, "Config file does not exist"),
            Error::ConfigParseFailed => write!(f, "Parsing config file failed"),
            Error::ConfigSerializeFailed => write!(f, "Serializing config file failed"),
            Error::Request => write!(f, "Request failed"),
            Error::Format => write!(f, "Formatting failed"),
            Error::CommandFailed(program) => write!(f, "Command failed: {program}"),
            Error::Config(message) => write!(f, "{message}"),
        }
    }
}
