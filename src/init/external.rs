use crate::{utils, Error};
use std::fmt::Display;
use std::process::{Command, Stdio};
use which::which;

#[cfg(target_os = "macos")]
const OPENER: &str = "open";
#[cfg(target_os = "windows")]
const OPENER: &str = "explorer";
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const OPENER: &str = "xdg-open";

pub(super) fn find_missing(open_fallback: bool) -> Vec<External> {
    let commands = if open_fallback {
        vec![External::Opener]
    } else {
        Vec::new()
    };
    commands.into_iter().filter(|c| !c.is_installed()).collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum External {
    Opener,
}

impl External {
    pub(crate) fn command(&self) -> &str {
        match self {
            External::Opener => OPENER,
        }
    }
    fn is_installed(&self) -> bool {
        which(self.command()).is_ok()
    }
    pub(super) fn missing(&self) {
        utils::error(
            format!("Missing external program: {self}").as_str(),
            Some(&["Failed downloads will only print their URL."][..]),
        );
    }
    /// Hands `target` to the program, without waiting on anything it spawns.
    pub(crate) fn open(&self, target: &str) -> Result<(), Error> {
        let status = Command::new(self.command())
            .arg(target)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()?;
        // explorer exits with 1 even when it opened the target
        if status.success() || cfg!(target_os = "windows") {
            Ok(())
        } else {
            Err(Error::CommandFailed(*self))
        }
    }
}

impl Display for External {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            External::Opener if cfg!(target_os = "macos") => write!(f, "open (part of macOS)"),
            External::Opener if cfg!(target_os = "windows") => write!(f, "explorer (part of Windows)"),
            External::Opener => write!(
                f,
                "xdg-open: https://www.freedesktop.org/wiki/Software/xdg-utils/"
            ),
        }
    }
}
