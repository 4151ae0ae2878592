pub(super) mod cdn;
mod common;
mod download;
pub(super) mod error;
mod probe;
pub(super) mod session;
pub(super) mod utils;
pub(super) mod youtube;
use crate::init::{Context, Inputs};
use std::io::{self, BufRead};

use self::utils::{error_msg, message};

impl Inputs {
    /// Runs every submitted input, then every pasted line. Returns whether all succeeded.
    pub(super) fn process(&self, context: &mut Context) -> bool {
        let mut succeeded = true;
        for input in &self.submitted {
            succeeded &= common::extract(input, context).is_ok();
        }
        if self.paste {
            message("[paste] Reading pasted lines from stdin", context, 3);
            succeeded &= paste_lines(io::stdin().lock(), context);
        }
        succeeded
    }
}

/// Handles each line of `reader` as pasted text until end of input.
///
/// Lines that are not valid UTF-8 are reported and skipped.
fn paste_lines(mut reader: impl BufRead, context: &mut Context) -> bool {
    let mut succeeded = true;
    let mut buffer = Vec::new();
    for number in 1.. {
        buffer.clear();
        match reader.read_until(b'\n', &mut buffer) {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => {
                error_msg(Some("paste"), format!("Could not read stdin: {err}"), context);
                return false;
            }
        }
        let line = buffer.strip_suffix(b"\n").unwrap_or(&buffer);
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        match std::str::from_utf8(line) {
            Ok(line) => succeeded &= common::paste(line, context).is_ok(),
            Err(_) => {
                error_msg(
                    Some("paste"),
                    format!("Skipped line {number}, it is not valid UTF-8"),
                    context,
                );
                succeeded = false;
            }
        }
    }
    succeeded
}
