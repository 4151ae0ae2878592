mod init;
mod thumbnail;
use init::Input;
use std::process::ExitCode;
pub(crate) use thumbnail::error::Error;
pub(crate) use thumbnail::utils;
use utils::{error, help_error};

fn main() -> ExitCode {
    match init::run() {
        Ok(Input {
            inputs,
            mut context,
        }) => {
            if inputs.process(&mut context) {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(err @ Error::UnknownResolution(_)) => {
            help_error(&err.to_string(), None);
            ExitCode::FAILURE
        }
        Err(err) => {
            error(&err.to_string(), None);
            ExitCode::FAILURE
        }
    }
}
