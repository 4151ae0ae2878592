use self::external::External;
use crate::thumbnail::cdn::{Cdn, HttpCdn};
use crate::thumbnail::session::{Session, Settings};
use crate::thumbnail::youtube::Resolution;
use crate::utils::Spinner;
use crate::Error;
use derive_more::Constructor;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
mod args;
pub(super) mod cli;
mod config;
pub(super) mod external;

#[derive(Debug, Constructor)]
pub(super) struct Input {
  pub(super) inputs: Inputs,
  pub(super) context: Context,
}

pub(super) fn run() -> Result<Input, Error> {
  let args = args::parse()?;
  let mut spinner = Spinner::new(args.verbosity, args.hide_spinners);

  spinner.create(" Getting config");
  let config = config::get(args.verbosity, &mut spinner);
  spinner.end();
  let config = config?;

  let open_fallback = config.open_fallback && !args.no_open;
  spinner.create(" Checking external programs");
  let missing = external::find_missing(open_fallback);
  spinner.end();
  if args.verbosity >= 1 {
    for command in &missing {
      command.missing();
    }
  }

  let output_dir = args.output.unwrap_or(config.output_dir.clone());
  if !args.downloads.is_empty() && !output_dir.exists() {
    config::create_dir(&output_dir)?;
  }

  let cdn: Arc<dyn Cdn> = Arc::new(HttpCdn::new(Duration::from_secs(config.timeout_secs))?);
  let settings = Settings {
    candidates: args.fallback.unwrap_or(config.fallback.clone()),
    delay: Duration::from_millis(args.delay.unwrap_or(config.probe_delay_ms)),
    filename_template: config.filename_template.clone(),
    auto_extract: args.auto_extract || config.auto_extract,
  };

  let mut context = Context {
    verbosity: args.verbosity,
    spinner,
    session: Session::new(cdn, settings),
    output_dir,
    downloads: args.downloads,
    json: args.json,
    open_fallback,
    missing,
  };
  config::trace(&config, &mut context);
  Ok(Input::new(args.inputs, context))
}

/// Text to work on: inputs submitted up front, and whether to read pasted lines.
#[derive(Debug, Default)]
pub(crate) struct Inputs {
  pub(crate) submitted: Vec<String>,
  pub(crate) paste: bool,
}

#[derive(Debug)]
pub(crate) struct Context {
  pub(crate) verbosity: i16,
  pub(crate) spinner: Spinner,
  pub(crate) session: Session,
  pub(crate) output_dir: PathBuf,
  pub(crate) downloads: Vec<Resolution>,
  pub(crate) json: bool,
  pub(crate) open_fallback: bool,
  pub(crate) missing: Vec<External>,
}

#[cfg(test)]
impl Context {
  /// Silent context without a config file or spinners, probing `cdn` right away.
  pub(crate) fn detached(cdn: Arc<dyn Cdn>, output_dir: &std::path::Path) -> Self {
    let settings = Settings {
      candidates: vec![Resolution::MaxRes, Resolution::Hq],
      delay: Duration::ZERO,
      filename_template: crate::utils::DEFAULT_TEMPLATE.to_string(),
      auto_extract: false,
    };
    Self {
      verbosity: -2,
      spinner: Spinner::new(-2, true),
      session: Session::new(cdn, settings),
      output_dir: output_dir.to_path_buf(),
      downloads: Vec::new(),
      json: false,
      open_fallback: false,
      missing: Vec::new(),
    }
  }
}
