use crate::thumbnail::utils::{filename, message, Spinner, DEFAULT_TEMPLATE};
use crate::thumbnail::youtube::{validate, Resolution};
use crate::Error;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub(super) fn get(verbosity: i16, spinner: &mut Spinner) -> Result<Config, Error> {
  let project_dirs = match ProjectDirs::from("moe", "Assistant", "yt-thumbnail") {
    Some(dirs) => dirs,
    None => {
      return Err(Error::Config(
        "Could not find project directory".to_string(),
      ))
    }
  };

  if !project_dirs.config_dir().exists() {
    create_dir(project_dirs.config_dir())?;
  }
  let config_path = project_dirs.config_dir().join("config.toml");

  let config = match read_config(&config_path) {
    Ok(config) => config,
    Err(Error::ConfigFileMissing) => {
      create_config(&config_path)?;
      if verbosity >= 1 {
        spinner.stop();
        println!("[config] Created {}", config_path.display());
        spinner.start();
      }
      Config::default()
    }
    Err(Error::Io) => {
      return Err(Error::Config(format!(
        "Could not open config file: {}",
        config_path.display()
      )));
    }
    Err(err) => {
      if verbosity >= 3 {
        spinner.stop();
        println!("[config] {err}");
        spinner.start();
      }
      return Err(Error::Config(format!(
        "Could not read config file: {}",
        config_path.display()
      )));
    }
  };
  config.check()?;
  Ok(config)
}

fn read_config(config_path: &Path) -> Result<Config, Error> {
  if config_path.exists() {
    let config_string = std::fs::read_to_string(config_path)?;
    let config: Config = toml::from_str(&config_string)?;
    Ok(config)
  } else {
    Err(Error::ConfigFileMissing)
  }
}

fn write_config(config_path: &Path, config: &Config) -> Result<(), Error> {
  let config_string = toml::to_string(config)?;
  std::fs::write(config_path, config_string)?;
  Ok(())
}

fn create_config(config_path: &Path) -> Result<(), Error> {
  match write_config(config_path, &Config::default()) {
    Ok(()) => Ok(()),
    Err(_) => Err(Error::Config(format!(
      "Could not create config file: {}",
      config_path.display()
    ))),
  }
}

pub(super) fn create_dir(dir_path: &Path) -> Result<(), Error> {
  match std::fs::create_dir_all(dir_path) {
    Ok(()) => Ok(()),
    Err(_) => Err(Error::Config(format!(
      "Could not create directory: {}",
      dir_path.display()
    ))),
  }
}

#[derive(Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub(super) struct Config {
  pub(super) output_dir: PathBuf,
  pub(super) filename_template: String,
  pub(super) fallback: Vec<Resolution>,
  pub(super) probe_delay_ms: u64,
  pub(super) timeout_secs: u64,
  pub(super) auto_extract: bool,
  pub(super) open_fallback: bool,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      output_dir: PathBuf::from("."),
      filename_template: DEFAULT_TEMPLATE.to_string(),
      fallback: vec![Resolution::MaxRes, Resolution::Hq],
      probe_delay_ms: 500,
      timeout_secs: 30,
      auto_extract: false,
      open_fallback: true,
    }
  }
}

impl Config {
  fn check(&self) -> Result<(), Error> {
    if self.fallback.is_empty() {
      return Err(Error::Config(
        "Config option fallback needs at least one resolution".to_string(),
      ));
    }
    if self.timeout_secs == 0 {
      return Err(Error::Config(
        "Config option timeout_secs must be positive".to_string(),
      ));
    }
    let sample = validate("dQw4w9WgXcQ")?;
    if filename(&self.filename_template, &sample, Resolution::Hq, 0).is_err() {
      return Err(Error::Config(format!(
        "Config option filename_template is invalid: {}, known keys are {{id}}, {{resolution}} and {{timestamp}}",
        self.filename_template
      )));
    }
    Ok(())
  }
}

/// Logs the effective settings at the highest verbosity.
pub(super) fn trace(config: &Config, context: &mut super::Context) {
  message(format!("[config] {config:?}"), context, 3);
}
