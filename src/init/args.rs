use super::Inputs;
use crate::thumbnail::youtube::{watch_url, Resolution};
use crate::Error;
use clap::Parser;
use derive_more::Constructor;
use std::path::PathBuf;

#[derive(Debug, Constructor)]
pub(super) struct Args {
    pub(super) inputs: Inputs,
    pub(super) verbosity: i16,
    pub(crate) hide_spinners: bool,
    pub(super) downloads: Vec<Resolution>,
    pub(super) output: Option<PathBuf>,
    pub(super) fallback: Option<Vec<Resolution>>,
    pub(super) delay: Option<u64>,
    pub(super) auto_extract: bool,
    pub(super) no_open: bool,
    pub(super) json: bool,
}

pub(super) fn parse() -> Result<Args, Error> {
    from_cli(crate::init::cli::Cli::parse())
}

fn from_cli(cli: crate::init::cli::Cli) -> Result<Args, Error> {
    let mut submitted = Vec::new();
    if let Some(video) = &cli.video {
        submitted.push(watch_url(video));
    }
    submitted.extend(cli.inputs);
    let inputs = Inputs {
        submitted,
        paste: cli.stdin,
    };

    let downloads = parse_downloads(&cli.download)?;
    let fallback = match &cli.fallback {
        Some(list) => match parse_resolutions(split(list))? {
            resolutions if resolutions.is_empty() => {
                return Err(Error::Config(
                    "Option --fallback needs at least one resolution".to_string(),
                ))
            }
            resolutions => Some(resolutions),
        },
        None => None,
    };
    let verbosity = i16::from(cli.verbose) - i16::from(cli.silent);
    Ok(Args::new(
        inputs,
        verbosity,
        cli.hide_spinners,
        downloads,
        cli.output.map(PathBuf::from),
        fallback,
        cli.delay,
        cli.auto_extract,
        cli.no_open,
        cli.json,
    ))
}

fn split(data: &str) -> impl Iterator<Item = &str> {
    data.split(',').map(str::trim).filter(|s| !s.is_empty())
}

fn parse_resolutions<'a>(tags: impl Iterator<Item = &'a str>) -> Result<Vec<Resolution>, Error> {
    let mut resolutions = Vec::new();
    for tag in tags {
        let resolution = tag.parse::<Resolution>()?;
        if !resolutions.contains(&resolution) {
            resolutions.push(resolution);
        }
    }
    Ok(resolutions)
}

fn parse_downloads(values: &[String]) -> Result<Vec<Resolution>, Error> {
    let tags: Vec<&str> = values.iter().flat_map(|value| split(value)).collect();
    if tags.iter().any(|tag| tag.eq_ignore_ascii_case("all")) {
        return Ok(Resolution::DOWNLOADABLE.to_vec());
    }
    let resolutions = parse_resolutions(tags.into_iter())?;
    match resolutions
        .iter()
        .find(|resolution| !Resolution::DOWNLOADABLE.contains(resolution))
    {
        Some(resolution) => Err(Error::Config(format!(
            "The {resolution} thumbnail is not offered for download, pick maxres, hq, mq or sd"
        ))),
        None => Ok(resolutions),
    }
}
