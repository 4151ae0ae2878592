use clap::{ArgGroup, Parser};

#[allow(clippy::struct_excessive_bools)]
#[derive(Parser)]
#[clap(
    author,
    version,
    about,
    override_usage = "yt-thumbnail [OPTIONS] <INPUT>...",
    arg_required_else_help = true
)]
#[clap(group(
  ArgGroup::new("source")
    .required(true)
    .multiple(true)
    .args(&["inputs", "video", "stdin"])
))]
pub(crate) struct Cli {
    /// YouTube video URLs or IDs
    #[clap(help_heading = "INPUT", value_name = "INPUT")]
    pub(crate) inputs: Vec<String>,

    /// Video ID to look up, as in watch?v=<VIDEO>
    #[clap(long, alias = "v", help_heading = "INPUT")]
    pub(crate) video: Option<String>,

    /// Read pasted text from stdin, one line at a time
    #[clap(long, takes_value = false, help_heading = "INPUT")]
    pub(crate) stdin: bool,

    /// Extract videos found in pasted text instead of only detecting them
    #[clap(long, takes_value = false, help_heading = "INPUT")]
    pub(crate) auto_extract: bool,

    /// Resolution to download (maxres, hq, mq, sd or all), can be repeated
    #[clap(long, short, value_name = "RESOLUTION", help_heading = "DOWNLOAD")]
    pub(crate) download: Vec<String>,

    /// Directory to save downloads into
    #[clap(long, short, value_name = "DIR", help_heading = "DOWNLOAD")]
    pub(crate) output: Option<String>,

    /// Print the image URL instead of opening it when a download fails
    #[clap(long, takes_value = false, help_heading = "DOWNLOAD")]
    pub(crate) no_open: bool,

    /// Comma separated resolutions to try, in order, for the preview
    #[clap(long, short, value_name = "RESOLUTIONS")]
    pub(crate) fallback: Option<String>,

    /// Milliseconds to wait before probing
    #[clap(long, value_name = "MS")]
    pub(crate) delay: Option<u64>,

    /// Print results as JSON
    #[clap(long, takes_value = false)]
    pub(crate) json: bool,

    /// Increase output verbosity
    #[clap(short, long, action = clap::ArgAction::Count, group = "verbosity")]
    pub(crate) verbose: u8,

    /// Hide output, use twice to hide errors as well
    #[clap(short, long, action = clap::ArgAction::Count, group = "verbosity")]
    pub(crate) silent: u8,

    /// Hide spinners
    #[clap(short = 'q', long, takes_value = false)]
    pub(crate) hide_spinners: bool,
}
