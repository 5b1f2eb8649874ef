use clap::Parser;
use std::path::{Path, PathBuf};

/// Overrides the directory holding hmac.ini and log.txt.
pub const HOME_ENV: &str = "SWIFT_HMAC_HOME";

/// The whole command line is positional: the first value is the message file,
/// whatever it looks like, and anything after it is ignored.
#[derive(Parser, Debug)]
#[command(name = "swift-hmac", version)]
#[command(about = "Stamp a SWIFT message file with an HMAC-SHA256 {S:{MDG:...}} trailer.")]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<PathBuf>,
}

impl Cli {
    /// Message file to stamp in place.
    pub fn file(&self) -> Option<&Path> {
        self.args.first().map(PathBuf::as_path)
    }
}
