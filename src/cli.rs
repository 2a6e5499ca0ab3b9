use crate::config::ScrambleConfig;
use clap::Parser;
use std::path::PathBuf;

/// Scramble cloud resource and account identifiers in text.
///
/// `idscramble` reads lines, replaces every resource identifier
/// (`i-b9b4ffaa`, `vol-b365e5cb5e48fe90f`, ...) and every 12 digit account id
/// with a consistent, same-shaped substitute, and writes the lines back out.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Deterministically scramble cloud resource and account identifiers",
    long_about = "idscramble - replace cloud identifiers with consistent look-alikes.

Resource ids keep their type prefix and suffix length; account ids stay 12 digits.
The same id always maps to the same replacement within a run. Pin the salt to keep
that mapping across runs, e.g. for several files from the same account.

QUICK EXAMPLES:
  aws ec2 describe-instances | idscramble          # Random salt, one-off
  idscramble -s incident-4711 a.json b.json        # Reproducible across files
  idscramble -c scramble.yaml -o fixture.json raw.json
  idscramble --summary -f json < billing.csv > billing.scrambled.csv"
)]
pub struct Args {
    /// Salt mixed into every scrambled value. Defaults to a random per-run salt.
    #[arg(short, long, env = "IDSCRAMBLE_SALT", hide_env_values = true)]
    pub salt: Option<String>,

    /// Digest algorithm: `md5` (the default) or `sha256`.
    #[arg(short, long, env = "IDSCRAMBLE_DIGEST")]
    pub digest: Option<String>,

    /// Replace every literal occurrence of a matched id in the line, not only
    /// the matched span.
    #[arg(long)]
    pub global_replace: bool,

    /// Path to a YAML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Path to the output file. If omitted, lines are written to standard output.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write a run summary to standard error when done.
    #[arg(long)]
    pub summary: bool,

    /// The summary format (`text` or `json`).
    #[arg(short = 'f', long = "format", default_value = "text")]
    pub format: String,

    /// Enable debug logging on standard error.
    #[arg(short, long)]
    pub verbose: bool,

    /// Input files, read in order. `-` or no input reads standard input.
    pub inputs: Vec<PathBuf>,
}

impl Args {
    /// The settings given on the command line, to be layered over a config file.
    pub fn overrides(&self) -> ScrambleConfig {
        ScrambleConfig {
            salt: self.salt.clone(),
            digest: self.digest.clone(),
            replace_mode: self.global_replace.then(|| "global".to_string()),
        }
    }
}

/// Parses command-line arguments and returns the populated `Args` struct.
pub fn parse_args() -> Args {
    Args::parse()
}
