//! The main entry point for the `idscramble` command-line application.
//!
//! It resolves configuration, then streams the inputs through a `Scrambler`.

use anyhow::Context;
use idscramble::cli;
use idscramble::config::{ConfigLoader, SaltSource, ScrambleConfig};
use idscramble::stream::{self, Input};
use idscramble::{logging, OutputFormat, Scrambler, SummaryFormatter};
use std::env;
use std::fs::File;
use std::io::{self, Write};
use tracing::{debug, info};

fn main() -> anyhow::Result<()> {
    let args = cli::parse_args();
    logging::init(args.verbose);

    // Everything below up to the first read is validation; a bad value stops
    // the run before any output is produced.
    let file_config = match &args.config {
        Some(path) => {
            let working_dir = env::current_dir().context("cannot determine working directory")?;
            let resolved = ConfigLoader::find_config(path, &working_dir)?;
            debug!(path = %resolved.display(), "using config file");
            ConfigLoader::load(&resolved)
                .with_context(|| format!("failed to load config {}", resolved.display()))?
        }
        None => ScrambleConfig::default(),
    };

    let settings = file_config
        .merge(args.overrides())
        .resolve()
        .context("invalid configuration")?;
    let summary_format: OutputFormat = args.format.parse().context("invalid --format")?;

    if settings.salt_source == SaltSource::Random {
        info!("no salt configured, using a random per-run salt; output will not be reproducible");
    }
    let scrambler = Scrambler::new(settings.options)?;
    debug!(
        digest = %scrambler.algorithm(),
        mode = ?scrambler.mode(),
        "scrambler configured"
    );
    let inputs = Input::from_args(&args.inputs);

    let mut sink: Box<dyn Write> = match &args.output {
        // Every line is flushed as soon as it is written, so a buffer would never fill.
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("cannot create {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };

    let stats = stream::run_inputs(&scrambler, &inputs, &mut sink).context("scrambling aborted")?;
    sink.flush()?;

    debug!(
        lines = stats.lines,
        resource_ids = stats.resource_ids,
        account_ids = stats.account_ids,
        "run complete"
    );

    if args.summary {
        SummaryFormatter::new(summary_format).write_summary(
            &mut io::stderr(),
            &stats,
            scrambler.algorithm(),
        )?;
    }

    Ok(())
}
