//! Line source and sink plumbing around the scrambler.

use crate::errors::Result;
use crate::scrambler::{LineStats, Scrambler};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Aggregate counts for a whole run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Lines read and written.
    pub lines: usize,
    /// Resource identifiers replaced.
    pub resource_ids: usize,
    /// Account identifiers replaced.
    pub account_ids: usize,
}

impl RunStats {
    fn record(&mut self, line: LineStats) {
        self.lines += 1;
        self.resource_ids += line.resource_ids;
        self.account_ids += line.account_ids;
    }

    /// Adds the counts of another run, e.g. the next input file.
    pub fn merge(&mut self, other: &RunStats) {
        self.lines += other.lines;
        self.resource_ids += other.resource_ids;
        self.account_ids += other.account_ids;
    }
}

/// Scrambles `reader` line by line into `writer`.
///
/// Every line is written and flushed as soon as it is transformed. A read
/// error (including input that is not valid UTF-8) aborts the run; lines
/// already written stay written and nothing after the failure is emitted.
pub fn run<R: BufRead, W: Write>(scrambler: &Scrambler, reader: R, writer: &mut W) -> Result<RunStats> {
    let mut stats = RunStats::default();

    for line in reader.lines() {
        let line = line?;
        let scrambled = scrambler.scramble_line(&line);
        writeln!(writer, "{}", scrambled.text)?;
        writer.flush()?;
        stats.record(scrambled.stats);
        trace!(line = stats.lines, "line written");
    }

    Ok(stats)
}

/// A source of input lines named on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Stdin,
    File(PathBuf),
}

impl Input {
    /// `-` selects standard input; anything else is a file path.
    pub fn from_arg(arg: &Path) -> Self {
        if arg.as_os_str() == "-" {
            Input::Stdin
        } else {
            Input::File(arg.to_path_buf())
        }
    }

    /// Resolves the positional arguments, defaulting to stdin.
    pub fn from_args(args: &[PathBuf]) -> Vec<Self> {
        if args.is_empty() {
            vec![Input::Stdin]
        } else {
            args.iter().map(|a| Input::from_arg(a)).collect()
        }
    }

    fn describe(&self) -> String {
        match self {
            Input::Stdin => "<stdin>".to_string(),
            Input::File(path) => path.display().to_string(),
        }
    }
}

/// Scrambles every input in order into the same sink, with the same salt.
pub fn run_inputs<W: Write>(scrambler: &Scrambler, inputs: &[Input], writer: &mut W) -> Result<RunStats> {
    let mut total = RunStats::default();

    for input in inputs {
        debug!(input = %input.describe(), "scrambling input");
        let stats = match input {
            Input::Stdin => run(scrambler, io::stdin().lock(), writer)?,
            Input::File(path) => {
                let file = File::open(path).map_err(|e| {
                    io::Error::new(e.kind(), format!("{}: {e}", path.display()))
                })?;
                run(scrambler, BufReader::new(file), writer)?
            }
        };
        debug!(
            input = %input.describe(),
            lines = stats.lines,
            resource_ids = stats.resource_ids,
            account_ids = stats.account_ids,
            "input done"
        );
        total.merge(&stats);
    }

    Ok(total)
}
