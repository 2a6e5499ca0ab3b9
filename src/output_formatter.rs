use crate::digest::DigestAlgorithm;
use crate::errors::{Error, Result};
use crate::stream::RunStats;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;
use std::str::FromStr;

/// Defines the possible formats for the end-of-run summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// A simple, human-readable text format.
    #[default]
    Text,
    /// JSON format, suitable for machine processing.
    Json,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown summary format '{other}' (expected text or json)").into()),
        }
    }
}

/// Writes run summaries. The salt is deliberately not part of any format.
pub struct SummaryFormatter {
    format: OutputFormat,
    tool_name: String,
    tool_version: String,
}

impl SummaryFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            tool_name: env!("CARGO_PKG_NAME").to_string(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Writes the formatted summary to a given writer.
    pub fn write_summary<W: Write>(
        &self,
        writer: &mut W,
        stats: &RunStats,
        algorithm: DigestAlgorithm,
    ) -> Result<()> {
        let output = match self.format {
            OutputFormat::Text => self.format_text(stats, algorithm),
            OutputFormat::Json => self.format_json(stats, algorithm, Utc::now())?,
        };
        writer.write_all(output.as_bytes())?;
        Ok(())
    }

    fn format_text(&self, stats: &RunStats, algorithm: DigestAlgorithm) -> String {
        let mut output = String::new();
        output.push_str(&format!("{}\n", "-".repeat(50)));
        output.push_str(&format!("Lines processed : {}\n", stats.lines));
        output.push_str(&format!("Resource IDs    : {}\n", stats.resource_ids));
        output.push_str(&format!("Account IDs     : {}\n", stats.account_ids));
        output.push_str(&format!("Digest          : {algorithm}\n"));
        output
    }

    fn format_json(
        &self,
        stats: &RunStats,
        algorithm: DigestAlgorithm,
        finished_at: DateTime<Utc>,
    ) -> Result<String> {
        #[derive(Serialize)]
        struct JsonSummary<'a> {
            tool: ToolInfo<'a>,
            finished_at: DateTime<Utc>,
            digest: &'static str,
            #[serde(flatten)]
            stats: &'a RunStats,
        }

        #[derive(Serialize)]
        struct ToolInfo<'a> {
            name: &'a str,
            version: &'a str,
        }

        let summary = JsonSummary {
            tool: ToolInfo {
                name: &self.tool_name,
                version: &self.tool_version,
            },
            finished_at,
            digest: algorithm.name(),
            stats,
        };

        let mut json = serde_json::to_string_pretty(&summary)?;
        json.push('\n');
        Ok(json)
    }
}
