//! `idscramble` replaces cloud identifiers in text with consistent look-alikes.
//!
//! It provides the core logic for the `idscramble` command-line tool but can
//! also be used as a library. The main components are:
//!
//! - `patterns`: Locates resource ids (`<type>-<hex>`) and 12 digit account ids in a line.
//! - `Scrambler`: Replaces them with salted, shape-preserving substitutes.
//! - `digest`: The 128-bit hashing primitive (MD5 by default, SHA-256 optional).
//! - `stream`: Drives a scrambler over line-oriented input and output.
//! - `config`: Loads and validates settings from YAML and the command line.
//!
//! Scrambling is deterministic obfuscation, not encryption.

pub mod cli;
pub mod config;
pub mod digest;
pub mod errors;
pub mod logging;
pub mod output_formatter;
pub mod patterns;
pub mod scrambler;
pub mod stream;

// Re-export main types for easier access by library users.
pub use digest::DigestAlgorithm;
pub use errors::{Error, Result};
pub use output_formatter::{OutputFormat, SummaryFormatter};
pub use scrambler::{ReplaceMode, Salt, Scrambler, ScramblerOptions};
pub use stream::RunStats;
