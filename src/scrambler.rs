use crate::digest::DigestAlgorithm;
use crate::errors::{Error, Result};
use crate::patterns::{IdentifierKind, PatternSet};
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use tracing::trace;

/// Length of an account identifier, and of its scrambled replacement.
pub const ACCOUNT_ID_LEN: usize = 12;

/// Length of a generated default salt.
pub const RANDOM_SALT_LEN: usize = 16;

/// The mixing value appended to every identifier before hashing.
///
/// A salt is fixed for the lifetime of a run. Pinning it makes scrambling
/// reproducible across invocations, so several files that share real
/// identifiers keep sharing scrambled ones.
#[derive(Clone, PartialEq, Eq)]
pub struct Salt(String);

impl Salt {
    /// Wraps a user supplied salt. An empty value is rejected.
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(Error::Config("salt must not be empty".to_string()));
        }
        Ok(Self(value))
    }

    /// A fresh salt for this process only. Output scrambled with it cannot be
    /// reproduced by a later run.
    pub fn random() -> Self {
        let value: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(RANDOM_SALT_LEN)
            .map(char::from)
            .collect();
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Salt values must never end up in logs.
impl fmt::Debug for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Salt(..)")
    }
}

/// How a matched token is written back into its line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplaceMode {
    /// Replace only the matched span.
    #[default]
    Span,
    /// Replace every literal occurrence of the matched token anywhere in the
    /// line, even where it is glued to other word characters. Kept for output
    /// compatibility with older scrambled fixtures.
    Global,
}

impl FromStr for ReplaceMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "span" => Ok(ReplaceMode::Span),
            "global" => Ok(ReplaceMode::Global),
            other => Err(format!("unknown replace mode '{other}' (expected span or global)").into()),
        }
    }
}

/// Everything a `Scrambler` needs, resolved once at startup.
#[derive(Debug, Clone)]
pub struct ScramblerOptions {
    pub salt: Salt,
    pub algorithm: DigestAlgorithm,
    pub mode: ReplaceMode,
}

impl ScramblerOptions {
    /// Options with the default digest and replace mode.
    pub fn with_salt(salt: Salt) -> Self {
        Self {
            salt,
            algorithm: DigestAlgorithm::default(),
            mode: ReplaceMode::default(),
        }
    }
}

/// Counts of identifiers found in a single line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LineStats {
    pub resource_ids: usize,
    pub account_ids: usize,
}

impl LineStats {
    pub fn total(&self) -> usize {
        self.resource_ids + self.account_ids
    }
}

/// The result of scrambling one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrambledLine {
    pub text: String,
    pub stats: LineStats,
}

/// Deterministic, shape-preserving identifier scrambler.
///
/// Each scrambled value is a pure function of the token and the salt. Nothing
/// is remembered between calls, so lines can be processed in any order and
/// still agree with each other.
pub struct Scrambler {
    patterns: PatternSet,
    salt: Salt,
    algorithm: DigestAlgorithm,
    mode: ReplaceMode,
}

impl Scrambler {
    /// Creates a new `Scrambler`, compiling the identifier grammars once.
    pub fn new(options: ScramblerOptions) -> Result<Self> {
        Ok(Self {
            patterns: PatternSet::new()?,
            salt: options.salt,
            algorithm: options.algorithm,
            mode: options.mode,
        })
    }

    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    pub fn mode(&self) -> ReplaceMode {
        self.mode
    }

    /// Scrambles a `<type>-<hexsuffix>` token.
    ///
    /// The token is split at its last hyphen. The type is kept verbatim and the
    /// suffix is replaced by the leading characters of `digest(suffix + salt)`,
    /// so its length stays the same and it is always lowercase hex. The
    /// type plays no part in the hash: equal suffixes under different types
    /// scramble to equal suffixes.
    pub fn scramble_resource_id(&self, token: &str) -> String {
        let Some((resource_type, suffix)) = token.rsplit_once('-') else {
            return token.to_string();
        };
        let digest = self
            .algorithm
            .hex_digest(&format!("{suffix}{}", self.salt.as_str()));
        // A longer suffix than the digest cannot come out of the locator.
        let len = suffix.len().min(digest.len());
        format!("{resource_type}-{}", &digest[..len])
    }

    /// Scrambles a 12 digit account token.
    ///
    /// `digest(token + salt)` is read as an integer and its decimal expansion
    /// is cut to 12 digits. When the expansion is too short, the digest is fed
    /// back through the hash until it is long enough.
    pub fn scramble_account_id(&self, token: &str) -> String {
        let value = self
            .algorithm
            .digest_u128(&format!("{token}{}", self.salt.as_str()));
        self.account_digits(value)
    }

    /// The first 12 decimal digits of `value`, re-hashing `hex(value) + salt`
    /// while the expansion is too short.
    fn account_digits(&self, mut value: u128) -> String {
        let salt = self.salt.as_str();
        loop {
            if let Some(digits) = decimal_prefix(value, ACCOUNT_ID_LEN) {
                return digits;
            }
            value = self.algorithm.digest_u128(&format!("{value:032x}{salt}"));
        }
    }

    /// Scrambles a token of the given kind.
    pub fn scramble(&self, kind: IdentifierKind, token: &str) -> String {
        match kind {
            IdentifierKind::Resource => self.scramble_resource_id(token),
            IdentifierKind::Account => self.scramble_account_id(token),
        }
    }

    /// Scrambles every identifier in a line.
    ///
    /// Resource identifiers are replaced first. Account identifiers are then
    /// located in the already modified line. The two grammars cannot overlap,
    /// so the order does not change the result.
    pub fn scramble_line(&self, line: &str) -> ScrambledLine {
        let (after_resources, resource_ids) = self.apply(IdentifierKind::Resource, line);
        let (text, account_ids) = self.apply(IdentifierKind::Account, &after_resources);
        let stats = LineStats {
            resource_ids,
            account_ids,
        };
        if stats.total() > 0 {
            trace!(resource_ids, account_ids, "scrambled line");
        }
        ScrambledLine {
            text: text.into_owned(),
            stats,
        }
    }

    fn apply<'a>(&self, kind: IdentifierKind, line: &'a str) -> (Cow<'a, str>, usize) {
        let matches = self.patterns.find(kind, line);
        if matches.is_empty() {
            return (Cow::Borrowed(line), 0);
        }

        let replaced = match self.mode {
            ReplaceMode::Span => {
                let mut out = String::with_capacity(line.len());
                let mut last = 0;
                for m in &matches {
                    out.push_str(&line[last..m.start]);
                    out.push_str(&self.scramble(m.kind, m.text));
                    last = m.end;
                }
                out.push_str(&line[last..]);
                out
            }
            ReplaceMode::Global => {
                let mut out = line.to_string();
                for m in &matches {
                    out = out.replace(m.text, &self.scramble(m.kind, m.text));
                }
                out
            }
        };

        (Cow::Owned(replaced), matches.len())
    }
}

/// The first `len` characters of the decimal form of `value`, or `None` when
/// that form is shorter than `len`.
fn decimal_prefix(value: u128, len: usize) -> Option<String> {
    let mut decimal = value.to_string();
    if decimal.len() < len {
        return None;
    }
    decimal.truncate(len);
    Some(decimal)
}
