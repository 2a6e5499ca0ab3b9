use crate::errors::Result;
use regex::Regex;

/// Resource identifiers such as `i-b9b4ffaa`, `vol-e97db305` or the newer
/// long form `ami-0aeeebd8d2ab47354`.
///
/// The 17 digit form is listed first so a long suffix is never cut down to 8.
/// Both word boundaries are ASCII, so `_` and digits glue onto the token.
pub const RESOURCE_ID_PATTERN: &str =
    r"(?i-u)\b(?:[a-z]+-[0-9a-f]{17}|[a-z]+-[0-9a-f]{8})\b";

/// Bare 12 digit account numbers.
pub const ACCOUNT_ID_PATTERN: &str = r"(?-u)\b[0-9]{12}\b";

/// The two identifier grammars the locator understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierKind {
    /// A `<type>-<hexsuffix>` resource identifier.
    Resource,
    /// A 12 digit account identifier.
    Account,
}

/// A single identifier found in a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierMatch<'a> {
    /// Which grammar produced the match.
    pub kind: IdentifierKind,
    /// Byte offset of the first character of the token.
    pub start: usize,
    /// Byte offset one past the last character of the token.
    pub end: usize,
    /// The matched token.
    pub text: &'a str,
}

/// Holds the compiled identifier grammars.
///
/// The grammars are static, so a `PatternSet` is built once per run and reused
/// for every line instead of recompiling per call.
#[derive(Debug, Clone)]
pub struct PatternSet {
    resource: Regex,
    account: Regex,
}

impl PatternSet {
    /// Compiles both identifier grammars.
    pub fn new() -> Result<Self> {
        Ok(Self {
            resource: Regex::new(RESOURCE_ID_PATTERN)?,
            account: Regex::new(ACCOUNT_ID_PATTERN)?,
        })
    }

    fn regex(&self, kind: IdentifierKind) -> &Regex {
        match kind {
            IdentifierKind::Resource => &self.resource,
            IdentifierKind::Account => &self.account,
        }
    }

    /// Finds every identifier of the given kind in `line`.
    ///
    /// Matches are returned left to right and never overlap. A line without
    /// identifiers yields an empty vector.
    pub fn find<'a>(&self, kind: IdentifierKind, line: &'a str) -> Vec<IdentifierMatch<'a>> {
        self.regex(kind)
            .find_iter(line)
            .map(|m| IdentifierMatch {
                kind,
                start: m.start(),
                end: m.end(),
                text: m.as_str(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resources(line: &str) -> Vec<String> {
        let set = PatternSet::new().unwrap();
        set.find(IdentifierKind::Resource, line)
            .into_iter()
            .map(|m| m.text.to_string())
            .collect()
    }

    fn accounts(line: &str) -> Vec<String> {
        let set = PatternSet::new().unwrap();
        set.find(IdentifierKind::Account, line)
            .into_iter()
            .map(|m| m.text.to_string())
            .collect()
    }

    #[test]
    fn test_resource_short_and_long_forms() {
        assert_eq!(resources("i-b9b4ffaa"), vec!["i-b9b4ffaa"]);
        assert_eq!(resources("ami-0aeeebd8d2ab47354"), vec!["ami-0aeeebd8d2ab47354"]);
        assert_eq!(
            resources(r#"{"VolumeId": "vol-e97db305", "SubnetId": "subnet-dcdf41c6"}"#),
            vec!["vol-e97db305", "subnet-dcdf41c6"]
        );
    }

    #[test]
    fn test_resource_case_insensitive() {
        assert_eq!(resources("I-B9B4FFAA"), vec!["I-B9B4FFAA"]);
        assert_eq!(resources("Vol-B365E5CB5E48FE90F"), vec!["Vol-B365E5CB5E48FE90F"]);
    }

    #[test]
    fn test_resource_rejects_other_suffix_lengths() {
        assert!(resources("i-b9b4ffa").is_empty()); // 7
        assert!(resources("i-b9b4ffaa1").is_empty()); // 9
        assert!(resources("i-b365e5cb5e48fe90").is_empty()); // 16
        assert!(resources("i-b365e5cb5e48fe90f0").is_empty()); // 18
    }

    #[test]
    fn test_resource_requires_word_boundaries() {
        assert!(resources("i-b9b4ffaa_backup").is_empty());
        assert!(resources("1-b9b4ffaa").is_empty());
        assert!(resources("i-b9b4ffaaz").is_empty());
    }

    #[test]
    fn test_resource_multi_hyphen_prefix() {
        // Only the last type segment is part of the match; `eni-` is left in place.
        let set = PatternSet::new().unwrap();
        let line = "eni-attach-3968b50acb38d32df";
        let found = set.find(IdentifierKind::Resource, line);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text, "attach-3968b50acb38d32df");
        assert_eq!(found[0].start, 4);
        assert_eq!(found[0].end, line.len());
    }

    #[test]
    fn test_resource_no_false_positive_on_long_names() {
        let line = r#"                "Name": "emr-01-dev-eks-janitor-20180510010042153206","#;
        assert!(resources(line).is_empty());
    }

    #[test]
    fn test_account_exactly_twelve_digits() {
        assert_eq!(accounts("owner 123456789012 ok"), vec!["123456789012"]);
        assert!(accounts("12345678901").is_empty());
        assert!(accounts("1234567890123").is_empty());
        assert!(accounts("x123456789012").is_empty());
        assert_eq!(
            accounts("arn:aws:iam::123456789012:role/a,210987654321"),
            vec!["123456789012", "210987654321"]
        );
    }

    #[test]
    fn test_match_offsets_are_ordered() {
        let set = PatternSet::new().unwrap();
        let line = "i-b9b4ffaa vpc-7fe5842f i-b9b4ffaa";
        let found = set.find(IdentifierKind::Resource, line);
        assert_eq!(found.len(), 3);
        assert!(found.windows(2).all(|w| w[0].end <= w[1].start));
        for m in &found {
            assert_eq!(&line[m.start..m.end], m.text);
            assert_eq!(m.kind, IdentifierKind::Resource);
        }
    }
}
