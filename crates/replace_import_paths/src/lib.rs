// crates/replace_import_paths/src/lib.rs

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while parsing a `-replace` configuration string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReplacerError {
    #[error("invalid replacement {pair:?}: expected exactly one '=' (old=new)")]
    MissingSeparator { pair: String },
    #[error("invalid replacement {pair:?}: the old path must not be empty")]
    EmptyOld { pair: String },
}

/// An ordered set of literal `old => new` substitutions applied to import paths.
///
/// Matching happens in a single left-to-right pass. At each position the first
/// rule (in configuration order) whose `old` text matches is replaced and the
/// scan resumes after the matched text; otherwise the character is copied.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Replacer {
    rules: Vec<(String, String)>,
}

impl Replacer {
    /// A replacer that leaves every path unchanged.
    pub fn identity() -> Self {
        Self::default()
    }

    /// Parses a comma-separated list of `canonical=actual` pairs.
    ///
    /// The empty string yields the identity replacer.
    pub fn parse(config: &str) -> Result<Self, ReplacerError> {
        if config.is_empty() {
            return Ok(Self::identity());
        }

        let mut rules = Vec::new();
        for pair in config.split(',') {
            let mut halves = pair.split('=');
            let (old, new) = match (halves.next(), halves.next(), halves.next()) {
                (Some(old), Some(new), None) => (old, new),
                _ => {
                    return Err(ReplacerError::MissingSeparator {
                        pair: pair.to_string(),
                    })
                }
            };
            if old.is_empty() {
                return Err(ReplacerError::EmptyOld {
                    pair: pair.to_string(),
                });
            }
            rules.push((old.to_string(), new.to_string()));
        }
        Ok(Self { rules })
    }

    pub fn is_identity(&self) -> bool {
        self.rules.is_empty()
    }

    /// Applies every rule to `input` in a single pass.
    pub fn replace(&self, input: &str) -> String {
        if self.rules.is_empty() {
            return input.to_string();
        }

        let mut output = String::with_capacity(input.len());
        let mut rest = input;
        while !rest.is_empty() {
            let matched = self
                .rules
                .iter()
                .find(|(old, _)| rest.starts_with(old.as_str()));
            match matched {
                Some((old, new)) => {
                    output.push_str(new);
                    rest = &rest[old.len()..];
                }
                None => {
                    // Advance one whole character so slicing stays on a boundary.
                    let mut chars = rest.chars();
                    if let Some(c) = chars.next() {
                        output.push(c);
                    }
                    rest = chars.as_str();
                }
            }
        }
        output
    }
}

impl FromStr for Replacer {
    type Err = ReplacerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Replacer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs: Vec<String> = self
            .rules
            .iter()
            .map(|(old, new)| format!("{}={}", old, new))
            .collect();
        write!(f, "{}", pairs.join(","))
    }
}
