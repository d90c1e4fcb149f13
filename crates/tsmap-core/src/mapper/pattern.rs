//! Compiled `paths` patterns.
//!
//! A pattern key holds at most one `*`. Keys without a wildcard match only
//! themselves; keys with one match any specifier that starts with the text
//! before the `*` and ends with the text after it.

use crate::error::{Error, Result};
use std::fmt;

/// A parsed `paths` key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    /// Matches the specifier exactly.
    Static(String),
    /// Matches `prefix<capture>suffix`; the capture may be empty.
    Wildcard { prefix: String, suffix: String },
}

/// How specific a matching pattern is. Higher wins.
///
/// Every `Static` pattern outranks every `Wildcard`; wildcards rank by the
/// length of their literal prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Specificity {
    Wildcard(usize),
    Static,
}

impl Pattern {
    /// Parse a pattern key, rejecting keys with more than one `*`.
    pub fn parse(pattern: &str) -> Result<Self> {
        let Some(star) = pattern.find('*') else {
            return Ok(Self::Static(pattern.to_string()));
        };

        let prefix = &pattern[..star];
        let suffix = &pattern[star + 1..];

        if suffix.contains('*') {
            return Err(Error::TwoWildcards {
                pattern: pattern.to_string(),
            });
        }

        Ok(Self::Wildcard {
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
        })
    }

    /// Match a specifier, returning the captured text.
    ///
    /// For a static pattern the capture is the whole specifier.
    #[must_use]
    pub fn matches<'s>(&self, specifier: &'s str) -> Option<&'s str> {
        match self {
            Self::Static(value) => (value == specifier).then_some(specifier),
            Self::Wildcard { prefix, suffix } => {
                if specifier.len() < prefix.len() + suffix.len() {
                    return None;
                }
                specifier
                    .strip_prefix(prefix.as_str())?
                    .strip_suffix(suffix.as_str())
            }
        }
    }

    #[must_use]
    pub fn specificity(&self) -> Specificity {
        match self {
            Self::Static(_) => Specificity::Static,
            Self::Wildcard { prefix, .. } => Specificity::Wildcard(prefix.len()),
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(value) => write!(f, "{value}"),
            Self::Wildcard { prefix, suffix } => write!(f, "{prefix}*{suffix}"),
        }
    }
}

/// One compiled `paths` entry: a pattern and its ordered output templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingRule {
    pub pattern: Pattern,
    pub outputs: Vec<String>,
}

impl MappingRule {
    pub fn compile(pattern: &str, outputs: Vec<String>) -> Result<Self> {
        Ok(Self {
            pattern: Pattern::parse(pattern)?,
            outputs,
        })
    }

    /// Substitute `capture` into each output template, in declared order.
    ///
    /// Only the first `*` of a template is replaced; templates without one
    /// are returned unchanged.
    #[must_use]
    pub fn substitute(&self, capture: &str) -> Vec<String> {
        self.outputs
            .iter()
            .map(|template| template.replacen('*', capture, 1))
            .collect()
    }
}
