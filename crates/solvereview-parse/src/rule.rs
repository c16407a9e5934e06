//! Named, line-oriented extraction rules.

use std::path::Path;

use solvereview_core::numeric::parse_grouped_u64;
use solvereview_core::{Result, ReviewError};
use thiserror::Error;
use tracing::debug;

/// One line of a report with its 1-based line number and whitespace tokens.
#[derive(Debug, Clone)]
pub struct Line<'a> {
    number: usize,
    text: &'a str,
    tokens: Vec<&'a str>,
}

impl<'a> Line<'a> {
    pub fn new(number: usize, text: &'a str) -> Self {
        Self {
            number,
            text,
            tokens: text.split_whitespace().collect(),
        }
    }

    pub fn number(&self) -> usize {
        self.number
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn tokens(&self) -> &[&'a str] {
        &self.tokens
    }

    pub fn is_blank(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns the token at a 0-based position.
    pub fn token(&self, index: usize) -> std::result::Result<&'a str, FieldError> {
        self.tokens
            .get(index)
            .copied()
            .ok_or_else(|| FieldError::MissingToken {
                position: format!("{}", index + 1),
                found: self.tokens.len(),
            })
    }

    /// Returns the n-th token counted from the end; `1` is the last token.
    pub fn token_from_end(&self, n: usize) -> std::result::Result<&'a str, FieldError> {
        self.tokens
            .len()
            .checked_sub(n)
            .filter(|_| n > 0)
            .map(|index| self.tokens[index])
            .ok_or_else(|| FieldError::MissingToken {
                position: format!("{n} from the end"),
                found: self.tokens.len(),
            })
    }
}

/// Why a matched line could not be turned into a value.
#[derive(Debug, Error)]
pub enum FieldError {
    #[error("expected token {position}, line has {found} tokens")]
    MissingToken { position: String, found: usize },

    #[error("`{token}` is not a valid {expected}")]
    Invalid {
        token: String,
        expected: &'static str,
    },

    #[error("{0}")]
    Layout(String),

    /// A failure that is not a formatting problem, e.g. an unknown status code.
    #[error(transparent)]
    Review(#[from] ReviewError),
}

pub(crate) fn parse_f64(token: &str) -> std::result::Result<f64, FieldError> {
    token.parse().map_err(|_| FieldError::Invalid {
        token: token.to_string(),
        expected: "number",
    })
}

pub(crate) fn parse_count(token: &str) -> std::result::Result<u64, FieldError> {
    parse_grouped_u64(token).ok_or_else(|| FieldError::Invalid {
        token: token.to_string(),
        expected: "count",
    })
}

/// A rule that fires on lines containing `tag` and stores what it extracts
/// into the partial record `B`.
pub struct ExtractionRule<B> {
    pub name: &'static str,
    pub tag: &'static str,
    pub apply: fn(&mut B, &Line<'_>) -> std::result::Result<(), FieldError>,
}

impl<B> ExtractionRule<B> {
    pub fn matches(&self, line: &Line<'_>) -> bool {
        line.text.contains(self.tag)
    }
}

/// A rule that matched a line but failed to extract from it.
#[derive(Debug)]
pub struct RuleFailure {
    pub rule: &'static str,
    pub error: FieldError,
}

impl RuleFailure {
    /// Converts into a [`ReviewError`], using `malformed` for formatting
    /// problems and passing other failures through unchanged.
    pub fn into_review(self, malformed: impl FnOnce(String) -> ReviewError) -> ReviewError {
        match self.error {
            FieldError::Review(err) => err,
            other => malformed(format!("{}: {}", self.rule, other)),
        }
    }
}

/// Applies the first rule whose tag occurs on `line`.
///
/// Returns the name of the rule that fired, if any.
pub(crate) fn apply_first<B>(
    rules: &[ExtractionRule<B>],
    builder: &mut B,
    line: &Line<'_>,
) -> std::result::Result<Option<&'static str>, RuleFailure> {
    let Some(rule) = rules.iter().find(|rule| rule.matches(line)) else {
        return Ok(None);
    };

    debug!(rule = rule.name, line = line.number(), "tag matched");
    (rule.apply)(builder, line).map_err(|error| RuleFailure {
        rule: rule.name,
        error,
    })?;
    Ok(Some(rule.name))
}

pub(crate) fn read_report(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|err| ReviewError::io(path, err))
}
