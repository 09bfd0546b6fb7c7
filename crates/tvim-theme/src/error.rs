//! Errors for name lookups.

use thiserror::Error;

/// A theme, font or style name that matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} `{name}` (expected one of: {expected})")]
pub struct UnknownName {
    pub kind: &'static str,
    pub name: String,
    pub expected: String,
}

impl UnknownName {
    pub(crate) fn new(kind: &'static str, name: &str, labels: impl Iterator<Item = &'static str>) -> Self {
        Self {
            kind,
            name: name.to_string(),
            expected: labels.collect::<Vec<_>>().join(", "),
        }
    }
}

/// Menu labels match case-insensitively, ignoring spaces, dashes and
/// apostrophes, so `dark-mode` finds "Dark Mode" and `mcdonalds` finds
/// "McDonald's".
pub(crate) fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_' | '\''))
        .flat_map(char::to_lowercase)
        .collect()
}
