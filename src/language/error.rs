use std::{fmt, path::Path};

use crate::config::ConfigurationError;
use crate::parsing::ParseError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingError<'i> {
    pub problem: String,
    pub details: String,
    pub filename: &'i Path,
}

impl<'i> fmt::Display for LoadingError<'i> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.problem, self.details)
    }
}

/// Everything that can make a formatting pass fail. A failed pass produces
/// no output at all; the caller's text is never partially rewritten.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum FormattingError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// The plan and the tree disagree. This is a defect in the formatter, not
    /// something a user can fix by changing their input.
    #[error("internal error at offset {offset}: {problem}")]
    Internal { offset: usize, problem: &'static str },
}

impl FormattingError {
    /// Byte offset into the source the error refers to, if any.
    pub fn offset(&self) -> Option<usize> {
        match self {
            FormattingError::Parse(error) => Some(error.offset()),
            FormattingError::Configuration(_) => None,
            FormattingError::Internal { offset, .. } => Some(*offset),
        }
    }
}
