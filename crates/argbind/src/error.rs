//! Error conditions raised by a binding call.

use crate::results::Results;
use crate::value::ValueError;

/// A fatal binding condition.
///
/// `InvalidTag` is a configuration error detected before any argument is
/// read. Every other variant describes a problem with the supplied arguments
/// and is raised only after the matching entry was recorded in [`Results`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("argument '{argument}': unexpected argument ({source})")]
    UnexpectedArgument { argument: String, source: ValueError },

    #[error("argument '{argument}': missing argument value")]
    MissingArgumentValue { argument: String },

    /// Reserved. Ignored tokens are reported through [`Results::ignored`] and
    /// never abort a call.
    #[error("argument '{argument}': ignored argument")]
    IgnoredArgument { argument: String },

    #[error("mandatory argument/s: '{}' not found", .names.join(","))]
    MandatoryArgument { names: Vec<String> },

    #[error("argument '{argument}': duplicated argument")]
    DuplicatedArgument { argument: String },

    #[error("field '{field}': invalid tag (got '{tag}', {reason})")]
    InvalidTag {
        field: String,
        tag: String,
        reason: String,
    },
}

/// Fieldless mirror of [`Error`] for branching on the condition alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnexpectedArgument,
    MissingArgumentValue,
    IgnoredArgument,
    MandatoryArgument,
    DuplicatedArgument,
    InvalidTag,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnexpectedArgument { .. } => ErrorKind::UnexpectedArgument,
            Self::MissingArgumentValue { .. } => ErrorKind::MissingArgumentValue,
            Self::IgnoredArgument { .. } => ErrorKind::IgnoredArgument,
            Self::MandatoryArgument { .. } => ErrorKind::MandatoryArgument,
            Self::DuplicatedArgument { .. } => ErrorKind::DuplicatedArgument,
            Self::InvalidTag { .. } => ErrorKind::InvalidTag,
        }
    }

    /// Whether this is a configuration error rather than an input error.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::InvalidTag { .. })
    }
}

/// A failed binding call.
///
/// Carries the fatal condition together with the diagnostics gathered up to
/// the point of failure, so callers can still report warnings and partial
/// classifications.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{error}")]
pub struct Failure {
    error: Error,
    results: Results,
}

impl Failure {
    pub(crate) fn new(error: Error, results: Results) -> Self {
        Self { error, results }
    }

    pub fn error(&self) -> &Error {
        &self.error
    }

    pub fn kind(&self) -> ErrorKind {
        self.error.kind()
    }

    pub fn results(&self) -> &Results {
        &self.results
    }

    pub fn into_parts(self) -> (Error, Results) {
        (self.error, self.results)
    }
}
