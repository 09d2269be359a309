use crate::tree::OracleError;
use std::fmt;

/// Why no selector could be produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NotFoundCause {
    /// Every enumerated candidate matched more than one node.
    Exhausted,
    /// The budget ran out and the ordinal chain still matched several nodes.
    FallbackNotUnique { selector: String },
    /// The budget ran out and the ordinal chain could not be derived.
    FallbackUnavailable,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FindError {
    /// The target handle is not an element.
    InvalidInput,
    NoUniqueSelectorFound { cause: NotFoundCause },
    /// The oracle matched nothing for a selector derived from the live tree.
    /// Candidate generation and matcher semantics disagree; this is a bug.
    OracleInconsistency { selector: String },
    Oracle(OracleError),
}

impl fmt::Display for FindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FindError::InvalidInput => {
                f.write_str("can't generate a selector for a non-element node")
            }
            FindError::NoUniqueSelectorFound { cause } => match cause {
                NotFoundCause::Exhausted => f.write_str("no unique selector found"),
                NotFoundCause::FallbackNotUnique { selector } => write!(
                    f,
                    "search budget exceeded and fallback selector `{selector}` is not unique"
                ),
                NotFoundCause::FallbackUnavailable => f.write_str(
                    "search budget exceeded and no fallback selector could be derived",
                ),
            },
            FindError::OracleInconsistency { selector } => {
                write!(f, "can't select any node with selector `{selector}`")
            }
            FindError::Oracle(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for FindError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FindError::Oracle(err) => Some(err),
            _ => None,
        }
    }
}

impl From<OracleError> for FindError {
    fn from(err: OracleError) -> Self {
        FindError::Oracle(err)
    }
}
