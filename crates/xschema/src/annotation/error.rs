//! Annotation parse errors

use thiserror::Error;

use crate::foundation::ScalarKind;

/// A malformed annotation token.
///
/// Only produced in [`ParseMode::Strict`](super::ParseMode::Strict); lenient
/// parsing degrades instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnnotationError {
    /// The rule name is not part of the domain's catalog.
    #[error("unknown {domain} rule `{name}`")]
    UnknownRule { name: String, domain: ScalarKind },

    /// The rule needs `Name=Arg` but no argument was given.
    #[error("rule `{rule}` requires an argument")]
    MissingArgument { rule: String },

    /// The argument is not a valid integer.
    #[error("rule `{rule}` expects an integer, got `{arg}`")]
    InvalidInteger { rule: String, arg: String },

    /// The argument is not a JSON array of the domain's scalar.
    #[error("rule `{rule}` expects a JSON array, got `{arg}`: {reason}")]
    InvalidList {
        rule: String,
        arg: String,
        reason: String,
    },

    /// The argument does not compile as a regular expression.
    #[error("rule `{rule}` has an invalid pattern `{arg}`: {reason}")]
    InvalidPattern {
        rule: String,
        arg: String,
        reason: String,
    },

    /// A token of a record field's annotation failed.
    #[error("field `{field}`: {source}")]
    Field {
        field: String,
        #[source]
        source: Box<AnnotationError>,
    },
}

impl AnnotationError {
    /// Attaches the record field the annotation belongs to.
    #[must_use]
    pub fn in_field(self, field: impl Into<String>) -> Self {
        Self::Field {
            field: field.into(),
            source: Box::new(self),
        }
    }
}
