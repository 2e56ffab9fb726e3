//! Annotated records
//!
//! A record type describes its fields through [`Annotated`], usually via
//! `#[derive(Annotated)]`. Each field carries one or more tagged annotation
//! strings; the configured tag selects which one becomes the field's rules.
#![cfg_attr(
    feature = "derive",
    doc = r#"
```
use xschema::prelude::*;
use serde::Serialize;

#[derive(Serialize, Annotated)]
struct User {
    #[annotate(x = "Required,Min=3,Pattern=^[A-Z]{1}[a-z]+$")]
    name: String,
    #[annotate(x = "Required,Gte=18")]
    age: i64,
    nickname: String,
}

let ok = User { name: "John".into(), age: 21, nickname: String::new() };
assert!(validate_annotated(&ok).is_ok());

let bad = User { name: "doe".into(), age: 21, nickname: String::new() };
assert!(validate_annotated(&bad).is_err());
```
"#
)]

use serde::Serialize;
use thiserror::Error;

use crate::annotation::{AnnotationConfig, AnnotationError, parse_rules};
use crate::foundation::{ScalarKind, SchemaErrors};
use crate::schema::Schema;

/// Static description of one record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field name as it appears in the serialized record
    pub name: &'static str,
    /// Rule domain
    pub kind: ScalarKind,
    /// `(tag, annotation)` pairs
    pub tags: &'static [(&'static str, &'static str)],
}

impl FieldDescriptor {
    #[must_use]
    pub const fn new(
        name: &'static str,
        kind: ScalarKind,
        tags: &'static [(&'static str, &'static str)],
    ) -> Self {
        Self { name, kind, tags }
    }

    /// Annotation stored under `tag`, if any.
    #[must_use]
    pub fn annotation(&self, tag: &str) -> Option<&'static str> {
        self.tags
            .iter()
            .find(|(key, _)| *key == tag)
            .map(|(_, text)| *text)
    }
}

/// Record types that expose field annotations.
pub trait Annotated {
    /// Every field of the record, in declaration order.
    fn fields() -> Vec<FieldDescriptor>;
}

/// Failure of a record validation.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("record could not be serialized: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("record serialized to {found}, expected an object")]
    NotAnObject { found: &'static str },

    #[error("invalid annotation: {0}")]
    Annotation(#[from] AnnotationError),

    #[error("{0}")]
    Invalid(#[from] SchemaErrors),
}

impl RecordError {
    /// Rule failures, when the record was validated at all.
    #[must_use]
    pub fn schema_errors(&self) -> Option<&SchemaErrors> {
        match self {
            Self::Invalid(errors) => Some(errors),
            _ => None,
        }
    }
}

impl Schema {
    /// Builds a schema from the fields of `R` annotated under `config.tag`.
    ///
    /// Fields without that tag are left out.
    ///
    /// # Errors
    ///
    /// In strict mode, the first malformed annotation, wrapped with its
    /// field name.
    pub fn from_annotations<R: Annotated>(config: &AnnotationConfig) -> Result<Self, AnnotationError> {
        let mut schema = Self::new();

        for field in R::fields() {
            let Some(annotation) = field.annotation(&config.tag) else {
                continue;
            };
            let rules = parse_rules(field.kind, annotation, config.mode)
                .map_err(|e| e.in_field(field.name))?;
            tracing::debug!(
                field = field.name,
                kind = %field.kind,
                rules = %rules.describe(),
                "annotated field"
            );
            schema = schema.add_shared(field.name, rules);
        }

        tracing::debug!(
            record = std::any::type_name::<R>(),
            tag = %config.tag,
            mode = %config.mode,
            fields = schema.len(),
            "built schema from annotations"
        );
        Ok(schema)
    }
}

/// Validates an annotated record with the default configuration.
///
/// # Errors
///
/// See [`validate_annotated_with`].
pub fn validate_annotated<R>(record: &R) -> Result<(), RecordError>
where
    R: Annotated + Serialize,
{
    validate_annotated_with(record, &AnnotationConfig::default())
}

/// Validates an annotated record with an explicit configuration.
///
/// Unknown keys in the serialized record are skipped.
///
/// # Errors
///
/// [`RecordError::Annotation`] when a strict parse fails,
/// [`RecordError::Invalid`] when any field breaks its rules.
pub fn validate_annotated_with<R>(record: &R, config: &AnnotationConfig) -> Result<(), RecordError>
where
    R: Annotated + Serialize,
{
    Schema::from_annotations::<R>(config)?.validate_record(record)
}
