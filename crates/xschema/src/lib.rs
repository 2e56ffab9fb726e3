//! # xschema
//!
//! Declarative validation of dynamic values: string and number rule sets,
//! keyed schemas over mappings and records, and a small annotation language
//! for deriving schemas from record types.
//!
//! ## Quick Start
//!
//! ```
//! use xschema::prelude::*;
//! use serde_json::json;
//!
//! let name = StringRules::new().required().min(3).message(StringRule::Min, "too short");
//! assert!(name.validate(&json!("Ann")).is_ok());
//! assert_eq!(name.validate(&json!("Al")).unwrap_err().messages(), vec!["too short"]);
//!
//! let schema = Schema::new()
//!     .add_string("name", name)
//!     .add_number("age", NumberRules::new().gte(18));
//! assert!(schema.validate_map(json!({"name": "Ann", "age": 30}).as_object().unwrap()).is_ok());
//! ```
//!
//! ## Rule Catalogs
//!
//! - **String**: `Required`, `Alphanum`, `StartsWith`, `EndsWith`, `Lower`,
//!   `Upper`, `Length`, `Min`, `Max`, `Pattern`, `Email`, `URL`, `UUID`, `OneOf`
//! - **Number**: `Required`, `Gt`, `Gte`, `Lt`, `Lte`, `MultipleOf`, `OneOf`
//!
//! Every failing rule of a value is reported; a value of the wrong type
//! yields a single `"invalid type"` error.
//!
//! ## Annotations
//!
//! With the `derive` feature (on by default), `#[derive(Annotated)]` exposes
//! `#[annotate(x = "Required,Min=3")]` field annotations to
//! [`Schema::from_annotations`] and [`validate_annotated`].

// ValidationErrors and SchemaErrors are returned by value on every check.
#![allow(clippy::result_large_err)]

pub mod annotation;
pub mod foundation;
pub mod prelude;
pub mod record;
pub mod rules;
pub mod schema;

pub use annotation::{AnnotationConfig, AnnotationError, ParseMode};
pub use foundation::{
    ErrorKind, Scalar, ScalarKind, SchemaErrors, Validatable, ValidationError, ValidationErrors,
};
pub use record::{Annotated, FieldDescriptor, RecordError, validate_annotated, validate_annotated_with};
pub use rules::{NumberRule, NumberRules, Rule, RuleSet, StringRule, StringRules};
pub use schema::Schema;

/// Derives [`Annotated`] from `#[annotate(tag = "...")]` field attributes.
#[cfg(feature = "derive")]
pub use xschema_macros::Annotated;
