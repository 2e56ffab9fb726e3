//! Prelude module for convenient imports.
//!
//! ```
//! use xschema::prelude::*;
//!
//! let schema = Schema::new().add_number("age", NumberRules::new().gte(18));
//! assert!(schema.contains_key("age"));
//! ```

// ============================================================================
// FOUNDATION
// ============================================================================

pub use crate::foundation::{
    ErrorKind, ScalarKind, SchemaErrors, Validatable, ValidationError, ValidationErrors,
};

// ============================================================================
// RULES
// ============================================================================

pub use crate::rules::{NumberRule, NumberRules, RuleSet, StringRule, StringRules};

// ============================================================================
// SCHEMA AND RECORDS
// ============================================================================

pub use crate::annotation::{AnnotationConfig, ParseMode};
pub use crate::record::{
    Annotated, FieldDescriptor, RecordError, validate_annotated, validate_annotated_with,
};
pub use crate::schema::Schema;

#[cfg(feature = "derive")]
pub use xschema_macros::Annotated;
