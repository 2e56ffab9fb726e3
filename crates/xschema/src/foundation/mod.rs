//! Core validation types and traits
//!
//! - **Traits**: [`Scalar`], [`Validatable`]
//! - **Errors**: [`ValidationError`], [`ValidationErrors`], [`SchemaErrors`]
//!
//! Rule sets are generic over a [`Scalar`] domain. A schema only needs the
//! type-erased [`Validatable`] capability, so text and number rule sets can
//! be mixed under one schema:
//!
//! ```
//! use std::sync::Arc;
//! use xschema::foundation::Validatable;
//! use xschema::{NumberRules, StringRules};
//!
//! let fields: Vec<Arc<dyn Validatable>> = vec![
//!     Arc::new(StringRules::new().required()),
//!     Arc::new(NumberRules::new().gte(18)),
//! ];
//! assert_eq!(fields.len(), 2);
//! ```

pub mod error;
pub mod traits;

pub use error::{ErrorKind, SchemaErrors, ValidationError, ValidationErrors};
pub use traits::{Scalar, ScalarKind, Validatable, value_type_name};
