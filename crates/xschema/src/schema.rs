//! Keyed schemas
//!
//! A [`Schema`] maps field names to type-erased validators and checks whole
//! mappings or serializable records against them. Lenient entry points skip
//! keys the schema does not know; the `strict_` variants reject them.
//!
//! ```
//! use xschema::prelude::*;
//! use serde_json::json;
//!
//! let schema = Schema::new()
//!     .add_string("name", StringRules::new().required().min(3))
//!     .add_number("age", NumberRules::new().required().gte(18));
//!
//! let input = json!({"name": "Jo", "age": 21, "nickname": "j"});
//! let errors = schema.validate_map(input.as_object().unwrap()).unwrap_err();
//! assert_eq!(errors.labels().collect::<Vec<_>>(), vec!["name(Jo)"]);
//!
//! assert!(schema.strict_validate_map(input.as_object().unwrap()).is_err());
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::foundation::{SchemaErrors, Validatable, ValidationError, ValidationErrors};
use crate::record::RecordError;
use crate::rules::{NumberRules, StringRules};

/// Field name to validator mapping.
///
/// Cloning copies the key table and shares the validators, which are
/// immutable once registered.
#[derive(Clone, Default)]
pub struct Schema {
    fields: BTreeMap<String, Arc<dyn Validatable>>,
}

impl Schema {
    /// Creates an empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Union of two schemas. On a shared key the validator of `second` wins.
    #[must_use]
    pub fn merge(first: &Self, second: &Self) -> Self {
        first.clone().merge_from(second)
    }

    /// Adds every field of `other`, replacing existing keys.
    #[must_use = "builder methods must be chained or built"]
    pub fn merge_from(mut self, other: &Self) -> Self {
        self.fields.extend(
            other
                .fields
                .iter()
                .map(|(key, validator)| (key.clone(), Arc::clone(validator))),
        );
        self
    }

    /// Registers string rules under `key`.
    #[must_use = "builder methods must be chained or built"]
    pub fn add_string(self, key: impl Into<String>, rules: StringRules) -> Self {
        self.add(key, rules)
    }

    /// Registers number rules under `key`.
    #[must_use = "builder methods must be chained or built"]
    pub fn add_number(self, key: impl Into<String>, rules: NumberRules) -> Self {
        self.add(key, rules)
    }

    /// Registers any validator under `key`, replacing a previous one.
    #[must_use = "builder methods must be chained or built"]
    pub fn add(self, key: impl Into<String>, validator: impl Validatable + 'static) -> Self {
        self.add_shared(key, Arc::new(validator))
    }

    /// Registers an already shared validator under `key`.
    #[must_use = "builder methods must be chained or built"]
    pub fn add_shared(mut self, key: impl Into<String>, validator: Arc<dyn Validatable>) -> Self {
        self.fields.insert(key.into(), validator);
        self
    }

    // ------------------------------------------------------------------------
    // Single keys
    // ------------------------------------------------------------------------

    /// Validates `value` against the rules under `key`.
    ///
    /// Unknown keys pass.
    ///
    /// # Errors
    ///
    /// Every rule failure of the field.
    pub fn validate_key(&self, key: &str, value: &Value) -> Result<(), ValidationErrors> {
        match self.fields.get(key) {
            Some(validator) => validator.validate(value),
            None => Ok(()),
        }
    }

    /// Like [`validate_key`](Self::validate_key), but unknown keys fail with
    /// an `"invalid key"` error.
    ///
    /// # Errors
    ///
    /// Every rule failure of the field, or a single unknown-key error.
    pub fn strict_validate_key(&self, key: &str, value: &Value) -> Result<(), ValidationErrors> {
        match self.fields.get(key) {
            Some(validator) => validator.validate(value),
            None => Err(ValidationErrors::single(ValidationError::unknown_key(
                key.to_string(),
            ))),
        }
    }

    // ------------------------------------------------------------------------
    // Mappings
    // ------------------------------------------------------------------------

    /// Validates every entry of a mapping, skipping unknown keys.
    ///
    /// Schema fields absent from the mapping are not checked.
    ///
    /// # Errors
    ///
    /// Failing entries keyed by their `field(value)` label.
    pub fn validate_map<'v, I, K>(&self, entries: I) -> Result<(), SchemaErrors>
    where
        I: IntoIterator<Item = (K, &'v Value)>,
        K: AsRef<str>,
    {
        self.validate_entries(entries, Self::validate_key)
    }

    /// Validates every entry of a mapping, rejecting unknown keys.
    ///
    /// # Errors
    ///
    /// Failing entries keyed by their `field(value)` label.
    pub fn strict_validate_map<'v, I, K>(&self, entries: I) -> Result<(), SchemaErrors>
    where
        I: IntoIterator<Item = (K, &'v Value)>,
        K: AsRef<str>,
    {
        self.validate_entries(entries, Self::strict_validate_key)
    }

    fn validate_entries<'v, I, K, F>(&self, entries: I, check: F) -> Result<(), SchemaErrors>
    where
        I: IntoIterator<Item = (K, &'v Value)>,
        K: AsRef<str>,
        F: Fn(&Self, &str, &Value) -> Result<(), ValidationErrors>,
    {
        let mut failures = SchemaErrors::new();

        for (key, value) in entries {
            let key = key.as_ref();
            if let Err(errors) = check(self, key, value) {
                failures.insert(label(key, value), errors);
            }
        }

        if !failures.is_empty() {
            tracing::debug!(failed = failures.len(), "mapping failed validation");
        }
        failures.into_result()
    }

    // ------------------------------------------------------------------------
    // Records
    // ------------------------------------------------------------------------

    /// Serializes `record` and validates its fields, skipping unknown keys.
    ///
    /// # Errors
    ///
    /// [`RecordError::Invalid`] for rule failures; the other variants when
    /// the record does not serialize to an object.
    pub fn validate_record<R>(&self, record: &R) -> Result<(), RecordError>
    where
        R: Serialize + ?Sized,
    {
        let object = to_object(record)?;
        Ok(self.validate_map(&object)?)
    }

    /// Serializes `record` and validates its fields, rejecting unknown keys.
    ///
    /// # Errors
    ///
    /// [`RecordError::Invalid`] for rule failures; the other variants when
    /// the record does not serialize to an object.
    pub fn strict_validate_record<R>(&self, record: &R) -> Result<(), RecordError>
    where
        R: Serialize + ?Sized,
    {
        let object = to_object(record)?;
        Ok(self.strict_validate_map(&object)?)
    }

    // ------------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------------

    /// Registered keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Returns the validator under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Arc<dyn Validatable>> {
        self.fields.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Diagnostic label, e.g. `Schema{age: NumberRules(Gte), name: StringRules(Required)}`.
    #[must_use]
    pub fn describe(&self) -> String {
        let fields = self
            .fields
            .iter()
            .map(|(key, validator)| format!("{key}: {}", validator.describe()))
            .collect::<Vec<_>>()
            .join(", ");
        format!("Schema{{{fields}}}")
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.fields.iter()).finish()
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// `field(value)` label; strings render without quotes.
fn label(key: &str, value: &Value) -> String {
    match value {
        Value::String(s) => format!("{key}({s})"),
        other => format!("{key}({other})"),
    }
}

fn to_object<R>(record: &R) -> Result<serde_json::Map<String, Value>, RecordError>
where
    R: Serialize + ?Sized,
{
    match serde_json::to_value(record)? {
        Value::Object(object) => Ok(object),
        other => Err(RecordError::NotAnObject {
            found: crate::foundation::value_type_name(&other),
        }),
    }
}

// ============================================================================
// TESTS
// ============================================================================
