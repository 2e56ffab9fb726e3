//! Error types for validation failures
//!
//! Validation never panics or bails across the API boundary: every failure
//! is returned as data. A single value produces [`ValidationErrors`], a whole
//! mapping or record produces [`SchemaErrors`] keyed by a `field(value)` label.
//!
//! All string fields use `Cow<'static, str>` so the default catalog messages
//! stay allocation-free.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use smallvec::SmallVec;

// ============================================================================
// ERROR KIND
// ============================================================================

/// Category of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The value's runtime type does not belong to the rule set's domain.
    ///
    /// Fatal to that single validation call: no named rule runs.
    TypeMismatch,
    /// A named rule's predicate returned `false`.
    RuleViolation,
    /// Strict mode only: the key has no matching schema field.
    UnknownKey,
}

impl ErrorKind {
    /// Returns the snake_case name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TypeMismatch => "type_mismatch",
            Self::RuleViolation => "rule_violation",
            Self::UnknownKey => "unknown_key",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// A single validation failure.
///
/// `code` is the identifier of the rule that failed (`"Min"`, `"Pattern"`, ...)
/// and `message` is the human-readable text. `Display` renders the message
/// only, so custom messages round-trip verbatim.
///
/// # Examples
///
/// ```
/// use xschema::foundation::{ErrorKind, ValidationError};
///
/// let error = ValidationError::new("Min", "must be of length greater than: 3")
///     .with_param("min", "3");
///
/// assert_eq!(error.kind, ErrorKind::RuleViolation);
/// assert_eq!(error.to_string(), "must be of length greater than: 3");
/// assert_eq!(error.param("min"), Some("3"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Failure category.
    pub kind: ErrorKind,

    /// Identifier of the failing rule, or the kind name for non-rule errors.
    pub code: Cow<'static, str>,

    /// Human-readable error message.
    pub message: Cow<'static, str>,

    /// Schema field the error belongs to, when known.
    pub field: Option<Cow<'static, str>>,

    /// Rule parameters (bounds, patterns, ...), typically 0-2 entries.
    pub params: SmallVec<[(Cow<'static, str>, Cow<'static, str>); 2]>,
}

impl ValidationError {
    /// Creates a rule violation with a code and message.
    pub fn new(code: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind: ErrorKind::RuleViolation,
            code: code.into(),
            message: message.into(),
            field: None,
            params: SmallVec::new(),
        }
    }

    /// Creates the `"invalid type"` error raised before any rule runs.
    pub fn type_mismatch(
        expected: impl Into<Cow<'static, str>>,
        actual: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            kind: ErrorKind::TypeMismatch,
            code: Cow::Borrowed(ErrorKind::TypeMismatch.as_str()),
            message: Cow::Borrowed("invalid type"),
            field: None,
            params: SmallVec::new(),
        }
        .with_param("expected", expected)
        .with_param("actual", actual)
    }

    /// Creates the `"invalid key"` error used by strict validation.
    pub fn unknown_key(key: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind: ErrorKind::UnknownKey,
            code: Cow::Borrowed(ErrorKind::UnknownKey.as_str()),
            message: Cow::Borrowed("invalid key"),
            field: None,
            params: SmallVec::new(),
        }
        .with_field(key)
    }

    /// Sets the field this error belongs to.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_field(mut self, field: impl Into<Cow<'static, str>>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Adds a parameter to the error.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Replaces the message, keeping code, kind and params.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }

    /// Looks up a parameter value by key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// ERROR COLLECTION
// ============================================================================

/// All failures produced by one validation call.
///
/// Never empty when returned inside an `Err`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Creates a new empty error collection.
    #[must_use]
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Creates a collection holding exactly one error.
    #[must_use]
    pub fn single(error: ValidationError) -> Self {
        Self {
            errors: vec![error],
        }
    }

    /// Adds an error to the collection.
    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Returns true if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns the number of errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns all errors.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Iterates over the errors.
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    /// Returns the messages, sorted.
    ///
    /// Rule evaluation order is not part of the contract, so comparisons
    /// should go through this sorted view.
    #[must_use]
    pub fn messages(&self) -> Vec<&str> {
        let mut messages: Vec<&str> = self.errors.iter().map(|e| e.message.as_ref()).collect();
        messages.sort_unstable();
        messages
    }

    /// Returns true if any error carries the given message.
    #[must_use]
    pub fn contains_message(&self, message: &str) -> bool {
        self.errors.iter().any(|e| e.message == message)
    }

    /// Converts to a Result.
    #[must_use = "result must be used"]
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl Extend<ValidationError> for ValidationErrors {
    fn extend<I: IntoIterator<Item = ValidationError>>(&mut self, iter: I) {
        self.errors.extend(iter);
    }
}

impl FromIterator<ValidationError> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = ValidationError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} error(s):", self.errors.len())?;
        for (i, error) in self.errors.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

// ============================================================================
// SCHEMA ERRORS
// ============================================================================

/// Per-entry failures of a mapping or record validation.
///
/// Keyed by a `field(value)` label; only failing entries appear.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaErrors {
    entries: BTreeMap<String, ValidationErrors>,
}

impl SchemaErrors {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the failures of one entry. A later insert under the same
    /// label replaces the earlier one.
    pub fn insert(&mut self, label: impl Into<String>, errors: ValidationErrors) {
        self.entries.insert(label.into(), errors);
    }

    /// Returns the failures recorded under `label`.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&ValidationErrors> {
        self.entries.get(label)
    }

    /// Returns the number of failing entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no entry failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the failing labels in order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterates over `(label, errors)` pairs in label order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ValidationErrors)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Converts to a Result.
    #[must_use = "result must be used"]
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl IntoIterator for SchemaErrors {
    type Item = (String, ValidationErrors);
    type IntoIter = std::collections::btree_map::IntoIter<String, ValidationErrors>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl fmt::Display for SchemaErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} field(s) failed validation:", self.entries.len())?;
        for (label, errors) in &self.entries {
            let messages = errors.messages().join(", ");
            writeln!(f, "  {label}: {messages}")?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaErrors {}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_error() {
        let error = ValidationError::new("Required", "must be non-empty");
        assert_eq!(error.code, "Required");
        assert_eq!(error.kind, ErrorKind::RuleViolation);
        assert_eq!(error.to_string(), "must be non-empty");
    }

    #[test]
    fn test_type_mismatch() {
        let error = ValidationError::type_mismatch("string", "number");
        assert_eq!(error.kind, ErrorKind::TypeMismatch);
        assert_eq!(error.message, "invalid type");
        assert_eq!(error.param("expected"), Some("string"));
        assert_eq!(error.param("actual"), Some("number"));
    }

    #[test]
    fn test_unknown_key() {
        let error = ValidationError::unknown_key("Age");
        assert_eq!(error.kind, ErrorKind::UnknownKey);
        assert_eq!(error.to_string(), "invalid key");
        assert_eq!(error.field.as_deref(), Some("Age"));
    }

    #[test]
    fn test_with_message_keeps_code() {
        let error = ValidationError::new("Min", "too short").with_message("req");
        assert_eq!(error.code, "Min");
        assert_eq!(error.message, "req");
    }

    #[test]
    fn test_zero_alloc_static_strings() {
        let error = ValidationError::new("Required", "must be non-empty");
        assert!(matches!(error.code, Cow::Borrowed(_)));
        assert!(matches!(error.message, Cow::Borrowed(_)));
    }

    #[test]
    fn test_error_collection() {
        let mut errors = ValidationErrors::new();
        assert!(errors.clone().into_result().is_ok());

        errors.add(ValidationError::new("b", "second"));
        errors.add(ValidationError::new("a", "first"));

        assert_eq!(errors.len(), 2);
        assert!(errors.has_errors());
        assert_eq!(errors.messages(), vec!["first", "second"]);
        assert!(errors.contains_message("second"));
        assert!(errors.into_result().is_err());
    }

    #[test]
    fn test_schema_errors() {
        let mut errors = SchemaErrors::new();
        errors.insert(
            "LastName(doe)",
            ValidationErrors::single(ValidationError::new("Pattern", "must match pattern: x")),
        );

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.labels().collect::<Vec<_>>(), vec!["LastName(doe)"]);
        assert!(errors.get("LastName(doe)").is_some());
        assert!(errors.to_string().contains("LastName(doe): must match pattern: x"));
    }
}
