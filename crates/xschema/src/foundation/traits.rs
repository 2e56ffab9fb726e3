//! Core traits for the validation system
//!
//! [`Scalar`] binds a Rust type to the JSON values it accepts, and
//! [`Validatable`] is the type-erased capability a [`Schema`](crate::Schema)
//! stores per field.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::foundation::ValidationErrors;

// ============================================================================
// SCALAR KIND
// ============================================================================

/// The two value domains a rule set can cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarKind {
    /// Text values, validated by [`StringRules`](crate::StringRules).
    Text,
    /// Integer values, validated by [`NumberRules`](crate::NumberRules).
    Number,
}

impl ScalarKind {
    /// Returns the name used in type mismatch errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "string",
            Self::Number => "number",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SCALAR DOMAIN
// ============================================================================

/// A scalar type a [`RuleSet`](crate::RuleSet) can validate.
///
/// `from_value` is the domain's coercion policy: it decides which dynamic
/// values resolve into `Self`. Returning `None` produces a type mismatch.
pub trait Scalar: Clone + fmt::Debug + Send + Sync + 'static {
    /// Domain of this scalar.
    const KIND: ScalarKind;

    /// Label used by `describe()`, e.g. `StringRules`.
    const RULES_NAME: &'static str;

    /// `(alias, identifier)` pairs for shortcut rules that register under
    /// another rule's identifier.
    const RULE_ALIASES: &'static [(&'static str, &'static str)] = &[];

    /// Resolves a dynamic value into this scalar.
    fn from_value(value: &Value) -> Option<Cow<'_, Self>>;
}

impl Scalar for String {
    const KIND: ScalarKind = ScalarKind::Text;
    const RULES_NAME: &'static str = "StringRules";
    const RULE_ALIASES: &'static [(&'static str, &'static str)] =
        &[("Email", "Pattern"), ("URL", "Pattern"), ("UUID", "Pattern")];

    fn from_value(value: &Value) -> Option<Cow<'_, Self>> {
        match value {
            Value::String(s) => Some(Cow::Borrowed(s)),
            _ => None,
        }
    }
}

impl Scalar for i64 {
    const KIND: ScalarKind = ScalarKind::Number;
    const RULES_NAME: &'static str = "NumberRules";

    /// Integral numbers pass through; floating-point numbers are truncated
    /// toward zero, saturating at the `i64` bounds.
    fn from_value(value: &Value) -> Option<Cow<'_, Self>> {
        match value {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .map(Cow::Owned),
            _ => None,
        }
    }
}

/// Returns the JSON type name of a value, for diagnostics.
#[must_use]
pub fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ============================================================================
// TYPE-ERASED CAPABILITY
// ============================================================================

/// Anything that can validate a dynamic value and describe itself.
///
/// Implemented by every [`RuleSet`](crate::RuleSet); a [`Schema`](crate::Schema)
/// stores fields as `Arc<dyn Validatable>` so string and number rule sets
/// can live side by side.
pub trait Validatable: fmt::Debug + Send + Sync {
    /// Validates a dynamic value.
    ///
    /// # Errors
    ///
    /// Returns every failure found. A type mismatch is reported alone.
    fn validate(&self, value: &Value) -> Result<(), ValidationErrors>;

    /// Diagnostic label listing the registered rules.
    fn describe(&self) -> String;

    /// Domain of the values this validator accepts.
    fn kind(&self) -> ScalarKind;
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_from_value() {
        let value = json!("abc");
        assert_eq!(String::from_value(&value).as_deref(), Some(&"abc".to_string()));
        assert!(String::from_value(&json!(1)).is_none());
        assert!(String::from_value(&json!(null)).is_none());
    }

    #[test]
    fn test_number_from_value_integral() {
        assert_eq!(i64::from_value(&json!(42)).map(Cow::into_owned), Some(42));
        assert_eq!(i64::from_value(&json!(-7)).map(Cow::into_owned), Some(-7));
    }

    #[test]
    fn test_number_from_value_truncates_floats() {
        assert_eq!(i64::from_value(&json!(17.9)).map(Cow::into_owned), Some(17));
        assert_eq!(i64::from_value(&json!(-2.5)).map(Cow::into_owned), Some(-2));
    }

    #[test]
    fn test_number_from_value_saturates_large_unsigned() {
        assert_eq!(
            i64::from_value(&json!(u64::MAX)).map(Cow::into_owned),
            Some(i64::MAX)
        );
    }

    #[test]
    fn test_number_from_value_rejects_other_types() {
        assert!(i64::from_value(&json!("18")).is_none());
        assert!(i64::from_value(&json!(true)).is_none());
        assert!(i64::from_value(&json!([1])).is_none());
    }

    #[test]
    fn test_value_type_name() {
        assert_eq!(value_type_name(&json!(null)), "null");
        assert_eq!(value_type_name(&json!({"a": 1})), "object");
    }
}
