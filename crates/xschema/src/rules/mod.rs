//! Rule sets: named predicates over one scalar domain
//!
//! A [`RuleSet<T>`] maps rule identifiers to `(predicate, error)` pairs.
//! Validation runs **every** registered rule and collects the errors of all
//! failing ones; it never stops at the first failure.
//!
//! Builder methods consume the set and return the updated one. Predicates
//! are shared behind `Arc`, so cloning a set to fork a chain is cheap and the
//! original chain keeps working:
//!
//! ```
//! use xschema::prelude::*;
//! use serde_json::json;
//!
//! let base = StringRules::new().required();
//! let short = base.clone().max(3);
//!
//! assert!(base.validate(&json!("abcdef")).is_ok());
//! assert!(short.validate(&json!("abcdef")).is_err());
//! ```
//!
//! The concrete catalogs live in [`string`] ([`StringRules`]) and [`number`]
//! ([`NumberRules`]).

pub mod number;
pub mod string;

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::foundation::{
    Scalar, ScalarKind, Validatable, ValidationError, ValidationErrors, value_type_name,
};

pub use number::{NumberRule, NumberRules};
pub use string::{StringRule, StringRules};

type Predicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

// ============================================================================
// RULE
// ============================================================================

/// A single named check: the predicate and the error reported when it fails.
pub struct Rule<T> {
    error: ValidationError,
    predicate: Predicate<T>,
}

impl<T> Rule<T> {
    /// Creates a rule from a predicate and its error.
    pub fn new<F>(error: ValidationError, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self {
            error,
            predicate: Arc::new(predicate),
        }
    }

    /// Returns the error reported on failure.
    #[must_use]
    pub fn error(&self) -> &ValidationError {
        &self.error
    }

    /// Returns true if `value` satisfies the rule.
    #[must_use]
    pub fn test(&self, value: &T) -> bool {
        (self.predicate)(value)
    }
}

impl<T> Clone for Rule<T> {
    fn clone(&self) -> Self {
        Self {
            error: self.error.clone(),
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<T> fmt::Debug for Rule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// RULE SET
// ============================================================================

/// Named rules over one scalar domain.
///
/// At most one rule exists per identifier; registering an identifier again
/// replaces the earlier rule.
pub struct RuleSet<T> {
    rules: BTreeMap<Cow<'static, str>, Rule<T>>,
}

impl<T: Scalar> RuleSet<T> {
    /// Creates an empty rule set. An empty set accepts every value of its domain.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rules: BTreeMap::new(),
        }
    }

    /// Registers (or replaces) a rule under `identifier`.
    ///
    /// # Examples
    ///
    /// ```
    /// use xschema::prelude::*;
    /// use serde_json::json;
    ///
    /// let even = NumberRules::new().with(
    ///     "Even",
    ///     |n: &i64| n % 2 == 0,
    ///     ValidationError::new("Even", "must be even"),
    /// );
    ///
    /// assert!(even.validate(&json!(4)).is_ok());
    /// assert!(even.validate(&json!(5)).is_err());
    /// ```
    pub fn with<F>(
        mut self,
        identifier: impl Into<Cow<'static, str>>,
        predicate: F,
        error: ValidationError,
    ) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.rules
            .insert(identifier.into(), Rule::new(error, predicate));
        self
    }

    /// Replaces the message of an already registered rule.
    ///
    /// Shortcut identifiers such as `Email` resolve to the rule they register
    /// under. Does nothing when `identifier` is not registered.
    ///
    /// # Examples
    ///
    /// ```
    /// use xschema::prelude::*;
    /// use serde_json::json;
    ///
    /// let rules = StringRules::new().required().message(StringRule::Required, "req");
    /// let errors = rules.validate(&json!("")).unwrap_err();
    /// assert_eq!(errors.messages(), vec!["req"]);
    /// ```
    pub fn message(
        mut self,
        identifier: impl AsRef<str>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        if let Some(rule) = self.rules.get_mut(resolve::<T>(identifier.as_ref())) {
            rule.error = rule.error.clone().with_message(message);
        }
        self
    }

    /// Validates an already typed value.
    ///
    /// # Errors
    ///
    /// Returns the errors of every failing rule.
    pub fn check(&self, value: &T) -> Result<(), ValidationErrors> {
        let errors: ValidationErrors = self
            .rules
            .iter()
            .filter(|(_, rule)| !rule.test(value))
            .map(|(identifier, rule)| {
                tracing::trace!(rule = %identifier, domain = %T::KIND, "rule failed");
                rule.error.clone()
            })
            .collect();

        errors.into_result()
    }

    /// Returns the rule registered under `identifier`.
    #[must_use]
    pub fn get(&self, identifier: &str) -> Option<&Rule<T>> {
        self.rules.get(resolve::<T>(identifier))
    }

    /// Returns true if a rule is registered under `identifier`.
    #[must_use]
    pub fn contains(&self, identifier: &str) -> bool {
        self.rules.contains_key(resolve::<T>(identifier))
    }

    /// Iterates over the registered identifiers.
    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(AsRef::as_ref)
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if no rule is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Diagnostic label such as `StringRules(Min,Required)`.
    ///
    /// Only meant for logs and debugging; do not parse it.
    #[must_use]
    pub fn describe(&self) -> String {
        let names: Vec<&str> = self.rule_names().collect();
        format!("{}({})", T::RULES_NAME, names.join(","))
    }
}

impl<T: Scalar> Validatable for RuleSet<T> {
    fn validate(&self, value: &Value) -> Result<(), ValidationErrors> {
        match T::from_value(value) {
            Some(resolved) => self.check(&resolved),
            None => Err(ValidationErrors::single(ValidationError::type_mismatch(
                T::KIND.as_str(),
                value_type_name(value),
            ))),
        }
    }

    fn describe(&self) -> String {
        RuleSet::describe(self)
    }

    fn kind(&self) -> ScalarKind {
        T::KIND
    }
}

impl<T: Scalar> Default for RuleSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for RuleSet<T> {
    fn clone(&self) -> Self {
        Self {
            rules: self.rules.clone(),
        }
    }
}

impl<T: Scalar> fmt::Debug for RuleSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(T::RULES_NAME)
            .field("rules", &self.rules.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<T: Scalar> fmt::Display for RuleSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

fn resolve<T: Scalar>(identifier: &str) -> &str {
    T::RULE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == identifier)
        .map_or(identifier, |&(_, target)| target)
}

/// Renders a list as `[a b c]`, the form used in `OneOf` messages.
pub(crate) fn format_list<T: fmt::Display>(values: &[T]) -> String {
    let items: Vec<String> = values.iter().map(ToString::to_string).collect();
    format!("[{}]", items.join(" "))
}

// ============================================================================
// TESTS
// ============================================================================
