//! Number rule catalog
//!
//! [`NumberRules`] is `RuleSet<i64>`. Dynamic values resolve through the
//! numeric coercion policy: integral JSON numbers are used as-is and
//! floating-point numbers are truncated toward zero before any rule runs.
//!
//! ```
//! use xschema::prelude::*;
//! use serde_json::json;
//!
//! let age = NumberRules::new().required().gte(18);
//! assert!(age.validate(&json!(18)).is_ok());
//! assert!(age.validate(&json!(18.9)).is_ok());
//! assert!(age.validate(&json!(17)).is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use crate::foundation::ValidationError;
use crate::rules::{RuleSet, format_list};

/// Rule set over integer values.
pub type NumberRules = RuleSet<i64>;

// ============================================================================
// RULE IDENTIFIERS
// ============================================================================

/// Identifiers of the number catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberRule {
    Required,
    Gt,
    Gte,
    Lt,
    Lte,
    MultipleOf,
    OneOf,
}

impl NumberRule {
    /// Every identifier, in catalog order.
    pub const ALL: [Self; 7] = [
        Self::Required,
        Self::Gt,
        Self::Gte,
        Self::Lt,
        Self::Lte,
        Self::MultipleOf,
        Self::OneOf,
    ];

    /// Returns the annotation / identifier spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Required => "Required",
            Self::Gt => "Gt",
            Self::Gte => "Gte",
            Self::Lt => "Lt",
            Self::Lte => "Lte",
            Self::MultipleOf => "MultipleOf",
            Self::OneOf => "OneOf",
        }
    }
}

impl AsRef<str> for NumberRule {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for NumberRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NumberRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|rule| rule.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

// ============================================================================
// CATALOG
// ============================================================================

impl RuleSet<i64> {
    /// Value must be non-zero.
    pub fn required(self) -> Self {
        self.with(
            NumberRule::Required.as_str(),
            |value: &i64| *value != 0,
            ValidationError::new(NumberRule::Required.as_str(), "must be non-zero"),
        )
    }

    /// Value must be strictly greater than `bound`.
    pub fn gt(self, bound: i64) -> Self {
        self.with(
            NumberRule::Gt.as_str(),
            move |value: &i64| *value > bound,
            bound_error(NumberRule::Gt, "must be greater than", bound),
        )
    }

    /// Value must be greater than or equal to `bound`.
    pub fn gte(self, bound: i64) -> Self {
        self.with(
            NumberRule::Gte.as_str(),
            move |value: &i64| *value >= bound,
            bound_error(NumberRule::Gte, "must be greater or equal to", bound),
        )
    }

    /// Value must be strictly less than `bound`.
    pub fn lt(self, bound: i64) -> Self {
        self.with(
            NumberRule::Lt.as_str(),
            move |value: &i64| *value < bound,
            bound_error(NumberRule::Lt, "must be lesser than", bound),
        )
    }

    /// Value must be less than or equal to `bound`.
    pub fn lte(self, bound: i64) -> Self {
        self.with(
            NumberRule::Lte.as_str(),
            move |value: &i64| *value <= bound,
            bound_error(NumberRule::Lte, "must be lesser or equal to", bound),
        )
    }

    /// Value must be divisible by `divisor`.
    ///
    /// A zero divisor makes every value fail instead of faulting.
    pub fn multiple_of(self, divisor: i64) -> Self {
        self.with(
            NumberRule::MultipleOf.as_str(),
            move |value: &i64| value.checked_rem(divisor) == Some(0),
            bound_error(NumberRule::MultipleOf, "must be a multiple of", divisor),
        )
    }

    /// Value must be one of `values`.
    pub fn one_of(self, values: impl IntoIterator<Item = i64>) -> Self {
        let values: Vec<i64> = values.into_iter().collect();
        let error = ValidationError::new(
            NumberRule::OneOf.as_str(),
            format!("must be one of: {}", format_list(&values)),
        );

        self.with(
            NumberRule::OneOf.as_str(),
            move |value: &i64| values.contains(value),
            error,
        )
    }
}

fn bound_error(rule: NumberRule, text: &str, bound: i64) -> ValidationError {
    ValidationError::new(rule.as_str(), format!("{text}: {bound}"))
        .with_param("bound", bound.to_string())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{ErrorKind, Validatable};
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn test_empty_accepts_numbers_only() {
        let rules = NumberRules::new();
        assert!(rules.validate(&json!(123)).is_ok());

        let errors = rules.validate(&json!("123")).unwrap_err();
        assert_eq!(errors.errors()[0].kind, ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_required() {
        let rules = NumberRules::new().required();
        assert!(rules.check(&123).is_ok());
        assert_eq!(
            rules.check(&0).unwrap_err().messages(),
            vec!["must be non-zero"]
        );
    }

    #[test]
    fn test_custom_message() {
        let rules = NumberRules::new()
            .required()
            .message(NumberRule::Required, "req");
        assert_eq!(rules.check(&0).unwrap_err().messages(), vec!["req"]);
    }

    #[rstest]
    #[case::gt_below(NumberRules::new().gt(0), -123, false)]
    #[case::gt_above(NumberRules::new().gt(0), 123, true)]
    #[case::gt_equal(NumberRules::new().gt(0), 0, false)]
    #[case::gte_below(NumberRules::new().gte(0), -123, false)]
    #[case::gte_equal(NumberRules::new().gte(0), 0, true)]
    #[case::lt_above(NumberRules::new().lt(0), 123, false)]
    #[case::lt_below(NumberRules::new().lt(0), -123, true)]
    #[case::lte_above(NumberRules::new().lte(0), 123, false)]
    #[case::lte_equal(NumberRules::new().lte(0), 0, true)]
    #[case::multiple_of_miss(NumberRules::new().multiple_of(3), 17, false)]
    #[case::multiple_of_hit(NumberRules::new().multiple_of(3), 27, true)]
    #[case::multiple_of_negative(NumberRules::new().multiple_of(3), -9, true)]
    fn test_comparisons(#[case] rules: NumberRules, #[case] value: i64, #[case] ok: bool) {
        assert_eq!(rules.check(&value).is_ok(), ok);
    }

    #[test]
    fn test_gte_eighteen() {
        let rules = NumberRules::new().gte(18);
        assert!(rules.validate(&json!(17)).is_err());
        assert!(rules.validate(&json!(18)).is_ok());
        assert_eq!(
            rules.check(&17).unwrap_err().messages(),
            vec!["must be greater or equal to: 18"]
        );
    }

    #[test]
    fn test_multiple_of_zero_fails_without_panic() {
        let rules = NumberRules::new().multiple_of(0);
        assert!(rules.check(&10).is_err());
        assert!(rules.check(&0).is_err());
    }

    #[test]
    fn test_multiple_of_min_by_minus_one() {
        let rules = NumberRules::new().multiple_of(-1);
        assert!(rules.check(&i64::MIN).is_err());
        assert!(rules.check(&5).is_ok());
    }

    #[test]
    fn test_one_of() {
        let rules = NumberRules::new().one_of([7, 9, 11]);
        assert!(rules.check(&17).is_err());
        assert!(rules.check(&9).is_ok());
        assert!(rules.check(&7).is_ok());
        assert_eq!(
            rules.check(&17).unwrap_err().messages(),
            vec!["must be one of: [7 9 11]"]
        );

        let narrowed = NumberRules::new().one_of([9, 11]);
        assert!(narrowed.check(&7).is_err());
    }

    #[test]
    fn test_floats_are_truncated() {
        let rules = NumberRules::new().one_of([17]);
        assert!(rules.validate(&json!(17.99)).is_ok());
        assert!(rules.validate(&json!(18.01)).is_err());
    }

    #[test]
    fn test_all_failures_collected() {
        let rules = NumberRules::new().required().gt(10).multiple_of(4);
        let errors = rules.check(&0).unwrap_err();
        assert_eq!(
            errors.messages(),
            vec!["must be greater than: 10", "must be non-zero"]
        );
    }

    #[test]
    fn test_rule_name_round_trip() {
        for rule in NumberRule::ALL {
            assert_eq!(rule.as_str().parse::<NumberRule>(), Ok(rule));
        }
        assert!("Min".parse::<NumberRule>().is_err());
    }
}
