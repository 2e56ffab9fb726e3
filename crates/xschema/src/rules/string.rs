//! String rule catalog
//!
//! [`StringRules`] is `RuleSet<String>` with a fixed set of named
//! constructors. Length rules count bytes, not characters.
//!
//! ```
//! use xschema::prelude::*;
//! use serde_json::json;
//!
//! let name = StringRules::new().required().alphanum().min(2);
//! assert!(name.validate(&json!("abc12")).is_ok());
//! assert!(name.validate(&json!("_______")).is_err());
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::foundation::ValidationError;
use crate::rules::{RuleSet, format_list};

static ALPHANUM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]+$").unwrap());

static LOWER_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z]+$").unwrap());

static UPPER_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Z]+$").unwrap());

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9._%+\-]+@[a-z0-9.\-]+\.[a-z]{2,4}$").unwrap()
});

static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[a-zA-Z0-9]{1,62}(?:[-.][a-zA-Z0-9]{1,62})+)(:[0-9]+)?$").unwrap()
});

static UUID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:[0-9a-f]{8}-[0-9a-f]{4}-[1-5][0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}|00000000-0000-0000-0000-000000000000)$",
    )
    .unwrap()
});

/// Rule set over text values.
pub type StringRules = RuleSet<String>;

// ============================================================================
// RULE IDENTIFIERS
// ============================================================================

/// Identifiers of the string catalog.
///
/// `Email`, `Url` and `Uuid` are shortcuts that register under
/// [`StringRule::Pattern`], so they never appear as rule identifiers
/// themselves. They are still valid annotation names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringRule {
    Required,
    Alphanum,
    StartsWith,
    EndsWith,
    Lower,
    Upper,
    Length,
    Min,
    Max,
    Pattern,
    Email,
    Url,
    Uuid,
    OneOf,
}

impl StringRule {
    /// Every identifier, in catalog order.
    pub const ALL: [Self; 14] = [
        Self::Required,
        Self::Alphanum,
        Self::StartsWith,
        Self::EndsWith,
        Self::Lower,
        Self::Upper,
        Self::Length,
        Self::Min,
        Self::Max,
        Self::Pattern,
        Self::Email,
        Self::Url,
        Self::Uuid,
        Self::OneOf,
    ];

    /// Returns the annotation / identifier spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Required => "Required",
            Self::Alphanum => "Alphanum",
            Self::StartsWith => "StartsWith",
            Self::EndsWith => "EndsWith",
            Self::Lower => "Lower",
            Self::Upper => "Upper",
            Self::Length => "Length",
            Self::Min => "Min",
            Self::Max => "Max",
            Self::Pattern => "Pattern",
            Self::Email => "Email",
            Self::Url => "URL",
            Self::Uuid => "UUID",
            Self::OneOf => "OneOf",
        }
    }
}

impl AsRef<str> for StringRule {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for StringRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StringRule {
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

impl RuleSet<String> {
    /// Value must be non-empty.
    pub fn required(self) -> Self {
        self.with(
            StringRule::Required.as_str(),
            |value: &String| !value.is_empty(),
            ValidationError::new(StringRule::Required.as_str(), "must be non-empty"),
        )
    }

    /// Value must be non-empty ASCII letters and digits.
    pub fn alphanum(self) -> Self {
        self.with(
            StringRule::Alphanum.as_str(),
            |value: &String| ALPHANUM_REGEX.is_match(value),
            ValidationError::new(StringRule::Alphanum.as_str(), "must be alphanumeric"),
        )
    }

    /// Value must start with `prefix`.
    pub fn starts_with(self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let error = ValidationError::new(
            StringRule::StartsWith.as_str(),
            format!("must start with: {prefix}"),
        )
        .with_param("prefix", prefix.clone());

        self.with(
            StringRule::StartsWith.as_str(),
            move |value: &String| value.starts_with(prefix.as_str()),
            error,
        )
    }

    /// Value must end with `suffix`.
    ///
    /// The default message reads `must start with: <suffix>`; this wording is
    /// kept for compatibility with existing consumers of the messages. Use
    /// [`message`](RuleSet::message) to override it.
    pub fn ends_with(self, suffix: impl Into<String>) -> Self {
        let suffix = suffix.into();
        let error = ValidationError::new(
            StringRule::EndsWith.as_str(),
            format!("must start with: {suffix}"),
        )
        .with_param("suffix", suffix.clone());

        self.with(
            StringRule::EndsWith.as_str(),
            move |value: &String| value.ends_with(suffix.as_str()),
            error,
        )
    }

    /// Value must be non-empty ASCII lowercase letters.
    pub fn lower(self) -> Self {
        self.with(
            StringRule::Lower.as_str(),
            |value: &String| LOWER_REGEX.is_match(value),
            ValidationError::new(StringRule::Lower.as_str(), "must be lowercase"),
        )
    }

    /// Value must be non-empty ASCII uppercase letters.
    pub fn upper(self) -> Self {
        self.with(
            StringRule::Upper.as_str(),
            |value: &String| UPPER_REGEX.is_match(value),
            ValidationError::new(StringRule::Upper.as_str(), "must be uppercase"),
        )
    }

    /// Byte length must equal `length`. A negative length matches nothing.
    pub fn length(self, length: i64) -> Self {
        self.with(
            StringRule::Length.as_str(),
            move |value: &String| byte_len(value) == length,
            ValidationError::new(
                StringRule::Length.as_str(),
                format!("must be of length equal to: {length}"),
            )
            .with_param("length", length.to_string()),
        )
    }

    /// Byte length must be at least `min`.
    pub fn min(self, min: i64) -> Self {
        self.with(
            StringRule::Min.as_str(),
            move |value: &String| byte_len(value) >= min,
            ValidationError::new(
                StringRule::Min.as_str(),
                format!("must be of length greater than: {min}"),
            )
            .with_param("min", min.to_string()),
        )
    }

    /// Byte length must be at most `max`. A negative bound matches nothing.
    pub fn max(self, max: i64) -> Self {
        self.with(
            StringRule::Max.as_str(),
            move |value: &String| byte_len(value) <= max,
            ValidationError::new(
                StringRule::Max.as_str(),
                format!("must be of length smaller than: {max}"),
            )
            .with_param("max", max.to_string()),
        )
    }

    /// Value must match `pattern` (unanchored unless the pattern anchors itself).
    pub fn pattern(self, pattern: Regex) -> Self {
        let error = ValidationError::new(
            StringRule::Pattern.as_str(),
            format!("must match pattern: {}", pattern.as_str()),
        )
        .with_param("pattern", pattern.as_str().to_string());

        self.with(
            StringRule::Pattern.as_str(),
            move |value: &String| pattern.is_match(value),
            error,
        )
    }

    /// Compiles `pattern` and registers it as a [`pattern`](Self::pattern) rule.
    ///
    /// # Errors
    ///
    /// Returns the regex compile error; the rule set is dropped in that case.
    pub fn try_pattern(self, pattern: &str) -> Result<Self, regex::Error> {
        Ok(self.pattern(Regex::new(pattern)?))
    }

    /// Lowercase e-mail address shortcut for [`pattern`](Self::pattern).
    pub fn email(self) -> Self {
        self.pattern(EMAIL_REGEX.clone())
    }

    /// `host[:port]` shortcut for [`pattern`](Self::pattern).
    pub fn url(self) -> Self {
        self.pattern(URL_REGEX.clone())
    }

    /// UUID v1-v5 (or nil UUID) shortcut for [`pattern`](Self::pattern).
    pub fn uuid(self) -> Self {
        self.pattern(UUID_REGEX.clone())
    }

    /// Value must be one of `values`.
    pub fn one_of<I, S>(self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        let error = ValidationError::new(
            StringRule::OneOf.as_str(),
            format!("must be one of: {}", format_list(&values)),
        );

        self.with(
            StringRule::OneOf.as_str(),
            move |value: &String| values.iter().any(|allowed| allowed == value),
            error,
        )
    }
}

fn byte_len(value: &str) -> i64 {
    i64::try_from(value.len()).unwrap_or(i64::MAX)
}

// ============================================================================
// TESTS
// ============================================================================
