//! Annotation mini-language
//!
//! A field annotation is a comma-separated list of rule entries:
//!
//! ```text
//! tag   := entry (',' entry)*
//! entry := Name | Name '=' Arg
//! ```
//!
//! `Name` selects a catalog constructor of [`StringRules`] or
//! [`NumberRules`]. `Arg` is read as plain text (`StartsWith`, `EndsWith`,
//! `Pattern`), as an integer (`Length`, `Min`, `Max`, `Gt`, `Gte`, `Lt`,
//! `Lte`, `MultipleOf`) or as a JSON array literal (`OneOf`).
//!
//! Entries are split on `,` outside square brackets, so `OneOf=["a","b"]`
//! stays one entry. The argument starts after the first `=` and may contain
//! more.
//!
//! ```
//! use xschema::annotation::{ParseMode, parse_string_rules, tokens};
//! use xschema::foundation::Validatable;
//! use serde_json::json;
//!
//! let rules = parse_string_rules(
//!     tokens("Required,Min=3,Pattern=^[A-Z]{1}[a-z]+$"),
//!     ParseMode::Strict,
//! )
//! .unwrap();
//!
//! assert!(rules.validate(&json!("John")).is_ok());
//! assert!(rules.validate(&json!("doe")).is_err());
//! ```

mod config;
mod error;

use std::str::FromStr;
use std::sync::Arc;

use regex::Regex;
use serde::de::DeserializeOwned;

use crate::foundation::{ScalarKind, Validatable};
use crate::rules::{NumberRule, NumberRules, StringRule, StringRules};

pub use config::{AnnotationConfig, DEFAULT_TAG, ParseMode};
pub use error::AnnotationError;

// ============================================================================
// TOKENS
// ============================================================================

/// Splits an annotation into trimmed, non-empty entries.
///
/// Commas nested in `[...]` do not split, nor do brackets and commas inside
/// a JSON string literal within those brackets.
pub fn tokens(annotation: &str) -> impl Iterator<Item = &str> {
    let mut depth = 0usize;
    let mut quoted = false;
    let mut escaped = false;
    annotation
        .split(move |c: char| {
            if quoted {
                match c {
                    _ if escaped => escaped = false,
                    '\\' => escaped = true,
                    '"' => quoted = false,
                    _ => {}
                }
                return false;
            }

            match c {
                '"' if depth > 0 => {
                    quoted = true;
                    false
                }
                '[' => {
                    depth += 1;
                    false
                }
                ']' => {
                    depth = depth.saturating_sub(1);
                    false
                }
                ',' => depth == 0,
                _ => false,
            }
        })
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// One `Name[=Arg]` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// Rule name
    pub name: &'a str,
    /// Raw argument after the first `=`
    pub arg: Option<&'a str>,
}

impl<'a> Token<'a> {
    /// Splits an entry on its first `=`.
    #[must_use]
    pub fn parse(entry: &'a str) -> Self {
        match entry.split_once('=') {
            Some((name, arg)) => Self {
                name: name.trim(),
                arg: Some(arg),
            },
            None => Self {
                name: entry.trim(),
                arg: None,
            },
        }
    }
}

// ============================================================================
// ENTRY POINTS
// ============================================================================

/// Builds a [`StringRules`] from annotation entries.
///
/// # Errors
///
/// Only in [`ParseMode::Strict`]: the first malformed entry.
pub fn parse_string_rules<'a, I>(entries: I, mode: ParseMode) -> Result<StringRules, AnnotationError>
where
    I: IntoIterator<Item = &'a str>,
{
    let parser = Parser { mode };
    let rules = entries
        .into_iter()
        .map(Token::parse)
        .try_fold(StringRules::new(), |rules, token| {
            parser.apply_string(rules, token)
        })?;

    tracing::trace!(rules = %rules.describe(), %mode, "parsed string annotation");
    Ok(rules)
}

/// Builds a [`NumberRules`] from annotation entries.
///
/// # Errors
///
/// Only in [`ParseMode::Strict`]: the first malformed entry.
pub fn parse_number_rules<'a, I>(entries: I, mode: ParseMode) -> Result<NumberRules, AnnotationError>
where
    I: IntoIterator<Item = &'a str>,
{
    let parser = Parser { mode };
    let rules = entries
        .into_iter()
        .map(Token::parse)
        .try_fold(NumberRules::new(), |rules, token| {
            parser.apply_number(rules, token)
        })?;

    tracing::trace!(rules = %rules.describe(), %mode, "parsed number annotation");
    Ok(rules)
}

/// Parses a whole annotation into the rule set matching `kind`.
///
/// # Errors
///
/// Only in [`ParseMode::Strict`]: the first malformed entry.
pub fn parse_rules(
    kind: ScalarKind,
    annotation: &str,
    mode: ParseMode,
) -> Result<Arc<dyn Validatable>, AnnotationError> {
    Ok(match kind {
        ScalarKind::Text => Arc::new(parse_string_rules(tokens(annotation), mode)?),
        ScalarKind::Number => Arc::new(parse_number_rules(tokens(annotation), mode)?),
    })
}

impl StringRules {
    /// Leniently builds a rule set from annotation entries.
    pub fn from_tags<'a>(entries: impl IntoIterator<Item = &'a str>) -> Self {
        parse_string_rules(entries, ParseMode::Lenient).unwrap_or_default()
    }
}

impl NumberRules {
    /// Leniently builds a rule set from annotation entries.
    pub fn from_tags<'a>(entries: impl IntoIterator<Item = &'a str>) -> Self {
        parse_number_rules(entries, ParseMode::Lenient).unwrap_or_default()
    }
}

// ============================================================================
// PARSER
// ============================================================================

struct Parser {
    mode: ParseMode,
}

impl Parser {
    fn apply_string(
        &self,
        rules: StringRules,
        token: Token<'_>,
    ) -> Result<StringRules, AnnotationError> {
        let Ok(rule) = token.name.parse::<StringRule>() else {
            return self.degrade(
                AnnotationError::UnknownRule {
                    name: token.name.to_string(),
                    domain: ScalarKind::Text,
                },
                rules,
            );
        };

        Ok(match rule {
            StringRule::Required => rules.required(),
            StringRule::Alphanum => rules.alphanum(),
            StringRule::StartsWith => rules.starts_with(self.text(&token)?),
            StringRule::EndsWith => rules.ends_with(self.text(&token)?),
            StringRule::Lower => rules.lower(),
            StringRule::Upper => rules.upper(),
            StringRule::Length => rules.length(self.integer(&token)?),
            StringRule::Min => rules.min(self.integer(&token)?),
            StringRule::Max => rules.max(self.integer(&token)?),
            StringRule::Pattern => match self.pattern(&token)? {
                Some(pattern) => rules.pattern(pattern),
                None => rules,
            },
            StringRule::Email => rules.email(),
            StringRule::Url => rules.url(),
            StringRule::Uuid => rules.uuid(),
            StringRule::OneOf => rules.one_of(self.list::<String>(&token)?),
        })
    }

    fn apply_number(
        &self,
        rules: NumberRules,
        token: Token<'_>,
    ) -> Result<NumberRules, AnnotationError> {
        let Ok(rule) = token.name.parse::<NumberRule>() else {
            return self.degrade(
                AnnotationError::UnknownRule {
                    name: token.name.to_string(),
                    domain: ScalarKind::Number,
                },
                rules,
            );
        };

        Ok(match rule {
            NumberRule::Required => rules.required(),
            NumberRule::Gt => rules.gt(self.integer(&token)?),
            NumberRule::Gte => rules.gte(self.integer(&token)?),
            NumberRule::Lt => rules.lt(self.integer(&token)?),
            NumberRule::Lte => rules.lte(self.integer(&token)?),
            NumberRule::MultipleOf => rules.multiple_of(self.integer(&token)?),
            NumberRule::OneOf => rules.one_of(self.list::<i64>(&token)?),
        })
    }

    /// Strict mode surfaces `error`; lenient mode logs it and continues with
    /// `fallback`.
    fn degrade<T>(&self, error: AnnotationError, fallback: T) -> Result<T, AnnotationError> {
        match self.mode {
            ParseMode::Strict => Err(error),
            ParseMode::Lenient => {
                tracing::warn!(%error, "ignoring malformed annotation entry");
                Ok(fallback)
            }
        }
    }

    fn argument<'a>(&self, token: &Token<'a>) -> Result<Option<&'a str>, AnnotationError> {
        match token.arg {
            Some(arg) => Ok(Some(arg)),
            None => self.degrade(
                AnnotationError::MissingArgument {
                    rule: token.name.to_string(),
                },
                None,
            ),
        }
    }

    fn text<'a>(&self, token: &Token<'a>) -> Result<&'a str, AnnotationError> {
        Ok(self.argument(token)?.unwrap_or_default())
    }

    fn integer<N>(&self, token: &Token<'_>) -> Result<N, AnnotationError>
    where
        N: FromStr + Default,
    {
        let Some(arg) = self.argument(token)? else {
            return Ok(N::default());
        };

        match arg.trim().parse::<N>() {
            Ok(value) => Ok(value),
            Err(_) => self.degrade(
                AnnotationError::InvalidInteger {
                    rule: token.name.to_string(),
                    arg: arg.to_string(),
                },
                N::default(),
            ),
        }
    }

    fn list<T>(&self, token: &Token<'_>) -> Result<Vec<T>, AnnotationError>
    where
        T: DeserializeOwned,
    {
        let Some(arg) = self.argument(token)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<T>>(arg) {
            Ok(values) => Ok(values),
            Err(e) => self.degrade(
                AnnotationError::InvalidList {
                    rule: token.name.to_string(),
                    arg: arg.to_string(),
                    reason: e.to_string(),
                },
                Vec::new(),
            ),
        }
    }

    /// `None` means the pattern was skipped in lenient mode.
    fn pattern(&self, token: &Token<'_>) -> Result<Option<Regex>, AnnotationError> {
        let arg = self.text(token)?;

        match Regex::new(arg) {
            Ok(pattern) => Ok(Some(pattern)),
            Err(e) => self.degrade(
                AnnotationError::InvalidPattern {
                    rule: token.name.to_string(),
                    arg: arg.to_string(),
                    reason: e.to_string(),
                },
                None,
            ),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn string_rules(annotation: &str) -> StringRules {
        parse_string_rules(tokens(annotation), ParseMode::Lenient).unwrap()
    }

    fn number_rules(annotation: &str) -> NumberRules {
        parse_number_rules(tokens(annotation), ParseMode::Lenient).unwrap()
    }

    #[test]
    fn test_tokens() {
        let parts: Vec<&str> = tokens(" Required , Min=3,,Max=5 ").collect();
        assert_eq!(parts, vec!["Required", "Min=3", "Max=5"]);
    }

    #[test]
    fn test_tokens_keep_bracketed_lists() {
        let parts: Vec<&str> = tokens(r#"Required,OneOf=["a","b"],Pattern=^[a-z]+$"#).collect();
        assert_eq!(parts, vec!["Required", r#"OneOf=["a","b"]"#, "Pattern=^[a-z]+$"]);
    }

    #[test]
    fn test_tokens_respect_quoted_list_items() {
        let parts: Vec<&str> = tokens(r#"OneOf=["a]","b,c"],Required"#).collect();
        assert_eq!(parts, vec![r#"OneOf=["a]","b,c"]"#, "Required"]);

        let rules = string_rules(r#"OneOf=["a]","b\"]"],Required"#);
        assert!(rules.validate(&json!("a]")).is_ok());
        assert!(rules.validate(&json!("b\"]")).is_ok());
        assert!(rules.validate(&json!("b")).is_err());
    }

    #[test]
    fn test_token_splits_on_first_equals() {
        let token = Token::parse("Pattern=^a=b$");
        assert_eq!(token.name, "Pattern");
        assert_eq!(token.arg, Some("^a=b$"));

        let bare = Token::parse("Required");
        assert_eq!(bare.arg, None);
    }

    #[test]
    fn test_string_annotation() {
        let rules = string_rules("Required,Min=3,Pattern=^[A-Z]{1}[a-z]+$");
        assert_eq!(rules.describe(), "StringRules(Min,Pattern,Required)");
        assert!(rules.validate(&json!("John")).is_ok());
        assert!(rules.validate(&json!("doe")).is_err());
        assert!(rules.validate(&json!("Jo")).is_err());
    }

    #[test]
    fn test_string_one_of_list() {
        let rules = string_rules(r#"OneOf=["mango","banana"]"#);
        assert!(rules.validate(&json!("mango")).is_ok());
        assert!(rules.validate(&json!("apple")).is_err());
    }

    #[test]
    fn test_shortcut_names() {
        let rules = string_rules("URL");
        assert!(rules.validate(&json!("example.com")).is_ok());
        let rules = string_rules("UUID");
        assert!(rules.validate(&json!("not-a-uuid")).is_err());
        let rules = string_rules("Email,Lower");
        assert!(rules.validate(&json!("a@b.io")).is_err()); // "a@b.io" is not all letters
    }

    #[test]
    fn test_number_annotation() {
        let rules = number_rules("Required,Gte=18,Lt=100,MultipleOf=2,OneOf=[18,20,40]");
        assert!(rules.validate(&json!(20)).is_ok());
        assert!(rules.validate(&json!(22)).is_err());
        assert!(rules.validate(&json!(0)).is_err());
    }

    #[test]
    fn test_lenient_ignores_unknown_rules() {
        let rules = number_rules("Required,Bogus,Min=3");
        assert_eq!(rules.describe(), "NumberRules(Required)");
    }

    #[test]
    fn test_lenient_bad_integer_becomes_zero() {
        let rules = number_rules("Gte=abc");
        assert!(rules.validate(&json!(0)).is_ok());
        assert!(rules.validate(&json!(-1)).is_err());
    }

    #[test]
    fn test_lenient_bad_list_becomes_empty() {
        let rules = number_rules("OneOf=[1,");
        assert!(rules.validate(&json!(1)).is_err());
    }

    #[test]
    fn test_lenient_missing_argument() {
        let rules = string_rules("StartsWith,Max");
        assert!(rules.validate(&json!("")).is_ok());
        assert!(rules.validate(&json!("a")).is_err());
    }

    #[test]
    fn test_negative_length_arguments() {
        for mode in [ParseMode::Lenient, ParseMode::Strict] {
            let max = parse_string_rules(tokens("Max=-1"), mode).unwrap();
            assert!(max.validate(&json!("")).is_err());
            assert_eq!(
                max.validate(&json!("")).unwrap_err().messages(),
                vec!["must be of length smaller than: -1"]
            );

            let length = parse_string_rules(tokens("Length=-1"), mode).unwrap();
            assert!(length.validate(&json!("")).is_err());

            let min = parse_string_rules(tokens("Min=-1"), mode).unwrap();
            assert!(min.validate(&json!("")).is_ok());
        }
    }

    #[test]
    fn test_lenient_skips_bad_pattern() {
        let rules = string_rules("Required,Pattern=(");
        assert_eq!(rules.describe(), "StringRules(Required)");
    }

    #[test]
    fn test_strict_errors() {
        let unknown = parse_number_rules(tokens("Bogus"), ParseMode::Strict).unwrap_err();
        assert_eq!(
            unknown,
            AnnotationError::UnknownRule {
                name: "Bogus".into(),
                domain: ScalarKind::Number,
            }
        );

        let missing = parse_string_rules(tokens("Min"), ParseMode::Strict).unwrap_err();
        assert!(matches!(missing, AnnotationError::MissingArgument { .. }));

        let integer = parse_string_rules(tokens("Min=1.5"), ParseMode::Strict).unwrap_err();
        assert!(matches!(integer, AnnotationError::InvalidInteger { .. }));

        let list = parse_number_rules(tokens(r#"OneOf=["a"]"#), ParseMode::Strict).unwrap_err();
        assert!(matches!(list, AnnotationError::InvalidList { .. }));

        let pattern = parse_string_rules(tokens("Pattern=("), ParseMode::Strict).unwrap_err();
        assert!(matches!(pattern, AnnotationError::InvalidPattern { .. }));
        assert!(pattern.to_string().contains("invalid pattern `(`"));
    }

    #[test]
    fn test_parse_rules_by_kind() {
        let text = parse_rules(ScalarKind::Text, "Required", ParseMode::Strict).unwrap();
        assert_eq!(text.kind(), ScalarKind::Text);
        assert!(text.validate(&json!(5)).is_err());

        let number = parse_rules(ScalarKind::Number, "Required", ParseMode::Strict).unwrap();
        assert_eq!(number.kind(), ScalarKind::Number);
        assert!(number.validate(&json!(5)).is_ok());
    }

    #[test]
    fn test_from_tags() {
        let rules = StringRules::from_tags(["Required", "Max=2"]);
        assert!(rules.check(&"ab".to_string()).is_ok());
        assert!(rules.check(&"abc".to_string()).is_err());

        let rules = NumberRules::from_tags(["Lte=2"]);
        assert!(rules.check(&3).is_err());
    }
}
