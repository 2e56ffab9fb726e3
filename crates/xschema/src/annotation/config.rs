//! Annotation parsing configuration

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Tag key read from field annotations when none is configured.
pub const DEFAULT_TAG: &str = "x";

/// How malformed annotation arguments are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// Unknown rules are ignored, bad integers become `0`, bad lists become
    /// empty and uncompilable patterns are skipped. Each case is logged at
    /// `warn` level but never surfaced.
    #[default]
    Lenient,
    /// Every malformed token is an [`AnnotationError`](super::AnnotationError).
    Strict,
}

impl fmt::Display for ParseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseMode::Lenient => write!(f, "lenient"),
            ParseMode::Strict => write!(f, "strict"),
        }
    }
}

impl FromStr for ParseMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            other => Err(format!("unknown parse mode `{other}`")),
        }
    }
}

/// Annotation configuration
///
/// Passed explicitly to the annotated-record entry points; there is no
/// process-wide tag setting.
///
/// ```
/// use xschema::annotation::{AnnotationConfig, ParseMode};
///
/// let config: AnnotationConfig = serde_json::from_str(r#"{"mode": "strict"}"#).unwrap();
/// assert_eq!(config.tag, "x");
/// assert_eq!(config.mode, ParseMode::Strict);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationConfig {
    /// Tag key holding the rule list, e.g. `x` in `#[annotate(x = "Required")]`
    pub tag: Cow<'static, str>,

    /// Handling of malformed tokens
    pub mode: ParseMode,
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            tag: Cow::Borrowed(DEFAULT_TAG),
            mode: ParseMode::Lenient,
        }
    }
}

impl AnnotationConfig {
    /// Creates the default configuration (tag `x`, lenient).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a configuration from `XSCHEMA_TAG` and `XSCHEMA_PARSE_MODE`,
    /// falling back to the defaults for unset or unparsable variables.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            tag: std::env::var("XSCHEMA_TAG")
                .ok()
                .filter(|tag| !tag.is_empty())
                .map_or(defaults.tag, Cow::Owned),
            mode: std::env::var("XSCHEMA_PARSE_MODE")
                .ok()
                .and_then(|mode| mode.parse().ok())
                .unwrap_or(defaults.mode),
        }
    }

    /// Sets the tag key.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_tag(mut self, tag: impl Into<Cow<'static, str>>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Sets the parse mode.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_mode(mut self, mode: ParseMode) -> Self {
        self.mode = mode;
        self
    }

    /// Shorthand for `with_mode(ParseMode::Strict)`.
    #[must_use = "builder methods must be chained or built"]
    pub fn strict(self) -> Self {
        self.with_mode(ParseMode::Strict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnnotationConfig::default();
        assert_eq!(config.tag, DEFAULT_TAG);
        assert_eq!(config.mode, ParseMode::Lenient);
    }

    #[test]
    fn test_builder() {
        let config = AnnotationConfig::new().with_tag("validate").strict();
        assert_eq!(config.tag, "validate");
        assert_eq!(config.mode, ParseMode::Strict);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: AnnotationConfig = serde_json::from_str(r#"{"tag": "v"}"#).unwrap();
        assert_eq!(config.tag, "v");
        assert_eq!(config.mode, ParseMode::Lenient);
    }

    #[test]
    fn test_parse_mode_from_str() {
        assert_eq!("Strict".parse::<ParseMode>(), Ok(ParseMode::Strict));
        assert_eq!(" lenient ".parse::<ParseMode>(), Ok(ParseMode::Lenient));
        assert!("loud".parse::<ParseMode>().is_err());
        assert_eq!(ParseMode::Strict.to_string(), "strict");
    }
}
