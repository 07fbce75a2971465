#![forbid(unsafe_code)]

//! Error types.
//!
//! The listbox itself has no failure modes: invalid input degrades to "no
//! selection" or a no-op. Errors only surface at the edges, when validating
//! an option list up front or loading configuration.

use std::fmt;

/// Problems found when validating an option list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionsError {
    /// Two options share the same value.
    DuplicateValue {
        /// The repeated value.
        value: String,
        /// Index of the first occurrence.
        first: usize,
        /// Index of the repeat.
        duplicate: usize,
    },
}

impl fmt::Display for OptionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateValue {
                value,
                first,
                duplicate,
            } => write!(
                f,
                "option value {value:?} at index {duplicate} duplicates index {first}"
            ),
        }
    }
}

impl std::error::Error for OptionsError {}

/// Errors from loading a [`DropdownConfig`](crate::config::DropdownConfig).
#[derive(Debug)]
pub enum ConfigError {
    /// Reading the config file failed.
    Io(std::io::Error),
    /// The TOML document could not be parsed.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// The JSON document could not be parsed.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// The document parsed but holds out-of-range values.
    Invalid(Vec<String>),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "config I/O error: {err}"),
            #[cfg(feature = "config")]
            Self::Toml(err) => write!(f, "config TOML parse error: {err}"),
            #[cfg(feature = "config")]
            Self::Json(err) => write!(f, "config JSON parse error: {err}"),
            Self::Invalid(problems) => write!(f, "invalid config: {}", problems.join("; ")),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            #[cfg(feature = "config")]
            Self::Toml(err) => Some(err),
            #[cfg(feature = "config")]
            Self::Json(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn duplicate_value_display() {
        let err = OptionsError::DuplicateValue {
            value: "usd".into(),
            first: 0,
            duplicate: 3,
        };
        assert_eq!(
            err.to_string(),
            "option value \"usd\" at index 3 duplicates index 0"
        );
    }

    #[test]
    fn invalid_config_joins_problems() {
        let err = ConfigError::Invalid(vec!["a".into(), "b".into()]);
        assert_eq!(err.to_string(), "invalid config: a; b");
        assert!(err.source().is_none());
    }

    #[test]
    fn io_error_is_the_source() {
        let err = ConfigError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("config I/O error"));
    }
}
