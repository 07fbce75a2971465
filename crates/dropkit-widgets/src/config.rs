#![forbid(unsafe_code)]

//! Tunable dropdown behavior.
//!
//! Every field has a default matching the stock widget, so
//! `DropdownConfig::default()` is what [`Dropdown::new`] uses. With the
//! `config` feature the struct can be loaded from TOML or JSON:
//!
//! ```toml
//! typeahead_timeout_ms = 750
//! focus_follows_pointer = false
//! no_options_label = "Nothing to choose"
//! ```
//!
//! ```rust,ignore
//! let config = DropdownConfig::from_toml_file("dropdown.toml")?;
//! let dropdown = Dropdown::new(options).config(config);
//! ```
//!
//! [`Dropdown::new`]: crate::listbox::Dropdown::new

#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};
use web_time::Duration;

#[cfg(feature = "config")]
use crate::error::ConfigError;
use crate::listbox::typeahead::DEFAULT_TYPEAHEAD_TIMEOUT;

/// Upper bound accepted for the type-ahead decay window.
pub const MAX_TYPEAHEAD_TIMEOUT_MS: u64 = 10_000;

/// Behavior and presentation knobs for a [`Dropdown`](crate::listbox::Dropdown).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct DropdownConfig {
    /// How long typed characters keep accumulating, in milliseconds.
    pub typeahead_timeout_ms: u64,
    /// Move the keyboard focus to the option under the pointer on hover.
    pub focus_follows_pointer: bool,
    /// Prefix drawn before the focused option.
    pub highlight_symbol: String,
    /// Prefix drawn before the committed option.
    pub selected_symbol: String,
    /// Suffix appended to disabled options.
    pub disabled_suffix: String,
    /// Row shown when the option list is empty.
    pub no_options_label: String,
}

impl Default for DropdownConfig {
    fn default() -> Self {
        Self {
            typeahead_timeout_ms: DEFAULT_TYPEAHEAD_TIMEOUT.as_millis() as u64,
            focus_follows_pointer: true,
            highlight_symbol: "> ".to_owned(),
            selected_symbol: "✓ ".to_owned(),
            disabled_suffix: " (disabled)".to_owned(),
            no_options_label: "No options".to_owned(),
        }
    }
}

impl DropdownConfig {
    /// The type-ahead decay window as a [`Duration`].
    ///
    /// Out-of-range values are clamped: `0` falls back to the default window
    /// and anything above [`MAX_TYPEAHEAD_TIMEOUT_MS`] is capped.
    #[must_use]
    pub fn typeahead_timeout(&self) -> Duration {
        match self.typeahead_timeout_ms {
            0 => DEFAULT_TYPEAHEAD_TIMEOUT,
            ms => Duration::from_millis(ms.min(MAX_TYPEAHEAD_TIMEOUT_MS)),
        }
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of problems. An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.typeahead_timeout_ms == 0 {
            errors.push("typeahead_timeout_ms must be > 0".into());
        } else if self.typeahead_timeout_ms > MAX_TYPEAHEAD_TIMEOUT_MS {
            errors.push(format!(
                "typeahead_timeout_ms must be <= {MAX_TYPEAHEAD_TIMEOUT_MS}, got {}",
                self.typeahead_timeout_ms
            ));
        }

        if self.highlight_symbol.chars().any(char::is_control) {
            errors.push("highlight_symbol must not contain control characters".into());
        }
        if self.selected_symbol.chars().any(char::is_control) {
            errors.push("selected_symbol must not contain control characters".into());
        }

        errors
    }

    /// Load from a TOML string and validate.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(ConfigError::Toml)?;
        config.validated()
    }

    /// Load from a TOML file on disk and validate.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string and validate.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s).map_err(ConfigError::Json)?;
        config.validated()
    }

    /// Load from a JSON file on disk and validate.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    #[cfg(feature = "config")]
    fn validated(self) -> Result<Self, ConfigError> {
        let problems = self.validate();
        if problems.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Invalid(problems))
        }
    }
}
