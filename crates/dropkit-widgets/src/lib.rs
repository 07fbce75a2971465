#![forbid(unsafe_code)]

//! Accessible single-select listbox widget.
//!
//! The crate is headless: it owns the interaction state machine (open/closed,
//! keyboard navigation, type-ahead, dismissal, focus restoration) and projects
//! it into accessibility attributes and plain text rows. Painting those rows,
//! fetching the options, and reacting to a selection are the host's business.
//!
//! # Quick start
//!
//! ```
//! use dropkit_core::event::{KeyCode, KeyEvent};
//! use dropkit_widgets::listbox::{Dropdown, Outcome, SelectOption};
//! use web_time::Instant;
//!
//! let mut dropdown = Dropdown::new([
//!     SelectOption::new("usd", "US Dollar"),
//!     SelectOption::new("eur", "Euro"),
//! ])
//! .placeholder("Currency");
//!
//! let now = Instant::now();
//! dropdown.handle_key(&KeyEvent::new(KeyCode::Enter), now);
//! assert!(dropdown.is_open());
//! dropdown.handle_key(&KeyEvent::new(KeyCode::Down), now);
//! let outcome = dropdown.handle_key(&KeyEvent::new(KeyCode::Enter), now);
//! assert_eq!(outcome, Outcome::Committed { index: 1 });
//! assert_eq!(dropdown.selected_option().map(|o| o.value()), Some("eur"));
//! ```

pub mod config;
pub mod error;
pub mod listbox;

pub use config::DropdownConfig;
pub use error::{ConfigError, OptionsError};

/// Helper for allocation-free case-insensitive prefix check.
///
/// `prefix_lower` must already be lowercased.
pub(crate) fn starts_with_ignore_case(haystack: &str, prefix_lower: &str) -> bool {
    if prefix_lower.is_empty() {
        return true;
    }
    // Fast path for ASCII
    if haystack.is_ascii() && prefix_lower.is_ascii() {
        let haystack = haystack.as_bytes();
        let prefix = prefix_lower.as_bytes();
        return haystack.len() >= prefix.len()
            && haystack
                .iter()
                .zip(prefix)
                .all(|(h, p)| h.to_ascii_lowercase() == *p);
    }
    let mut folded = haystack.chars().flat_map(char::to_lowercase);
    prefix_lower.chars().all(|p| folded.next() == Some(p))
}

#[cfg(test)]
mod tests {
    use super::starts_with_ignore_case;

    #[test]
    fn ascii_prefix_ignores_case() {
        assert!(starts_with_ignore_case("Blueberry", "bl"));
        assert!(starts_with_ignore_case("BLUE", "blue"));
        assert!(!starts_with_ignore_case("Banana", "bl"));
        assert!(!starts_with_ignore_case("B", "bl"));
    }

    #[test]
    fn empty_prefix_matches_everything() {
        assert!(starts_with_ignore_case("", ""));
        assert!(starts_with_ignore_case("anything", ""));
    }

    #[test]
    fn unicode_prefix_folds_case() {
        assert!(starts_with_ignore_case("Ärger", "är"));
        assert!(starts_with_ignore_case("ÉCLAIR", "écl"));
        assert!(!starts_with_ignore_case("Éclair", "ec"));
    }
}
