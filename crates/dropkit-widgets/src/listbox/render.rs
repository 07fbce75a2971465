#![forbid(unsafe_code)]

//! Option rendering strategy.
//!
//! Call sites that want icons, badges, or custom disabled styling implement
//! [`OptionRenderer`], whose one capability is turning an option plus its
//! [`OptionState`] into a row of text. Closures with the same shape implement
//! it too. [`MarkerRenderer`] is the stock strategy.

use bitflags::bitflags;
use unicode_width::UnicodeWidthChar;

use super::options::SelectOption;
use crate::config::DropdownConfig;

bitflags! {
    /// Per-row state handed to an [`OptionRenderer`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct OptionState: u8 {
        /// Keyboard focus is on this row.
        const ACTIVE   = 0b001;
        /// This row is the committed selection.
        const SELECTED = 0b010;
        /// This row cannot be focused or committed.
        const DISABLED = 0b100;
    }
}

impl OptionState {
    /// State of the option at `index`.
    #[must_use]
    pub fn of(
        option: &SelectOption,
        index: usize,
        focused: Option<usize>,
        selected: Option<usize>,
    ) -> Self {
        let mut state = Self::empty();
        state.set(Self::ACTIVE, focused == Some(index));
        state.set(Self::SELECTED, selected == Some(index));
        state.set(Self::DISABLED, option.is_disabled());
        state
    }
}

/// Renders one option row.
pub trait OptionRenderer {
    /// Render `option` in `state`, fitting within `width` columns.
    fn render_option(&self, option: &SelectOption, state: OptionState, width: u16) -> String;
}

impl<F> OptionRenderer for F
where
    F: Fn(&SelectOption, OptionState, u16) -> String,
{
    fn render_option(&self, option: &SelectOption, state: OptionState, width: u16) -> String {
        self(option, state, width)
    }
}

/// Stock renderer: highlight prefix, selected prefix, label, disabled suffix.
///
/// Prefixes are padded to a fixed column so labels stay aligned whether or
/// not a row is active or selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerRenderer {
    highlight_symbol: String,
    selected_symbol: String,
    disabled_suffix: String,
}

impl Default for MarkerRenderer {
    fn default() -> Self {
        Self::from_config(&DropdownConfig::default())
    }
}

impl MarkerRenderer {
    #[must_use]
    pub fn from_config(config: &DropdownConfig) -> Self {
        Self {
            highlight_symbol: config.highlight_symbol.clone(),
            selected_symbol: config.selected_symbol.clone(),
            disabled_suffix: config.disabled_suffix.clone(),
        }
    }
}

impl OptionRenderer for MarkerRenderer {
    fn render_option(&self, option: &SelectOption, state: OptionState, width: u16) -> String {
        let mut line = String::new();
        push_marker(&mut line, &self.highlight_symbol, state.contains(OptionState::ACTIVE));
        push_marker(&mut line, &self.selected_symbol, state.contains(OptionState::SELECTED));
        line.push_str(option.label());
        if state.contains(OptionState::DISABLED) {
            line.push_str(&self.disabled_suffix);
        }
        truncate_to_width(&line, width)
    }
}

fn push_marker(line: &mut String, symbol: &str, on: bool) {
    if on {
        line.push_str(symbol);
    } else {
        line.extend(std::iter::repeat_n(' ', display_width(symbol)));
    }
}

/// Display width of `text` in terminal columns.
#[must_use]
pub fn display_width(text: &str) -> usize {
    text.chars().map(|c| c.width().unwrap_or(0)).sum()
}

/// Clip `text` to at most `width` columns without splitting a wide character.
#[must_use]
pub fn truncate_to_width(text: &str, width: u16) -> String {
    let max = usize::from(width);
    let mut used = 0;
    let mut out = String::with_capacity(text.len().min(max * 4));
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option() -> SelectOption {
        SelectOption::new("eur", "Euro")
    }

    #[test]
    fn state_flags() {
        let state = OptionState::of(&option(), 2, Some(2), Some(1));
        assert_eq!(state, OptionState::ACTIVE);
        let state = OptionState::of(&option().disabled(true), 1, Some(2), Some(1));
        assert_eq!(state, OptionState::SELECTED | OptionState::DISABLED);
    }

    #[test]
    fn marker_renderer_aligns_labels() {
        let renderer = MarkerRenderer::default();
        let plain = renderer.render_option(&option(), OptionState::empty(), 40);
        let active = renderer.render_option(&option(), OptionState::ACTIVE, 40);
        let selected = renderer.render_option(&option(), OptionState::SELECTED, 40);
        assert_eq!(plain, "    Euro");
        assert_eq!(active, ">   Euro");
        assert_eq!(selected, "  ✓ Euro");
    }

    #[test]
    fn marker_renderer_marks_disabled() {
        let renderer = MarkerRenderer::default();
        let line = renderer.render_option(&option(), OptionState::DISABLED, 40);
        assert_eq!(line, "    Euro (disabled)");
    }

    #[test]
    fn closures_are_renderers() {
        let renderer = |option: &SelectOption, state: OptionState, _width: u16| {
            format!("{}{}", if state.is_empty() { "" } else { "*" }, option.value())
        };
        assert_eq!(renderer.render_option(&option(), OptionState::ACTIVE, 10), "*eur");
    }

    #[test]
    fn truncation_respects_wide_chars() {
        assert_eq!(truncate_to_width("hello", 3), "hel");
        assert_eq!(truncate_to_width("日本語", 5), "日本");
        assert_eq!(truncate_to_width("abc", 0), "");
        assert_eq!(display_width("日本"), 4);
    }
}
