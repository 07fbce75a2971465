#![forbid(unsafe_code)]

//! Trigger/toggle control: the closed-state affordance.
//!
//! Owns the open/closed flag and the disabled flag, and computes where the
//! keyboard focus lands when the popup opens. The seed is computed in the same
//! call that opens, so the first frame already highlights the right row.

use dropkit_core::event::{KeyCode, KeyEvent};

use super::options::OptionList;

/// Result of [`TriggerControl::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    /// The control was disabled; nothing changed.
    Ignored,
    /// The popup opened with this focus seed.
    Opened(Option<usize>),
    /// The popup closed.
    Closed,
}

/// Open/closed state plus the disabled flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TriggerControl {
    open: bool,
    disabled: bool,
}

impl TriggerControl {
    #[must_use]
    pub const fn new(disabled: bool) -> Self {
        Self {
            open: false,
            disabled,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    #[inline]
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Change the disabled flag. Disabling does not close; the owner does that.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Open the popup and return the focus seed.
    ///
    /// Returns `None` (no-op) when disabled or already open.
    pub fn activate(
        &mut self,
        options: &OptionList,
        selected: Option<usize>,
    ) -> Option<Option<usize>> {
        if self.disabled || self.open {
            return None;
        }
        self.open = true;
        Some(seed_focus(options, selected))
    }

    /// Flip between open and closed unless disabled.
    pub fn toggle(&mut self, options: &OptionList, selected: Option<usize>) -> Toggle {
        if self.disabled {
            return Toggle::Ignored;
        }
        if self.open {
            self.open = false;
            Toggle::Closed
        } else {
            self.open = true;
            Toggle::Opened(seed_focus(options, selected))
        }
    }

    /// Close the popup. Returns `true` if it was open.
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }
}

/// Where focus lands on open: the selected option if it can take focus,
/// otherwise the first enabled option, otherwise nowhere.
#[must_use]
pub fn seed_focus(options: &OptionList, selected: Option<usize>) -> Option<usize> {
    selected
        .filter(|&index| options.is_enabled(index))
        .or_else(|| options.first_enabled())
}

/// Keys that open a closed listbox whose trigger has focus.
#[must_use]
pub fn opens_on_key(key: &KeyEvent) -> bool {
    if key.ctrl() || key.super_key() {
        return false;
    }
    match key.code {
        KeyCode::Down => true,
        KeyCode::Enter | KeyCode::Up | KeyCode::Char(' ') => !key.alt(),
        _ => false,
    }
}
