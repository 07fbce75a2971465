#![forbid(unsafe_code)]

//! Dismissal rules: which inputs close an open listbox.
//!
//! Every reason closes unconditionally. The reasons differ only in their side
//! effects: `Escape` hands keyboard focus back to the trigger, `Commit` writes
//! the focused option into the selection (and notifies) before closing.

use std::fmt;

use dropkit_core::event::{KeyCode, KeyEvent, MouseEvent};

/// Why an open listbox is closing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DismissReason {
    /// Pointer press outside the widget, or the window lost focus.
    OutsideInteraction,
    /// The Escape key.
    Escape,
    /// Tab or Shift+Tab moved focus away.
    TabAway,
    /// The focused option was committed as the selection.
    Commit,
}

impl DismissReason {
    /// Whether keyboard focus should return to the trigger.
    #[must_use]
    pub const fn restores_focus(self) -> bool {
        matches!(self, Self::Escape)
    }

    /// Stable name for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OutsideInteraction => "outside_interaction",
            Self::Escape => "escape",
            Self::TabAway => "tab_away",
            Self::Commit => "commit",
        }
    }
}

impl fmt::Display for DismissReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A completed dismissal, as reported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dismissal {
    pub reason: DismissReason,
    /// The host should move keyboard focus to the trigger.
    pub restore_focus: bool,
}

impl Dismissal {
    #[must_use]
    pub const fn new(reason: DismissReason) -> Self {
        Self {
            reason,
            restore_focus: reason.restores_focus(),
        }
    }
}

/// Whether `reason` closes the listbox. Always `true`.
#[must_use]
pub const fn should_close(_reason: DismissReason) -> bool {
    true
}

/// Classify a key pressed while open.
///
/// Space commits only when no type-ahead search is in progress; otherwise it
/// is part of the search text.
#[must_use]
pub fn key_reason(key: &KeyEvent, typeahead_active: bool) -> Option<DismissReason> {
    match key.code {
        KeyCode::Escape => Some(DismissReason::Escape),
        KeyCode::Tab | KeyCode::BackTab => Some(DismissReason::TabAway),
        KeyCode::Enter if !key.has_command_modifier() => Some(DismissReason::Commit),
        KeyCode::Up if key.alt() => Some(DismissReason::Commit),
        KeyCode::Char(' ') if !key.has_command_modifier() && !typeahead_active => {
            Some(DismissReason::Commit)
        }
        _ => None,
    }
}

/// Classify a pointer event while open. `inside` is whether it hit the
/// trigger or the popup.
#[must_use]
pub fn pointer_reason(event: &MouseEvent, inside: bool) -> Option<DismissReason> {
    (event.is_press() && !inside).then_some(DismissReason::OutsideInteraction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dropkit_core::event::{Modifiers, MouseButton, MouseEventKind};

    #[test]
    fn every_reason_closes() {
        for reason in [
            DismissReason::OutsideInteraction,
            DismissReason::Escape,
            DismissReason::TabAway,
            DismissReason::Commit,
        ] {
            assert!(should_close(reason));
        }
    }

    #[test]
    fn only_escape_restores_focus() {
        assert!(Dismissal::new(DismissReason::Escape).restore_focus);
        assert!(!Dismissal::new(DismissReason::TabAway).restore_focus);
        assert!(!Dismissal::new(DismissReason::Commit).restore_focus);
        assert!(!Dismissal::new(DismissReason::OutsideInteraction).restore_focus);
    }

    #[test]
    fn keys_classify() {
        let key = |code| KeyEvent::new(code);
        assert_eq!(key_reason(&key(KeyCode::Escape), false), Some(DismissReason::Escape));
        assert_eq!(key_reason(&key(KeyCode::Tab), false), Some(DismissReason::TabAway));
        assert_eq!(key_reason(&key(KeyCode::BackTab), false), Some(DismissReason::TabAway));
        assert_eq!(key_reason(&key(KeyCode::Enter), true), Some(DismissReason::Commit));
        assert_eq!(
            key_reason(&key(KeyCode::Up).with_modifiers(Modifiers::ALT), false),
            Some(DismissReason::Commit)
        );
        assert_eq!(key_reason(&key(KeyCode::Down), false), None);
        assert_eq!(key_reason(&key(KeyCode::Char('a')), false), None);
    }

    #[test]
    fn space_commits_unless_searching() {
        let space = KeyEvent::new(KeyCode::Char(' '));
        assert_eq!(key_reason(&space, false), Some(DismissReason::Commit));
        assert_eq!(key_reason(&space, true), None);
    }

    #[test]
    fn outside_press_dismisses() {
        let press = MouseEvent::new(MouseEventKind::Down(MouseButton::Left), 0, 0);
        let moved = MouseEvent::new(MouseEventKind::Moved, 0, 0);
        assert_eq!(pointer_reason(&press, false), Some(DismissReason::OutsideInteraction));
        assert_eq!(pointer_reason(&press, true), None);
        assert_eq!(pointer_reason(&moved, false), None);
    }

    #[test]
    fn reason_display() {
        assert_eq!(DismissReason::TabAway.to_string(), "tab_away");
    }
}
