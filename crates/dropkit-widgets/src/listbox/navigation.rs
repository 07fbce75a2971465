#![forbid(unsafe_code)]

//! Keyboard focus movement across an option list.
//!
//! Movement never wraps: `Next` at the last enabled option and `Previous` at
//! the first one leave the focus where it is. Disabled options are skipped and
//! are never returned.

use dropkit_core::event::{KeyCode, KeyEvent};

use super::options::OptionList;

/// Direction of a focus move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavDirection {
    /// The next enabled option after the focused one.
    Next,
    /// The previous enabled option before the focused one.
    Previous,
    /// The first enabled option.
    First,
    /// The last enabled option.
    Last,
}

impl NavDirection {
    /// Map a key to a direction: arrows, `Home`/`End`, `PageUp`/`PageDown`.
    ///
    /// Keys with a command modifier held do not navigate.
    #[must_use]
    pub fn from_key(key: &KeyEvent) -> Option<Self> {
        if key.has_command_modifier() {
            return None;
        }
        match key.code {
            KeyCode::Down => Some(Self::Next),
            KeyCode::Up => Some(Self::Previous),
            KeyCode::Home | KeyCode::PageUp => Some(Self::First),
            KeyCode::End | KeyCode::PageDown => Some(Self::Last),
            _ => None,
        }
    }
}

/// Compute the focused index after moving in `direction`.
#[must_use]
pub fn move_focus(
    options: &OptionList,
    focused: Option<usize>,
    direction: NavDirection,
) -> Option<usize> {
    match direction {
        NavDirection::Next => {
            let start = focused.map_or(0, |index| index + 1);
            (start..options.len())
                .find(|&index| options.is_enabled(index))
                .or(focused)
        }
        NavDirection::Previous => match focused {
            Some(index) => (0..index)
                .rev()
                .find(|&candidate| options.is_enabled(candidate))
                .or(focused),
            None => None,
        },
        NavDirection::First => options.first_enabled(),
        NavDirection::Last => options.last_enabled(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listbox::options::SelectOption;
    use dropkit_core::event::Modifiers;

    fn list(disabled: &[bool]) -> OptionList {
        OptionList::new(
            disabled
                .iter()
                .enumerate()
                .map(|(i, &d)| SelectOption::new(i.to_string(), format!("Item {i}")).disabled(d)),
        )
    }

    #[test]
    fn next_skips_disabled() {
        let options = list(&[false, true, false]);
        assert_eq!(move_focus(&options, Some(0), NavDirection::Next), Some(2));
    }

    #[test]
    fn next_clamps_at_last_enabled() {
        let options = list(&[false, false, true]);
        assert_eq!(move_focus(&options, Some(1), NavDirection::Next), Some(1));
        assert_eq!(move_focus(&options, Some(1), NavDirection::Next), Some(1));
    }

    #[test]
    fn previous_skips_disabled_and_clamps() {
        let options = list(&[true, false, true, false]);
        assert_eq!(move_focus(&options, Some(3), NavDirection::Previous), Some(1));
        assert_eq!(move_focus(&options, Some(1), NavDirection::Previous), Some(1));
    }

    #[test]
    fn first_and_last_pick_enabled_bounds() {
        let options = list(&[true, false, false, true]);
        assert_eq!(move_focus(&options, Some(2), NavDirection::First), Some(1));
        assert_eq!(move_focus(&options, Some(1), NavDirection::Last), Some(2));
    }

    #[test]
    fn all_disabled_yields_none() {
        let options = list(&[true, true]);
        assert_eq!(move_focus(&options, None, NavDirection::First), None);
        assert_eq!(move_focus(&options, None, NavDirection::Last), None);
        assert_eq!(move_focus(&options, None, NavDirection::Next), None);
        assert_eq!(move_focus(&options, None, NavDirection::Previous), None);
    }

    #[test]
    fn empty_list_is_a_no_op() {
        let options = OptionList::default();
        for direction in [
            NavDirection::Next,
            NavDirection::Previous,
            NavDirection::First,
            NavDirection::Last,
        ] {
            assert_eq!(move_focus(&options, None, direction), None);
        }
    }

    #[test]
    fn next_from_unfocused_starts_at_top() {
        let options = list(&[true, false]);
        assert_eq!(move_focus(&options, None, NavDirection::Next), Some(1));
    }

    #[test]
    fn keys_map_to_directions() {
        let key = |code| KeyEvent::new(code);
        assert_eq!(NavDirection::from_key(&key(KeyCode::Down)), Some(NavDirection::Next));
        assert_eq!(NavDirection::from_key(&key(KeyCode::Up)), Some(NavDirection::Previous));
        assert_eq!(NavDirection::from_key(&key(KeyCode::Home)), Some(NavDirection::First));
        assert_eq!(NavDirection::from_key(&key(KeyCode::PageDown)), Some(NavDirection::Last));
        assert_eq!(NavDirection::from_key(&key(KeyCode::Enter)), None);
        assert_eq!(
            NavDirection::from_key(&key(KeyCode::Down).with_modifiers(Modifiers::ALT)),
            None
        );
    }
}
