//! Property-based tests for the listbox state machine.
//!
//! Random option lists (with random disabled flags) are driven by random
//! operation sequences. After every step:
//!
//! 1. **Focus validity**: while open with any enabled option, the focused
//!    index names an enabled option; with none, nothing is focused.
//! 2. **Closed hygiene**: while closed, the type-ahead buffer is empty, no
//!    reset is pending, and no listener subscription is held.
//! 3. **Commit accounting**: `on_select` fires exactly once per
//!    `Committed` outcome, with the option that became selected.
//! 4. **Projection consistency**: the trigger's active descendant matches
//!    the focused index while open.
//! 5. **Empty list**: with no options, typing never arms a search.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use dropkit_core::event::{Event, KeyCode, KeyEvent};
use dropkit_core::listeners::ListenerRegistry;
use dropkit_widgets::listbox::{Dropdown, NavDirection, Outcome, SelectOption};
use proptest::prelude::*;
use web_time::Instant;

#[derive(Debug, Clone)]
enum Op {
    Activate,
    Toggle,
    Key(KeyCode),
    Type(char),
    Wait(u64),
    Blur,
    Nav(NavDirection),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Activate),
        Just(Op::Toggle),
        Just(Op::Blur),
        prop_oneof![
            Just(KeyCode::Enter),
            Just(KeyCode::Escape),
            Just(KeyCode::Tab),
            Just(KeyCode::Up),
            Just(KeyCode::Down),
            Just(KeyCode::Home),
            Just(KeyCode::End),
            Just(KeyCode::Char(' ')),
        ]
        .prop_map(Op::Key),
        prop::sample::select(vec!['a', 'b', 'c', 'x']).prop_map(Op::Type),
        (0u64..1_000).prop_map(Op::Wait),
        prop_oneof![
            Just(NavDirection::Next),
            Just(NavDirection::Previous),
            Just(NavDirection::First),
            Just(NavDirection::Last),
        ]
        .prop_map(Op::Nav),
    ]
}

fn options_strategy() -> impl Strategy<Value = Vec<SelectOption>> {
    prop::collection::vec(
        (prop::sample::select(vec!["apple", "avocado", "banana", "cherry", "citrus"]), any::<bool>()),
        0..8,
    )
    .prop_map(|items| {
        items
            .into_iter()
            .enumerate()
            .map(|(i, (label, disabled))| {
                SelectOption::new(format!("{label}-{i}"), label).disabled(disabled)
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn state_machine_invariants_hold(
        options in options_strategy(),
        ops in prop::collection::vec(op_strategy(), 1..60),
    ) {
        let registry = ListenerRegistry::new();
        let seen = Rc::new(RefCell::new(Vec::<String>::new()));
        let sink = Rc::clone(&seen);
        let mut dropdown = Dropdown::new(options.clone())
            .listeners(registry.clone())
            .on_select(move |option| sink.borrow_mut().push(option.value().to_owned()));

        let any_enabled = options.iter().any(|o| !o.is_disabled());
        let no_options = options.is_empty();
        let mut now = Instant::now();
        let mut commits = 0usize;

        for op in ops {
            let outcome = match op {
                Op::Activate => dropdown.activate(),
                Op::Toggle => dropdown.toggle(),
                Op::Key(code) => dropdown.handle_key(&KeyEvent::new(code), now),
                Op::Type(c) => dropdown.handle_key(&KeyEvent::new(KeyCode::Char(c)), now),
                Op::Wait(ms) => {
                    now += Duration::from_millis(ms);
                    dropdown.tick(now);
                    Outcome::Consumed
                }
                Op::Blur => dropdown.handle_event(&Event::Focus(false), now),
                Op::Nav(direction) => dropdown.move_focus(direction),
            };

            if let Outcome::Committed { index } = outcome {
                commits += 1;
                prop_assert_eq!(dropdown.selected_index(), Some(index));
                let last = seen.borrow().last().cloned();
                prop_assert_eq!(last.as_deref(), Some(options[index].value()));
                prop_assert!(!options[index].is_disabled());
            }
            prop_assert_eq!(seen.borrow().len(), commits);

            if dropdown.is_open() {
                match dropdown.focused() {
                    Some(index) => prop_assert!(!options[index].is_disabled()),
                    None => prop_assert!(!any_enabled),
                }
                prop_assert_eq!(registry.active_count(), 1);
                let tree = dropdown.accessibility();
                let expected = dropdown
                    .focused()
                    .map(|i| format!("{}-option-{i}", dropdown.base_id()));
                prop_assert_eq!(tree.trigger.active_descendant, expected);
                if no_options {
                    prop_assert_eq!(dropdown.typeahead_buffer(), "");
                    prop_assert_eq!(dropdown.next_deadline(), None);
                }
            } else {
                prop_assert_eq!(dropdown.typeahead_buffer(), "");
                prop_assert_eq!(dropdown.next_deadline(), None);
                prop_assert_eq!(registry.active_count(), 0);
                prop_assert_eq!(dropdown.accessibility().trigger.active_descendant, None);
            }
        }

        drop(dropdown);
        prop_assert_eq!(registry.active_count(), 0);
    }

    #[test]
    fn repeated_next_is_monotone_and_clamps(options in options_strategy(), steps in 1usize..20) {
        let mut dropdown = Dropdown::new(options.clone());
        dropdown.activate();
        let last = options.iter().rposition(|o| !o.is_disabled());
        let mut prev = dropdown.focused();
        for _ in 0..steps {
            dropdown.move_focus(NavDirection::Next);
            let current = dropdown.focused();
            prop_assert!(current >= prev);
            prev = current;
        }
        if steps >= options.len() {
            prop_assert_eq!(dropdown.focused(), last);
        }
    }
}
