#![forbid(unsafe_code)]

//! Accessibility projection.
//!
//! [`project`] turns the listbox state into the role/attribute contract that
//! assistive technology reads. It holds no state: the same inputs always give
//! the same tree, so it can be re-derived on every frame.
//!
//! # Identifier scheme
//!
//! | Element | id |
//! |---------|----|
//! | trigger | `<base>-trigger` |
//! | listbox | `<base>-listbox` |
//! | option *i* | `<base>-option-<i>` |
//!
//! # Focus model
//!
//! DOM focus stays on the trigger (the combobox) for the widget's whole life,
//! open or closed. While open, the trigger's `aria-activedescendant` names the
//! keyboard-focused option, so assistive technology announces that option
//! without focus ever moving into the popup.

use std::fmt;

use super::options::OptionList;

/// Semantic role of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// The closed-state control that owns the popup.
    Combobox,
    /// The popup containing the options.
    Listbox,
    /// One selectable entry.
    Option,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Combobox => "combobox",
            Self::Listbox => "listbox",
            Self::Option => "option",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the projection reads.
#[derive(Debug, Clone, Copy)]
pub struct A11yInput<'a> {
    pub base_id: &'a str,
    pub label: Option<&'a str>,
    pub disabled: bool,
    pub open: bool,
    pub focused: Option<usize>,
    pub selected: Option<usize>,
    pub options: &'a OptionList,
}

/// Attributes of the trigger element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerNode {
    pub id: String,
    pub role: Role,
    pub label: Option<String>,
    pub expanded: bool,
    /// Id of the popup this trigger controls.
    pub controls: String,
    /// Id of the keyboard-focused option, only while open.
    pub active_descendant: Option<String>,
    pub disabled: bool,
}

/// Attributes of the popup element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListboxNode {
    pub id: String,
    pub role: Role,
    pub label: Option<String>,
    pub hidden: bool,
}

/// Attributes of one option element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionNode {
    pub id: String,
    pub role: Role,
    pub label: String,
    pub selected: bool,
    pub disabled: bool,
    /// The keyboard-focused option (visual highlight only; DOM focus stays on the trigger).
    pub active: bool,
    /// 1-based position.
    pub pos_in_set: usize,
    pub set_size: usize,
}

/// Full projection of one listbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct A11yTree {
    pub trigger: TriggerNode,
    pub listbox: ListboxNode,
    pub options: Vec<OptionNode>,
}

#[must_use]
pub fn trigger_id(base_id: &str) -> String {
    format!("{base_id}-trigger")
}

#[must_use]
pub fn listbox_id(base_id: &str) -> String {
    format!("{base_id}-listbox")
}

#[must_use]
pub fn option_id(base_id: &str, index: usize) -> String {
    format!("{base_id}-option-{index}")
}

/// Derive the accessibility tree from listbox state.
#[must_use]
pub fn project(input: &A11yInput<'_>) -> A11yTree {
    let listbox = listbox_id(input.base_id);
    let label = input.label.map(str::to_owned);
    let set_size = input.options.len();

    let options = input
        .options
        .iter()
        .enumerate()
        .map(|(index, option)| OptionNode {
            id: option_id(input.base_id, index),
            role: Role::Option,
            label: option.label().to_owned(),
            selected: input.selected == Some(index),
            disabled: option.is_disabled(),
            active: input.open && input.focused == Some(index),
            pos_in_set: index + 1,
            set_size,
        })
        .collect();

    let active_descendant = input
        .focused
        .filter(|&index| input.open && index < set_size)
        .map(|index| option_id(input.base_id, index));

    A11yTree {
        trigger: TriggerNode {
            id: trigger_id(input.base_id),
            role: Role::Combobox,
            label: label.clone(),
            expanded: input.open,
            controls: listbox.clone(),
            active_descendant,
            disabled: input.disabled,
        },
        listbox: ListboxNode {
            id: listbox,
            role: Role::Listbox,
            label,
            hidden: !input.open,
        },
        options,
    }
}

fn bool_attr(value: bool) -> String {
    value.to_string()
}

impl TriggerNode {
    /// ARIA attribute pairs, in a stable order.
    #[must_use]
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        let mut attrs = vec![
            ("id", self.id.clone()),
            ("role", self.role.to_string()),
            ("aria-haspopup", Role::Listbox.to_string()),
            ("aria-expanded", bool_attr(self.expanded)),
            ("aria-controls", self.controls.clone()),
        ];
        if let Some(label) = &self.label {
            attrs.push(("aria-label", label.clone()));
        }
        if let Some(active) = &self.active_descendant {
            attrs.push(("aria-activedescendant", active.clone()));
        }
        if self.disabled {
            attrs.push(("aria-disabled", bool_attr(true)));
        }
        attrs
    }
}

impl ListboxNode {
    /// ARIA attribute pairs, in a stable order.
    #[must_use]
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        let mut attrs = vec![("id", self.id.clone()), ("role", self.role.to_string())];
        if let Some(label) = &self.label {
            attrs.push(("aria-label", label.clone()));
        }
        if self.hidden {
            attrs.push(("hidden", bool_attr(true)));
        }
        attrs
    }
}

impl OptionNode {
    /// ARIA attribute pairs, in a stable order.
    #[must_use]
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        let mut attrs = vec![
            ("id", self.id.clone()),
            ("role", self.role.to_string()),
            ("aria-selected", bool_attr(self.selected)),
            ("aria-posinset", self.pos_in_set.to_string()),
            ("aria-setsize", self.set_size.to_string()),
        ];
        if self.disabled {
            attrs.push(("aria-disabled", bool_attr(true)));
        }
        attrs
    }
}

impl A11yTree {
    /// The option node the trigger's `aria-activedescendant` points at, if any.
    #[must_use]
    pub fn active_option(&self) -> Option<&OptionNode> {
        let active = self.trigger.active_descendant.as_deref()?;
        self.options.iter().find(|node| node.id == active)
    }

    /// The option node carrying `aria-selected="true"`, if any.
    #[must_use]
    pub fn selected_option(&self) -> Option<&OptionNode> {
        self.options.iter().find(|node| node.selected)
    }
}
