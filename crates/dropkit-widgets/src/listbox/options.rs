#![forbid(unsafe_code)]

//! Option registry.

use crate::error::OptionsError;

/// A single selectable item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SelectOption {
    value: String,
    label: String,
    disabled: bool,
}

impl SelectOption {
    /// Create an enabled option.
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            disabled: false,
        }
    }

    /// Mark the option as disabled (or not).
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// The option's identity within its list.
    #[inline]
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Human-readable text, also used for type-ahead matching.
    #[inline]
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether the option can be focused and committed.
    #[inline]
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.disabled
    }
}

impl From<&str> for SelectOption {
    fn from(s: &str) -> Self {
        Self::new(s, s)
    }
}

impl From<(&str, &str)> for SelectOption {
    fn from((value, label): (&str, &str)) -> Self {
        Self::new(value, label)
    }
}

/// Ordered, immutable list of options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionList {
    items: Vec<SelectOption>,
}

impl OptionList {
    /// Build a list without checking value uniqueness.
    ///
    /// Lookups by value resolve to the first match.
    #[must_use]
    pub fn new(items: impl IntoIterator<Item = impl Into<SelectOption>>) -> Self {
        Self {
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    /// Build a list, rejecting repeated values.
    pub fn try_new(
        items: impl IntoIterator<Item = impl Into<SelectOption>>,
    ) -> Result<Self, OptionsError> {
        let list = Self::new(items);
        for (duplicate, item) in list.items.iter().enumerate() {
            if let Some(first) = list.index_of(&item.value)
                && first != duplicate
            {
                return Err(OptionsError::DuplicateValue {
                    value: item.value.clone(),
                    first,
                    duplicate,
                });
            }
        }
        Ok(list)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&SelectOption> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SelectOption> {
        self.items.iter()
    }

    /// Index of the first option with `value`.
    #[must_use]
    pub fn index_of(&self, value: &str) -> Option<usize> {
        self.items.iter().position(|item| item.value == value)
    }

    /// Whether `index` names an enabled option. Out-of-range indices are not enabled.
    #[must_use]
    pub fn is_enabled(&self, index: usize) -> bool {
        self.items.get(index).is_some_and(|item| !item.disabled)
    }

    /// Whether any option can receive focus.
    #[must_use]
    pub fn has_enabled(&self) -> bool {
        self.items.iter().any(|item| !item.disabled)
    }

    #[must_use]
    pub fn first_enabled(&self) -> Option<usize> {
        self.items.iter().position(|item| !item.disabled)
    }

    #[must_use]
    pub fn last_enabled(&self) -> Option<usize> {
        self.items.iter().rposition(|item| !item.disabled)
    }
}

impl<T: Into<SelectOption>> FromIterator<T> for OptionList {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<'a> IntoIterator for &'a OptionList {
    type Item = &'a SelectOption;
    type IntoIter = std::slice::Iter<'a, SelectOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
