#![forbid(unsafe_code)]

//! The composed dropdown widget.
//!
//! [`Dropdown`] owns the selection state, routes input to the trigger,
//! navigation, type-ahead, and dismissal rules, and reports what happened as
//! an [`Outcome`]. The committed selection is announced through the
//! `on_select` callback, exactly once per commit and before the popup closes.
//!
//! # Time
//!
//! The widget never reads the clock. Handlers that can start or extend a
//! type-ahead search take `now`; the host calls [`Dropdown::tick`] from its
//! timer loop and may use [`Dropdown::next_deadline`] to schedule the wakeup.
//!
//! # Document-level input
//!
//! When built with a [`ListenerRegistry`], the widget holds a subscription for
//! outside pointer presses and window blur while open, and releases it on
//! every close path and on drop. The host routes those events to
//! [`Dropdown::handle_event`] for every id in the registry's subscriber list.
//!
//! # Example
//!
//! ```
//! use dropkit_core::event::{KeyCode, KeyEvent};
//! use dropkit_widgets::listbox::{Dropdown, SelectOption};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use web_time::Instant;
//!
//! let picked = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&picked);
//! let mut dropdown = Dropdown::new(["Apple", "Banana", "Blueberry"])
//!     .aria_label("Fruit")
//!     .on_select(move |option| sink.borrow_mut().push(option.value().to_owned()));
//!
//! let now = Instant::now();
//! dropdown.activate();
//! dropdown.handle_key(&KeyEvent::new(KeyCode::Char('b')), now);
//! dropdown.handle_key(&KeyEvent::new(KeyCode::Char('l')), now);
//! dropdown.handle_key(&KeyEvent::new(KeyCode::Enter), now);
//! assert_eq!(*picked.borrow(), ["Blueberry"]);
//! ```

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use dropkit_core::event::{Event, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use dropkit_core::geometry::Rect;
use dropkit_core::listeners::{ListenerGuard, ListenerId, ListenerKinds, ListenerRegistry};
use web_time::Instant;

use super::a11y::{self, A11yInput, A11yTree};
use super::dismissal::{self, DismissReason, Dismissal};
use super::navigation::{self, NavDirection};
use super::options::{OptionList, SelectOption};
use super::render::{MarkerRenderer, OptionRenderer, OptionState, truncate_to_width};
use super::trigger::{self, Toggle, TriggerControl};
use super::typeahead::TypeaheadMatcher;
use crate::config::DropdownConfig;

/// Global counter for generated widget ids.
static LISTBOX_COUNTER: AtomicU32 = AtomicU32::new(1);

/// Generate a unique base id for a widget built without one.
fn next_base_id() -> String {
    format!("dropkit-listbox-{}", LISTBOX_COUNTER.fetch_add(1, Ordering::Relaxed))
}

const OPEN_INDICATOR: &str = "▴";
const CLOSED_INDICATOR: &str = "▾";

/// What a handler did with its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The input was not for this widget; the host should keep routing it.
    Ignored,
    /// The input was handled but nothing visible changed.
    Consumed,
    /// The popup opened with this focus.
    Opened { focused: Option<usize> },
    /// The popup closed through the trigger toggle.
    Closed,
    /// Keyboard focus moved between options.
    FocusMoved {
        from: Option<usize>,
        to: Option<usize>,
    },
    /// The popup was dismissed without a selection change.
    Dismissed(Dismissal),
    /// The option at `index` became the selection and the popup closed.
    Committed { index: usize },
}

impl Outcome {
    /// Whether the host should stop propagating the input.
    #[must_use]
    pub const fn is_handled(&self) -> bool {
        !matches!(self, Self::Ignored)
    }

    /// Whether the host should move keyboard focus back to the trigger.
    #[must_use]
    pub const fn restores_focus(&self) -> bool {
        matches!(self, Self::Dismissed(d) if d.restore_focus)
    }
}

type SelectCallback = Box<dyn FnMut(&SelectOption)>;

/// Accessible single-select listbox.
pub struct Dropdown {
    base_id: String,
    options: OptionList,
    selected: Option<usize>,
    focused: Option<usize>,
    trigger: TriggerControl,
    typeahead: TypeaheadMatcher,
    placeholder: String,
    aria_label: Option<String>,
    name: Option<String>,
    on_select: Option<SelectCallback>,
    listeners: Option<ListenerRegistry>,
    subscription: Option<ListenerGuard>,
    trigger_area: Rect,
    popup_area: Rect,
    /// First option row visible in the popup.
    offset: usize,
    config: DropdownConfig,
    renderer: Box<dyn OptionRenderer>,
}

impl fmt::Debug for Dropdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dropdown")
            .field("base_id", &self.base_id)
            .field("options", &self.options.len())
            .field("selected", &self.selected)
            .field("focused", &self.focused)
            .field("open", &self.trigger.is_open())
            .field("disabled", &self.trigger.is_disabled())
            .field("typeahead", &self.typeahead.buffer())
            .field("subscribed", &self.subscription.is_some())
            .finish_non_exhaustive()
    }
}

impl Dropdown {
    /// Mount a closed dropdown over `options` with no selection.
    #[must_use]
    pub fn new(options: impl IntoIterator<Item = impl Into<SelectOption>>) -> Self {
        let config = DropdownConfig::default();
        Self {
            base_id: next_base_id(),
            options: OptionList::new(options),
            selected: None,
            focused: None,
            trigger: TriggerControl::default(),
            typeahead: TypeaheadMatcher::new(config.typeahead_timeout()),
            placeholder: String::new(),
            aria_label: None,
            name: None,
            on_select: None,
            listeners: None,
            subscription: None,
            trigger_area: Rect::default(),
            popup_area: Rect::default(),
            offset: 0,
            renderer: Box::new(MarkerRenderer::from_config(&config)),
            config,
        }
    }

    /// Mount over an already-built [`OptionList`].
    #[must_use]
    pub fn from_list(options: OptionList) -> Self {
        let mut dropdown = Self::new(std::iter::empty::<SelectOption>());
        dropdown.options = options;
        dropdown
    }

    // --- Builder ------------------------------------------------------------

    /// Seed the selection by value. Unknown values mean "no selection".
    #[must_use]
    pub fn selected(mut self, value: Option<&str>) -> Self {
        self.set_selected(value);
        self
    }

    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.set_disabled(disabled);
        self
    }

    #[must_use]
    pub fn aria_label(mut self, label: impl Into<String>) -> Self {
        self.aria_label = Some(label.into());
        self
    }

    /// Form-field name, reported by [`form_value`](Self::form_value).
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Base for the accessibility ids. Defaults to a generated unique id.
    #[must_use]
    pub fn id(mut self, base_id: impl Into<String>) -> Self {
        self.base_id = base_id.into();
        self
    }

    /// Callback invoked once per committed selection.
    #[must_use]
    pub fn on_select(mut self, callback: impl FnMut(&SelectOption) + 'static) -> Self {
        self.on_select = Some(Box::new(callback));
        self
    }

    /// Registry used for outside-pointer and blur subscriptions while open.
    #[must_use]
    pub fn listeners(mut self, registry: ListenerRegistry) -> Self {
        self.listeners = Some(registry);
        self
    }

    /// Replace the configuration. Resets the renderer to a [`MarkerRenderer`]
    /// built from it; call [`renderer`](Self::renderer) afterwards to override.
    ///
    /// Unlike the file loaders this does not reject invalid values: an
    /// out-of-range type-ahead window is clamped by
    /// [`DropdownConfig::typeahead_timeout`].
    #[must_use]
    pub fn config(mut self, config: DropdownConfig) -> Self {
        #[cfg(feature = "tracing")]
        for problem in config.validate() {
            tracing::warn!(message = "dropdown.config_invalid", id = %self.base_id, problem = %problem);
        }
        self.typeahead.set_timeout(config.typeahead_timeout());
        self.renderer = Box::new(MarkerRenderer::from_config(&config));
        self.config = config;
        self
    }

    #[must_use]
    pub fn renderer(mut self, renderer: impl OptionRenderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    // --- Accessors ----------------------------------------------------------

    #[inline]
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.trigger.is_open()
    }

    #[inline]
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.trigger.is_disabled()
    }

    /// Index of the keyboard-focused option. `None` while closed is stale
    /// state and should not be rendered.
    #[inline]
    #[must_use]
    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    #[inline]
    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn selected_option(&self) -> Option<&SelectOption> {
        self.selected.and_then(|index| self.options.get(index))
    }

    #[must_use]
    pub fn options(&self) -> &OptionList {
        &self.options
    }

    #[must_use]
    pub fn base_id(&self) -> &str {
        &self.base_id
    }

    #[must_use]
    pub fn config_ref(&self) -> &DropdownConfig {
        &self.config
    }

    /// Current type-ahead search text (lowercased).
    #[must_use]
    pub fn typeahead_buffer(&self) -> &str {
        self.typeahead.buffer()
    }

    /// Id of the live document-level subscription, while open.
    #[must_use]
    pub fn listener_id(&self) -> Option<ListenerId> {
        self.subscription.as_ref().map(ListenerGuard::id)
    }

    /// When the host should call [`tick`](Self::tick) next, if anything is pending.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.typeahead.deadline()
    }

    /// `(name, value)` of the committed selection for form submission.
    #[must_use]
    pub fn form_value(&self) -> Option<(&str, &str)> {
        let name = self.name.as_deref()?;
        let option = self.selected_option()?;
        Some((name, option.value()))
    }

    // --- External updates ---------------------------------------------------

    /// Sync the selection from outside (controlled usage). Does not notify.
    pub fn set_selected(&mut self, value: Option<&str>) {
        self.selected = value.and_then(|value| self.options.index_of(value));
    }

    /// Replace the options, keeping the selection and focus by value.
    pub fn set_options(&mut self, options: impl IntoIterator<Item = impl Into<SelectOption>>) {
        let selected_value = self.selected_option().map(|o| o.value().to_owned());
        let focused_value = self
            .focused
            .and_then(|index| self.options.get(index))
            .map(|o| o.value().to_owned());

        self.options = OptionList::new(options);
        self.selected = selected_value.and_then(|value| self.options.index_of(&value));
        self.offset = 0;

        if self.is_open() {
            self.focused = focused_value
                .and_then(|value| self.options.index_of(&value))
                .filter(|&index| self.options.is_enabled(index))
                .or_else(|| trigger::seed_focus(&self.options, self.selected));
            self.scroll_focused_into_view();
        } else {
            self.focused = None;
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "dropdown.options",
            id = %self.base_id,
            option_count = self.options.len(),
            selected = ?self.selected,
            focused = ?self.focused
        );
    }

    /// Enable or disable the widget. Disabling an open widget closes it.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.trigger.set_disabled(disabled);
        if disabled && self.is_open() {
            self.close();
        }
    }

    /// Where the trigger and the popup are drawn, for pointer hit testing.
    ///
    /// The popup height also bounds how many option rows are visible.
    pub fn set_layout(&mut self, trigger_area: Rect, popup_area: Rect) {
        self.trigger_area = trigger_area;
        self.popup_area = popup_area;
        self.scroll_focused_into_view();
    }

    // --- Operations ---------------------------------------------------------

    /// Open the popup and seed the focus. No-op when disabled or already open.
    pub fn activate(&mut self) -> Outcome {
        match self.trigger.activate(&self.options, self.selected) {
            Some(seed) => self.opened(seed),
            None => Outcome::Ignored,
        }
    }

    /// Flip between open and closed. No-op when disabled.
    pub fn toggle(&mut self) -> Outcome {
        match self.trigger.toggle(&self.options, self.selected) {
            Toggle::Ignored => Outcome::Ignored,
            Toggle::Opened(seed) => self.opened(seed),
            Toggle::Closed => {
                self.close();
                Outcome::Closed
            }
        }
    }

    /// Move keyboard focus. No-op while closed.
    pub fn move_focus(&mut self, direction: NavDirection) -> Outcome {
        if !self.is_open() {
            return Outcome::Ignored;
        }
        let to = navigation::move_focus(&self.options, self.focused, direction);
        self.focus_to(to)
    }

    /// Feed one type-ahead character. No-op while closed or with no options.
    pub fn type_char(&mut self, ch: char, now: Instant) -> Outcome {
        if !self.is_open() {
            return Outcome::Ignored;
        }
        // Nothing to search: leave the buffer empty so Space still commits.
        if self.options.is_empty() {
            return Outcome::Consumed;
        }
        let to = self
            .typeahead
            .on_character(ch, now, &self.options, self.focused);
        self.focus_to(to)
    }

    /// Commit the focused option: update the selection, notify, then close.
    ///
    /// With nothing focusable the widget stays open and this is a no-op.
    pub fn commit(&mut self) -> Outcome {
        if !self.is_open() {
            return Outcome::Ignored;
        }
        let Some(index) = self.focused.filter(|&index| self.options.is_enabled(index)) else {
            return Outcome::Consumed;
        };

        self.selected = Some(index);
        if let (Some(callback), Some(option)) = (self.on_select.as_mut(), self.options.get(index)) {
            callback(option);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "dropdown.commit",
            id = %self.base_id,
            selected = index
        );

        self.close();
        Outcome::Committed { index }
    }

    /// Close for `reason`. [`DismissReason::Commit`] delegates to [`commit`](Self::commit).
    ///
    /// Idempotent: dismissing a closed widget is a no-op.
    pub fn dismiss(&mut self, reason: DismissReason) -> Outcome {
        if !self.is_open() || !dismissal::should_close(reason) {
            return Outcome::Ignored;
        }
        if reason == DismissReason::Commit {
            return self.commit();
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "dropdown.dismiss",
            id = %self.base_id,
            reason = reason.as_str()
        );

        self.close();
        Outcome::Dismissed(Dismissal::new(reason))
    }

    /// Fire the type-ahead decay if due. Returns `true` if the buffer reset.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.typeahead.tick(now)
    }

    // --- Event routing ------------------------------------------------------

    /// Route any input event.
    pub fn handle_event(&mut self, event: &Event, now: Instant) -> Outcome {
        match event {
            Event::Key(key) => self.handle_key(key, now),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Focus(false) => self.dismiss(DismissReason::OutsideInteraction),
            Event::Focus(true) => Outcome::Ignored,
        }
    }

    /// Route a key event delivered to the trigger, which keeps DOM focus while open.
    pub fn handle_key(&mut self, key: &KeyEvent, now: Instant) -> Outcome {
        if !key.is_actionable() || self.is_disabled() {
            return Outcome::Ignored;
        }

        if !self.is_open() {
            return if trigger::opens_on_key(key) {
                self.activate()
            } else {
                Outcome::Ignored
            };
        }

        // Space must see an up-to-date buffer to decide between commit and search.
        self.typeahead.tick(now);

        if let Some(reason) = dismissal::key_reason(key, self.typeahead.is_active()) {
            return self.dismiss(reason);
        }
        if let Some(direction) = NavDirection::from_key(key) {
            return self.move_focus(direction);
        }
        if let Some(ch) = key.printable_char() {
            return self.type_char(ch, now);
        }
        Outcome::Ignored
    }

    /// Route a pointer event. `set_layout` must have been called for hits to register.
    pub fn handle_mouse(&mut self, event: &MouseEvent) -> Outcome {
        if self.is_disabled() {
            return Outcome::Ignored;
        }

        let on_trigger = self.trigger_area.contains(event.x, event.y);
        let popup_row = if self.is_open() {
            self.popup_area.row_of(event.x, event.y)
        } else {
            None
        };

        if self.is_open()
            && let Some(reason) = dismissal::pointer_reason(event, on_trigger || popup_row.is_some())
        {
            return self.dismiss(reason);
        }

        match event.kind {
            MouseEventKind::Down(MouseButton::Left) if on_trigger => self.toggle(),
            MouseEventKind::Down(MouseButton::Left) => match popup_row {
                Some(row) => match self.option_at_row(row) {
                    Some(index) => {
                        self.focused = Some(index);
                        self.commit()
                    }
                    None => Outcome::Consumed,
                },
                None => Outcome::Ignored,
            },
            MouseEventKind::Moved if self.config.focus_follows_pointer => {
                match popup_row.and_then(|row| self.option_at_row(row)) {
                    Some(index) => self.focus_to(Some(index)),
                    None => Outcome::Ignored,
                }
            }
            _ if popup_row.is_some() => Outcome::Consumed,
            _ => Outcome::Ignored,
        }
    }

    // --- Projections --------------------------------------------------------

    /// Accessibility tree for the current state.
    #[must_use]
    pub fn accessibility(&self) -> A11yTree {
        a11y::project(&A11yInput {
            base_id: &self.base_id,
            label: self.aria_label.as_deref(),
            disabled: self.is_disabled(),
            open: self.is_open(),
            focused: self.focused,
            selected: self.selected,
            options: &self.options,
        })
    }

    /// Text rows: the trigger first, then (while open) the visible options or
    /// the empty-state row. Each row is clipped to `width` columns.
    #[must_use]
    pub fn render_lines(&self, width: u16) -> Vec<String> {
        let shown = self
            .selected_option()
            .map_or(self.placeholder.as_str(), SelectOption::label);
        let indicator = if self.is_open() {
            OPEN_INDICATOR
        } else {
            CLOSED_INDICATOR
        };
        let mut lines = vec![truncate_to_width(&format!("{shown} {indicator}"), width)];

        if !self.is_open() {
            return lines;
        }
        if self.options.is_empty() {
            lines.push(truncate_to_width(&self.config.no_options_label, width));
            return lines;
        }

        let end = (self.offset + self.visible_rows()).min(self.options.len());
        for index in self.offset..end {
            if let Some(option) = self.options.get(index) {
                let state = OptionState::of(option, index, self.focused, self.selected);
                lines.push(self.renderer.render_option(option, state, width));
            }
        }
        lines
    }

    // --- Internals ----------------------------------------------------------

    fn opened(&mut self, seed: Option<usize>) -> Outcome {
        self.focused = seed;
        self.offset = 0;
        self.scroll_focused_into_view();
        if let Some(registry) = &self.listeners {
            self.subscription =
                Some(registry.subscribe(ListenerKinds::POINTER_DOWN | ListenerKinds::WINDOW_BLUR));
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "dropdown.open",
            id = %self.base_id,
            focused = ?self.focused,
            option_count = self.options.len()
        );

        Outcome::Opened {
            focused: self.focused,
        }
    }

    /// Shared close path: popup hidden, search cancelled, subscription released.
    fn close(&mut self) {
        self.trigger.close();
        self.typeahead.cancel();
        self.subscription = None;
    }

    fn focus_to(&mut self, to: Option<usize>) -> Outcome {
        let from = self.focused;
        if from == to {
            return Outcome::Consumed;
        }
        self.focused = to;
        self.scroll_focused_into_view();

        #[cfg(feature = "tracing")]
        tracing::trace!(message = "dropdown.focus", id = %self.base_id, from = ?from, to = ?to);

        Outcome::FocusMoved { from, to }
    }

    fn visible_rows(&self) -> usize {
        match usize::from(self.popup_area.height) {
            0 => self.options.len(),
            rows => rows,
        }
    }

    fn option_at_row(&self, row: u16) -> Option<usize> {
        let index = self.offset + usize::from(row);
        self.options.is_enabled(index).then_some(index)
    }

    fn scroll_focused_into_view(&mut self) {
        let Some(focused) = self.focused else {
            return;
        };
        let rows = self.visible_rows().max(1);
        if focused < self.offset {
            self.offset = focused;
        } else if focused >= self.offset + rows {
            self.offset = focused + 1 - rows;
        }
    }
}

impl Drop for Dropdown {
    fn drop(&mut self) {
        if self.is_open() {
            #[cfg(feature = "tracing")]
            tracing::debug!(message = "dropdown.unmount_open", id = %self.base_id);
            self.close();
        }
    }
}
