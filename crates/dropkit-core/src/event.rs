#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! Widgets receive these events from the host application, which translates
//! whatever its platform delivers (terminal escape sequences, DOM events,
//! windowing toolkit callbacks) into this small vocabulary. All events derive
//! `Clone`, `PartialEq`, and `Eq` for use in tests and pattern matching.
//!
//! # Design Notes
//!
//! - Pointer coordinates are 0-indexed cells, origin at the top-left
//! - `KeyEventKind` defaults to `Press` when the platform cannot tell
//! - `Modifiers` use bitflags for easy combination

use bitflags::bitflags;

/// Canonical input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),

    /// A pointer event.
    Mouse(MouseEvent),

    /// Window focus gained or lost.
    ///
    /// `true` = focus gained, `false` = focus lost.
    Focus(bool),
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,

    /// The type of key event (press, repeat, or release).
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a new key event with default modifiers and Press kind.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Create a key event with a specific kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Check if Ctrl modifier is held.
    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    /// Check if Alt modifier is held.
    #[must_use]
    pub const fn alt(&self) -> bool {
        self.modifiers.contains(Modifiers::ALT)
    }

    /// Check if Super/Meta/Cmd modifier is held.
    #[must_use]
    pub const fn super_key(&self) -> bool {
        self.modifiers.contains(Modifiers::SUPER)
    }

    /// Whether any command modifier (Ctrl, Alt, Super) is held.
    ///
    /// Shift is not a command modifier: it only changes which character a
    /// key produces.
    #[must_use]
    pub const fn has_command_modifier(&self) -> bool {
        self.modifiers
            .intersects(Modifiers::CTRL.union(Modifiers::ALT).union(Modifiers::SUPER))
    }

    /// The printable character carried by this event, if any.
    ///
    /// Returns `None` for non-character keys, control characters, and
    /// characters typed with a command modifier held.
    #[must_use]
    pub fn printable_char(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(ch) if !ch.is_control() && !self.has_command_modifier() => Some(ch),
            _ => None,
        }
    }

    /// Whether this event should drive state transitions (press or repeat).
    #[must_use]
    pub const fn is_actionable(&self) -> bool {
        !matches!(self.kind, KeyEventKind::Release)
    }
}

/// Key codes for keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),

    /// Enter/Return key.
    Enter,

    /// Escape key.
    Escape,

    /// Tab key.
    Tab,

    /// Shift+Tab (back-tab).
    BackTab,

    /// Home key.
    Home,

    /// End key.
    End,

    /// Page Up key.
    PageUp,

    /// Page Down key.
    PageDown,

    /// Up arrow key.
    Up,

    /// Down arrow key.
    Down,
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed (default when not distinguishable).
    #[default]
    Press,

    /// Key is being held (repeat event).
    Repeat,

    /// Key was released.
    Release,
}

bitflags! {
    /// Modifier keys that can be held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// A pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    /// The type of pointer event.
    pub kind: MouseEventKind,

    /// X coordinate (0-indexed, leftmost column is 0).
    pub x: u16,

    /// Y coordinate (0-indexed, topmost row is 0).
    pub y: u16,
}

impl MouseEvent {
    /// Create a new pointer event.
    #[must_use]
    pub const fn new(kind: MouseEventKind, x: u16, y: u16) -> Self {
        Self { kind, x, y }
    }

    /// Whether this is a button press of any kind.
    #[must_use]
    pub const fn is_press(&self) -> bool {
        matches!(self.kind, MouseEventKind::Down(_))
    }
}

/// The type of pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    /// Button pressed down.
    Down(MouseButton),

    /// Button released.
    Up(MouseButton),

    /// Pointer moved (no button pressed).
    Moved,

    /// Wheel scrolled up.
    ScrollUp,

    /// Wheel scrolled down.
    ScrollDown,
}

/// Pointer button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left (primary) button.
    Left,

    /// Right (secondary) button.
    Right,

    /// Middle button (scroll wheel click).
    Middle,
}
