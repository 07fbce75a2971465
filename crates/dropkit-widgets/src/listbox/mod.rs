#![forbid(unsafe_code)]

//! Single-select listbox ("dropdown").
//!
//! The widget is split along the lines of its state machine:
//!
//! | Module | Role |
//! |--------|------|
//! | [`options`] | ordered `{value, label, disabled}` items |
//! | [`navigation`] | directional focus movement, skipping disabled entries |
//! | [`typeahead`] | keystroke buffer with a decay deadline |
//! | [`dismissal`] | which inputs close the popup, and what closing implies |
//! | [`trigger`] | the closed-state affordance and the focus seed on open |
//! | [`a11y`] | pure projection into ARIA roles and attributes |
//! | [`render`] | the option rendering strategy and text rows |
//! | [`dropdown`] | the composed widget that routes events |
//!
//! # State machine
//!
//! ```text
//!            activate / toggle
//!   Closed ─────────────────────▶ Open ──┐ Next/Previous/First/Last
//!     ▲                             │ ◀──┘ character (type-ahead)
//!     └──── Escape | Outside | Tab | Commit
//! ```
//!
//! # Invariants
//!
//! 1. While open with at least one enabled option, the focused index names an
//!    enabled option.
//! 2. The type-ahead buffer is empty and its deadline cancelled while closed.
//! 3. The document-level listener subscription is held only while open.
//! 4. `on_select` fires exactly once per commit, before the popup closes.

pub mod a11y;
pub mod dismissal;
pub mod dropdown;
pub mod navigation;
pub mod options;
pub mod render;
pub mod trigger;
pub mod typeahead;

pub use a11y::{A11yTree, Role};
pub use dismissal::{DismissReason, Dismissal};
pub use dropdown::{Dropdown, Outcome};
pub use navigation::NavDirection;
pub use options::{OptionList, SelectOption};
pub use render::{MarkerRenderer, OptionRenderer, OptionState};
pub use trigger::TriggerControl;
pub use typeahead::TypeaheadMatcher;
