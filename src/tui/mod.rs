//! TUI module for the interactive entity browser
//!
//! - `session` - per-screen state behind the object-safe [`Browser`] handle
//! - `screens` - entity-specific row actions
//! - `model` - key mapping and view model types
//! - `browser` - the iocraft component that renders a session

pub mod browser;
pub mod components;
pub mod model;
pub mod screens;
pub mod session;
pub mod theme;

pub use browser::{EntityBrowser, EntityBrowserProps};
pub use model::{BrowserViewModel, InputMode, Overlay, ScreenAction, key_to_action};
pub use screens::{Mutator, Screen};
pub use session::{Browser, Job, ScreenSession, SessionEvent};
pub use theme::Theme;
