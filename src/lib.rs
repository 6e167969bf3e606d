pub mod cli;
pub mod commands;
pub mod config;
pub mod entity;
pub mod error;
pub mod list;
pub mod macros;
pub mod paths;
pub mod source;
pub mod tui;

pub use config::Config;
pub use entity::{EntityKind, Record};
pub use error::{BackofficeError, Result};
pub use list::{ListContract, QueryCoordinator, RowActionDispatcher};
pub use source::{HttpSource, ListSource, MemorySource};
