//! Shared TUI components
//!
//! Building blocks for the entity browser. Each component takes plain view
//! model values as props and owns no state.

pub mod action_menu;
pub mod confirm_dialog;
pub mod data_table;
pub mod detail_modal;
pub mod empty_state;
pub mod footer;
pub mod header;
pub mod modal_container;
pub mod modal_overlay;
pub mod pagination_bar;
pub mod search_box;
pub mod shortcuts;
pub mod toast;

pub use action_menu::{ActionMenu, ActionMenuProps};
pub use confirm_dialog::{ConfirmDialog, ConfirmDialogProps};
pub use data_table::{DataTable, DataTableProps};
pub use detail_modal::{DetailModal, DetailModalProps};
pub use empty_state::{EmptyState, EmptyStateKind, EmptyStateProps};
pub use footer::{Footer, FooterProps, Shortcut};
pub use header::{Header, HeaderProps};
pub use modal_container::{ModalBorderColor, ModalContainer, ModalContainerProps};
pub use modal_overlay::{ModalOverlay, ModalOverlayProps};
pub use pagination_bar::{PaginationBar, PaginationBarProps};
pub use search_box::{SearchBox, SearchBoxProps};
pub use shortcuts::ShortcutsBuilder;
pub use toast::{Toast, ToastLevel, ToastNotification, ToastNotificationProps};
