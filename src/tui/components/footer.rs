//! Keyboard shortcuts bar component
//!
//! Displays the shortcuts that apply to the current input mode.

use iocraft::prelude::*;

use super::shortcuts::ShortcutsBuilder;
use crate::tui::theme::theme;

/// A single keyboard shortcut entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortcut {
    /// The key or key combination (e.g., "q", "Enter", "[/]")
    pub key: String,
    /// Description of the action
    pub action: String,
}

impl Shortcut {
    pub fn new(key: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action: action.into(),
        }
    }
}

/// Props for the Footer component
#[derive(Default, Props)]
pub struct FooterProps {
    pub shortcuts: Vec<Shortcut>,
}

/// Keyboard shortcuts bar at the bottom of the screen
#[component]
pub fn Footer(props: &FooterProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();

    element! {
        View(
            width: 100pct,
            min_height: 1,
            flex_direction: FlexDirection::Row,
            flex_wrap: FlexWrap::Wrap,
            flex_shrink: 0.0,
            padding_left: 1,
            padding_right: 1,
            column_gap: 2,
            background_color: theme.border,
        ) {
            #(props.shortcuts.iter().map(|shortcut| {
                element! {
                    View(flex_direction: FlexDirection::Row) {
                        Text(
                            content: format!("[{}]", shortcut.key),
                            color: theme.highlight,
                            weight: Weight::Bold,
                        )
                        Text(
                            content: format!(" {}", shortcut.action),
                            color: theme.text,
                        )
                    }
                }
            }))
        }
    }
}

/// Shortcuts while the table has focus
pub fn table_shortcuts() -> Vec<Shortcut> {
    ShortcutsBuilder::new()
        .with_navigation()
        .with_search()
        .with_columns()
        .with_paging()
        .add("Enter", "Actions")
        .add("n", "New")
        .add("r", "Reload")
        .with_quit()
        .build()
}

/// Shortcuts while typing a search term
pub fn search_shortcuts() -> Vec<Shortcut> {
    ShortcutsBuilder::new()
        .add("Enter", "Done")
        .add("Esc", "Clear & Exit")
        .add("C-c", "Quit")
        .build()
}

/// Shortcuts for the row action menu
pub fn menu_shortcuts() -> Vec<Shortcut> {
    ShortcutsBuilder::new()
        .with_navigation()
        .add("Enter", "Run")
        .add("Esc", "Close")
        .build()
}

/// Shortcuts for the delete confirmation
pub fn confirm_shortcuts() -> Vec<Shortcut> {
    ShortcutsBuilder::new()
        .add("y", "Delete")
        .add("n/Esc", "Cancel")
        .build()
}

/// Shortcuts for the detail modal
pub fn detail_shortcuts() -> Vec<Shortcut> {
    ShortcutsBuilder::new().add("Esc", "Close").build()
}
