//! Row action menu
//!
//! Lists the actions available for the selected row. Entries arrive ordered
//! by group; a thin rule separates one group from the next.

use iocraft::prelude::*;

use crate::list::ActionEntry;
use crate::tui::components::modal_container::{ModalBorderColor, ModalContainer};
use crate::tui::components::modal_overlay::ModalOverlay;
use crate::tui::model::MenuState;
use crate::tui::theme::theme;

#[derive(Default, Props)]
pub struct ActionMenuProps {
    pub menu: Option<MenuState>,
}

/// One menu line: optional icon, then the label
pub fn entry_line(entry: &ActionEntry) -> String {
    match &entry.icon {
        Some(icon) => format!("{icon} {}", entry.label),
        None => format!("  {}", entry.label),
    }
}

/// Indices where a new group starts, excluding the first entry
pub fn group_breaks(entries: &[ActionEntry]) -> Vec<usize> {
    entries
        .windows(2)
        .enumerate()
        .filter(|(_, pair)| pair[0].group != pair[1].group)
        .map(|(i, _)| i + 1)
        .collect()
}

#[component]
pub fn ActionMenu(props: &ActionMenuProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();

    let Some(menu) = props.menu.as_ref() else {
        return element!(View).into_any();
    };

    let breaks = group_breaks(&menu.entries);
    let mut lines: Vec<AnyElement<'static>> = Vec::new();
    for (i, entry) in menu.entries.iter().enumerate() {
        if breaks.contains(&i) {
            lines.push(
                element! {
                    Text(content: "─".repeat(20), color: theme.border)
                }
                .into_any(),
            );
        }
        let is_selected = i == menu.selected;
        lines.push(
            element! {
                View(
                    width: 100pct,
                    background_color: if is_selected { Some(theme.selected_row) } else { None },
                ) {
                    Text(
                        content: entry_line(entry),
                        color: if is_selected { theme.highlight } else { theme.text },
                        weight: if is_selected { Weight::Bold } else { Weight::Normal },
                    )
                }
            }
            .into_any(),
        );
    }

    element! {
        ModalOverlay {
            ModalContainer(
                width: Some(40),
                border_color: ModalBorderColor::Focused,
                title: Some(menu.row_label.clone()),
                footer_text: Some("Enter to run, Esc to close".to_string()),
            ) {
                #(lines)
            }
        }
    }
    .into_any()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::RowAction;

    fn entry(label: &str, group: u32, icon: Option<&str>) -> ActionEntry {
        ActionEntry {
            action: RowAction::Inspect,
            label: label.to_string(),
            icon: icon.map(str::to_string),
            group,
        }
    }

    #[test]
    fn test_group_breaks() {
        let entries = vec![
            entry("Inspect", 0, None),
            entry("Delete", 0, None),
            entry("Mark paid", 1, Some("$")),
            entry("Cancel invoice", 2, None),
        ];
        assert_eq!(group_breaks(&entries), vec![2, 3]);
        assert!(group_breaks(&entries[..2]).is_empty());
    }

    #[test]
    fn test_entry_line() {
        assert_eq!(entry_line(&entry("Mark paid", 1, Some("$"))), "$ Mark paid");
        assert_eq!(entry_line(&entry("Inspect", 0, None)), "  Inspect");
    }
}
