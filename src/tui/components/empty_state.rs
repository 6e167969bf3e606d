//! Placeholder shown in the table body when there are no rows to draw

use iocraft::prelude::*;

use crate::tui::theme::theme;

/// Why the table has no rows
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EmptyStateKind {
    /// A list request is settling or in flight
    #[default]
    Loading,
    /// The collection has no records at all
    NoRecords,
    /// Nothing matches the current search term
    NoSearchResults(String),
    /// The last list request failed
    Failed(String),
}

impl EmptyStateKind {
    /// Icon, title, message and hint for this state
    fn text(&self) -> (&'static str, &'static str, String, &'static str) {
        match self {
            EmptyStateKind::Loading => ("~", "Loading", "Fetching rows...".to_string(), ""),
            EmptyStateKind::NoRecords => (
                "i",
                "No Records",
                "This collection is empty.".to_string(),
                "Press 'r' to reload.",
            ),
            EmptyStateKind::NoSearchResults(term) => (
                "?",
                "No Results",
                format!("Nothing matches \"{term}\"."),
                "Press '/' to change the search, then Esc to clear it.",
            ),
            EmptyStateKind::Failed(message) => (
                "!",
                "Request Failed",
                message.clone(),
                "Press 'r' to try again.",
            ),
        }
    }
}

#[derive(Default, Props)]
pub struct EmptyStateProps {
    pub kind: EmptyStateKind,
}

/// Centered message with an icon box
#[component]
pub fn EmptyState(props: &EmptyStateProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();
    let (icon, title, message, hint) = props.kind.text();
    let is_error = matches!(props.kind, EmptyStateKind::Failed(_));
    let accent = if is_error {
        theme.tone_danger
    } else {
        theme.border
    };

    element! {
        View(
            width: 100pct,
            height: 100pct,
            flex_direction: FlexDirection::Column,
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            padding: 1,
        ) {
            View(
                width: 5,
                height: 3,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                border_style: BorderStyle::Round,
                border_color: accent,
                margin_bottom: 1,
            ) {
                Text(
                    content: icon,
                    color: if is_error { theme.tone_danger } else { theme.text_dimmed },
                    weight: Weight::Bold,
                )
            }

            Text(content: title, color: theme.text, weight: Weight::Bold)

            View(margin_top: 1, max_width: 70) {
                Text(content: message, color: theme.text_dimmed)
            }

            #(if hint.is_empty() {
                None
            } else {
                Some(element! {
                    View(margin_top: 1) {
                        Text(content: hint, color: theme.text_dimmed)
                    }
                })
            })
        }
    }
}
