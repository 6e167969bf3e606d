//! Pagination controls under the table

use iocraft::prelude::*;

use crate::list::{PageSizeOption, PaginationView};
use crate::tui::theme::theme;

#[derive(Default, Props)]
pub struct PaginationBarProps {
    pub pagination: Option<PaginationView>,
}

/// Step buttons rendered as text; disabled ones are dimmed
pub fn step_buttons(view: &PaginationView) -> [(&'static str, bool); 4] {
    [
        ("«", view.first_enabled),
        ("‹", view.prev_enabled),
        ("›", view.next_enabled),
        ("»", view.last_enabled),
    ]
}

/// Page size list with the active size bracketed
pub fn size_label(sizes: &[PageSizeOption]) -> String {
    sizes
        .iter()
        .map(|option| {
            if option.selected {
                format!("[{}]", option.size)
            } else {
                option.size.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[component]
pub fn PaginationBar(props: &PaginationBarProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();

    let Some(view) = props.pagination.as_ref() else {
        return element! { View(height: 1) };
    };

    let buttons = step_buttons(view);
    let (back, forward) = buttons.split_at(2);

    element! {
        View(
            width: 100pct,
            height: 1,
            flex_shrink: 0.0,
            flex_direction: FlexDirection::Row,
            justify_content: JustifyContent::SpaceBetween,
            padding_left: 1,
            padding_right: 1,
        ) {
            View(flex_direction: FlexDirection::Row, column_gap: 1) {
                #(back.iter().map(|(glyph, enabled)| element! {
                    Text(
                        content: *glyph,
                        color: if *enabled { theme.highlight } else { theme.text_dimmed },
                    )
                }))
                Text(content: view.label.clone(), color: theme.text, weight: Weight::Bold)
                #(forward.iter().map(|(glyph, enabled)| element! {
                    Text(
                        content: *glyph,
                        color: if *enabled { theme.highlight } else { theme.text_dimmed },
                    )
                }))
            }
            Text(content: view.summary.clone(), color: theme.text_dimmed)
            Text(content: format!("per page: {}", size_label(&view.sizes)), color: theme.text_dimmed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_label_marks_selection() {
        let sizes = vec![
            PageSizeOption { size: 10, selected: true },
            PageSizeOption { size: 25, selected: false },
            PageSizeOption { size: 50, selected: false },
        ];
        assert_eq!(size_label(&sizes), "[10] 25 50");
    }

    #[test]
    fn test_step_buttons_follow_view() {
        let view = PaginationView {
            page: 1,
            page_count: 1,
            sizes: vec![],
            first_enabled: false,
            prev_enabled: false,
            next_enabled: false,
            last_enabled: false,
            label: "page 1 of 1".to_string(),
            summary: "showing 1-3 of 3".to_string(),
        };
        assert!(step_buttons(&view).iter().all(|(_, enabled)| !enabled));
    }
}
