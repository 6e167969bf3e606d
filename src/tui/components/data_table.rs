//! Column-driven table component
//!
//! Draws a [`TableViewModel`]: a header line with sort arrows, then exactly
//! one body branch. Rows, loading, error and empty states never mix.

use iocraft::prelude::*;

use crate::list::table::{HeaderCell, TableBody, TableRow, TableViewModel};
use crate::tui::components::empty_state::{EmptyState, EmptyStateKind};
use crate::tui::theme::theme;

/// Props for the DataTable component
#[derive(Default, Props)]
pub struct DataTableProps {
    pub table: Option<TableViewModel>,
    /// Column that `s`/`S`/`v` act on
    pub focused_column: Option<&'static str>,
    /// Current search term, to tell "no records" from "no matches"
    pub search_term: String,
    /// First row to draw
    pub scroll_offset: usize,
    /// Rows that fit in the body
    pub visible_rows: usize,
}

/// Empty state for a body branch without rows
pub fn empty_state_for(body: &TableBody, search_term: &str) -> Option<EmptyStateKind> {
    match body {
        TableBody::Loading => Some(EmptyStateKind::Loading),
        TableBody::Error(message) => Some(EmptyStateKind::Failed(message.clone())),
        TableBody::Empty if search_term.trim().is_empty() => Some(EmptyStateKind::NoRecords),
        TableBody::Empty => Some(EmptyStateKind::NoSearchResults(search_term.trim().to_string())),
        TableBody::Rows(_) => None,
    }
}

/// Pad or cut `text` to exactly `width` characters
pub fn fit(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count <= width {
        return format!("{text:<width$}");
    }
    if width == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('…');
    cut
}

/// Header text with the sort arrow appended to the active column
pub fn header_label(header: &HeaderCell) -> String {
    match header.indicator {
        Some(indicator) => format!("{} {}", header.title, indicator.glyph()),
        None => header.title.to_string(),
    }
}

fn column_width(header: &HeaderCell) -> u32 {
    u32::from(header.width) + 1
}

fn render_row(headers: &[HeaderCell], row: &TableRow) -> AnyElement<'static> {
    let theme = theme();
    element! {
        View(
            width: 100pct,
            height: 1,
            flex_direction: FlexDirection::Row,
            background_color: if row.is_selected { Some(theme.selected_row) } else { None },
        ) {
            #(headers.iter().zip(&row.cells).map(|(header, cell)| element! {
                View(width: Size::Length(column_width(header))) {
                    Text(
                        content: fit(&cell.text, usize::from(header.width)),
                        color: theme.tone_color(cell.tone),
                        weight: if row.is_selected { Weight::Bold } else { Weight::Normal },
                    )
                }
            }))
        }
    }
    .into_any()
}

/// Table with header, scrolling body and per-branch placeholders
#[component]
pub fn DataTable(props: &DataTableProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();

    let Some(table) = props.table.as_ref() else {
        return element! {
            View(width: 100pct, flex_grow: 1.0)
        };
    };

    let body: Vec<AnyElement<'static>> = match &table.body {
        TableBody::Rows(rows) => rows
            .iter()
            .skip(props.scroll_offset)
            .take(props.visible_rows.max(1))
            .map(|row| render_row(&table.headers, row))
            .collect(),
        other => empty_state_for(other, &props.search_term)
            .map(|kind| element! { EmptyState(kind: kind) }.into_any())
            .into_iter()
            .collect(),
    };

    let below = match &table.body {
        TableBody::Rows(rows) => rows
            .len()
            .saturating_sub(props.scroll_offset + props.visible_rows.max(1)),
        _ => 0,
    };

    element! {
        View(
            width: 100pct,
            flex_grow: 1.0,
            flex_direction: FlexDirection::Column,
            border_style: BorderStyle::Round,
            border_color: theme.border,
            padding_left: 1,
            padding_right: 1,
        ) {
            View(
                width: 100pct,
                height: 2,
                flex_shrink: 0.0,
                flex_direction: FlexDirection::Row,
                border_edges: Edges::Bottom,
                border_style: BorderStyle::Single,
                border_color: theme.border,
            ) {
                #(table.headers.iter().map(|header| {
                    let focused = props.focused_column == Some(header.key);
                    element! {
                        View(width: Size::Length(column_width(header))) {
                            Text(
                                content: fit(&header_label(header), usize::from(header.width)),
                                color: if focused {
                                    theme.border_focused
                                } else if header.indicator.is_some() {
                                    theme.sort_indicator
                                } else {
                                    theme.header_text
                                },
                                weight: if header.sortable || focused { Weight::Bold } else { Weight::Normal },
                            )
                        }
                    }
                }))
            }

            View(
                width: 100pct,
                flex_grow: 1.0,
                flex_direction: FlexDirection::Column,
                overflow: Overflow::Hidden,
            ) {
                #(body)
            }

            #((below > 0).then(|| element! {
                Text(content: format!("{below} more below"), color: theme.text_dimmed)
            }))
        }
    }
}
