//! App header bar component
//!
//! Entity title on the left; row count, hidden-column hint and the
//! row-loading indicator on the right.

use iocraft::prelude::*;

use crate::tui::theme::theme;

#[derive(Default, Props)]
pub struct HeaderProps {
    pub title: String,

    /// Source description, e.g. "demo" or the endpoint host
    pub subtitle: Option<String>,

    /// Total rows matching the current search
    pub total: Option<u64>,

    /// Columns currently hidden
    pub hidden_columns: usize,

    /// A row action is loading its target
    pub busy: bool,
}

/// App header bar
#[component]
pub fn Header(props: &HeaderProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();

    let left_text = match &props.subtitle {
        Some(sub) => format!("Backoffice - {} [{}]", props.title, sub),
        None => format!("Backoffice - {}", props.title),
    };

    element! {
        View(
            width: 100pct,
            height: 1,
            flex_direction: FlexDirection::Row,
            flex_shrink: 0.0,
            justify_content: JustifyContent::SpaceBetween,
            padding_left: 1,
            padding_right: 1,
            background_color: theme.highlight,
        ) {
            Text(content: left_text, color: theme.text, weight: Weight::Bold)
            View(flex_direction: FlexDirection::Row, gap: 2) {
                #(props.busy.then(|| element! {
                    Text(content: "loading row...", color: theme.tone_warning)
                }))
                #((props.hidden_columns > 0).then(|| element! {
                    Text(
                        content: format!("{} hidden", props.hidden_columns),
                        color: theme.text_dimmed,
                    )
                }))
                #(props.total.map(|total| element! {
                    Text(content: format!("{total} rows"), color: theme.text_dimmed)
                }))
            }
        }
    }
}
