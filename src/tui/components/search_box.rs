//! Search input line
//!
//! Keystrokes are routed through the screen session rather than an iocraft
//! `TextInput`, so the term passes through the debounced search dimension.

use iocraft::prelude::*;

use crate::tui::theme::theme;

#[derive(Default, Props)]
pub struct SearchBoxProps {
    /// Current (unsettled) search term
    pub value: String,
    pub has_focus: bool,
    /// The term has not settled into a request yet
    pub settling: bool,
}

/// Bordered search line with a "/" prompt and a block cursor when focused
#[component]
pub fn SearchBox(props: &SearchBoxProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();
    let border_color = if props.has_focus {
        theme.border_focused
    } else {
        theme.border
    };

    let (content, color) = if props.value.is_empty() && !props.has_focus {
        ("press / to search".to_string(), theme.text_dimmed)
    } else if props.has_focus {
        (format!("{}█", props.value), theme.text)
    } else {
        (props.value.clone(), theme.text)
    };

    element! {
        View(
            flex_direction: FlexDirection::Row,
            flex_shrink: 0.0,
            border_style: BorderStyle::Round,
            border_color: border_color,
            padding_left: 1,
            padding_right: 1,
            height: 3,
        ) {
            View(margin_right: 1) {
                Text(content: "/", color: theme.text_dimmed)
            }
            View(flex_grow: 1.0) {
                Text(content: content, color: color)
            }
            #(props.settling.then(|| element! {
                Text(content: "...", color: theme.text_dimmed)
            }))
        }
    }
}
