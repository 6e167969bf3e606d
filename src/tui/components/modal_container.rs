//! Modal box with a title bar, content area and footer hint

use iocraft::prelude::*;

use crate::tui::theme::theme;

/// Border colors for the modal kinds the browser shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModalBorderColor {
    #[default]
    Focused,
    Danger,
    Info,
}

impl ModalBorderColor {
    pub fn to_color(self) -> Color {
        match self {
            Self::Focused => theme().border_focused,
            Self::Danger => theme().tone_danger,
            Self::Info => theme().tone_accent,
        }
    }
}

#[derive(Default, Props)]
pub struct ModalContainerProps<'a> {
    /// Width in columns; defaults to 60
    pub width: Option<u32>,
    pub border_color: ModalBorderColor,
    pub title: Option<String>,
    pub footer_text: Option<String>,
    pub children: Vec<AnyElement<'a>>,
}

#[component]
pub fn ModalContainer<'a>(props: &mut ModalContainerProps<'a>) -> impl Into<AnyElement<'a>> {
    let theme = theme();
    let border_color = props.border_color.to_color();
    let title = props.title.take();
    let footer = props.footer_text.take();

    element! {
        View(
            width: Size::Length(props.width.unwrap_or(60)),
            background_color: theme.background,
            border_style: BorderStyle::Double,
            border_color: border_color,
            padding_left: 1,
            padding_right: 1,
            flex_direction: FlexDirection::Column,
        ) {
            #(title.map(|title| element! {
                View(
                    width: 100pct,
                    border_edges: Edges::Bottom,
                    border_style: BorderStyle::Single,
                    border_color: theme.border,
                ) {
                    Text(content: title, color: border_color, weight: Weight::Bold)
                }
            }))

            View(
                width: 100pct,
                flex_direction: FlexDirection::Column,
                overflow: Overflow::Hidden,
            ) {
                #(std::mem::take(&mut props.children))
            }

            #(footer.map(|footer| element! {
                View(
                    width: 100pct,
                    border_edges: Edges::Top,
                    border_style: BorderStyle::Single,
                    border_color: theme.border,
                ) {
                    Text(content: footer, color: theme.text_dimmed)
                }
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_border_color_default() {
        assert_eq!(ModalBorderColor::default(), ModalBorderColor::Focused);
        assert!(matches!(ModalBorderColor::Danger.to_color(), Color::Red));
        assert!(matches!(ModalBorderColor::Info.to_color(), Color::Cyan));
    }

    #[test]
    fn test_props_default() {
        let props = ModalContainerProps::default();
        assert!(props.title.is_none());
        assert!(props.footer_text.is_none());
        assert!(props.width.is_none());
    }
}
