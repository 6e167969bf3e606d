//! Field listing shown by the inspect action

use iocraft::prelude::*;

use crate::tui::components::modal_container::{ModalBorderColor, ModalContainer};
use crate::tui::components::modal_overlay::ModalOverlay;
use crate::tui::model::DetailState;
use crate::tui::theme::theme;

#[derive(Default, Props)]
pub struct DetailModalProps {
    pub detail: Option<DetailState>,
}

/// Width of the name column, so values line up
pub fn label_width(fields: &[(String, String)]) -> usize {
    fields
        .iter()
        .map(|(name, _)| name.chars().count())
        .max()
        .unwrap_or(0)
}

#[component]
pub fn DetailModal(props: &DetailModalProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();

    let Some(detail) = props.detail.as_ref() else {
        return element!(View).into_any();
    };
    let width = label_width(&detail.fields);

    element! {
        ModalOverlay {
            ModalContainer(
                width: Some(70),
                border_color: ModalBorderColor::Info,
                title: Some(detail.title.clone()),
                footer_text: Some("Esc to close".to_string()),
            ) {
                #(detail.fields.iter().map(|(name, value)| element! {
                    View(flex_direction: FlexDirection::Row) {
                        Text(content: format!("{name:<width$}  "), color: theme.text_dimmed)
                        Text(content: value.clone(), color: theme.text)
                    }
                }))
            }
        }
    }
    .into_any()
}
