//! Delete confirmation

use iocraft::prelude::*;

use crate::tui::components::modal_container::{ModalBorderColor, ModalContainer};
use crate::tui::components::modal_overlay::ModalOverlay;
use crate::tui::model::ConfirmState;
use crate::tui::theme::theme;

#[derive(Default, Props)]
pub struct ConfirmDialogProps {
    pub confirm: Option<ConfirmState>,
}

#[component]
pub fn ConfirmDialog(props: &ConfirmDialogProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();

    let Some(confirm) = props.confirm.as_ref() else {
        return element!(View).into_any();
    };

    element! {
        ModalOverlay(show_backdrop: true) {
            ModalContainer(
                width: Some(50),
                border_color: ModalBorderColor::Danger,
                title: Some("Delete record".to_string()),
                footer_text: Some("y to delete, n or Esc to cancel".to_string()),
            ) {
                Text(content: format!("Delete {}?", confirm.label), color: theme.text, weight: Weight::Bold)
                Text(content: format!("id {}", confirm.id), color: theme.text_dimmed)
                Text(content: "This cannot be undone.", color: theme.tone_danger)
            }
        }
    }
    .into_any()
}
