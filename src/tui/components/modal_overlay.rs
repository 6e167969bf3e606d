//! Full-screen layer that centers a modal over the browser

use iocraft::prelude::*;

/// Backdrop color when the screen behind a modal is blanked out
pub const MODAL_BACKDROP: Color = Color::Rgb {
    r: 30,
    g: 30,
    b: 30,
};

#[derive(Default, Props)]
pub struct ModalOverlayProps<'a> {
    /// Paint the backdrop instead of leaving the table visible
    pub show_backdrop: bool,
    pub children: Vec<AnyElement<'a>>,
}

/// Absolutely positioned, centered container for modal content
#[component]
pub fn ModalOverlay<'a>(props: &mut ModalOverlayProps<'a>) -> impl Into<AnyElement<'a>> {
    element! {
        View(
            width: 100pct,
            height: 100pct,
            position: Position::Absolute,
            top: 0,
            left: 0,
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            background_color: props.show_backdrop.then_some(MODAL_BACKDROP),
        ) {
            #(std::mem::take(&mut props.children))
        }
    }
}
