//! Entity browser view (`backoffice browse`)
//!
//! Renders whatever [`Browser`] it is given. A ticker drives debounce
//! settling and picks up finished background work; key events are mapped to
//! [`ScreenAction`]s and handed to the session.

use std::sync::Arc;
use std::time::{Duration, Instant};

use iocraft::prelude::*;

use crate::tui::components::{
    ActionMenu, ConfirmDialog, DataTable, DetailModal, Footer, Header, PaginationBar, SearchBox,
    ToastNotification,
};
use crate::tui::model::{Overlay, key_to_action};
use crate::tui::session::{Browser, Job};
use crate::tui::theme::theme;

/// How often the ticker polls the session
pub const TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Lines taken by everything except table rows: header, search box, table
/// border and header row, pagination, toast and footer
const CHROME_HEIGHT: u16 = 13;

/// Props for the EntityBrowser component
#[derive(Default, Props)]
pub struct EntityBrowserProps {
    pub browser: Option<Arc<dyn Browser>>,
}

fn spawn(job: Option<Job>) {
    if let Some(job) = job {
        tokio::spawn(job);
    }
}

/// Table rows that fit in a terminal of `height` lines
pub fn body_rows(height: u16) -> usize {
    usize::from(height.saturating_sub(CHROME_HEIGHT)).max(1)
}

/// Main entity browser component
///
/// Layout:
/// ```text
/// +------------------------------------------+
/// | Header                                    |
/// | SearchBox                                 |
/// +------------------------------------------+
/// | DataTable                                 |
/// |                                           |
/// +------------------------------------------+
/// | PaginationBar                             |
/// | Toast                                     |
/// | Footer                                    |
/// +------------------------------------------+
/// ```
#[component]
pub fn EntityBrowser<'a>(props: &EntityBrowserProps, mut hooks: Hooks) -> impl Into<AnyElement<'a>> {
    let (width, height) = hooks.use_terminal_size();
    let mut system = hooks.use_context_mut::<SystemContext>();
    let revision = hooks.use_state(|| 0u64);

    hooks.use_future({
        let browser = props.browser.clone();
        let mut revision = revision;
        async move {
            let Some(browser) = browser else {
                return;
            };
            loop {
                tokio::time::sleep(TICK_INTERVAL).await;
                spawn(browser.tick(Instant::now()));
                let current = browser.revision();
                if current != revision.get() {
                    revision.set(current);
                }
                if browser.should_exit() {
                    break;
                }
            }
        }
    });

    hooks.use_terminal_events({
        let browser = props.browser.clone();
        let mut revision = revision;
        move |event| {
            let Some(browser) = browser.as_ref() else {
                return;
            };
            match event {
                TerminalEvent::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                }) if kind != KeyEventKind::Release => {
                    if let Some(action) = key_to_action(browser.mode(), code, modifiers) {
                        tracing::trace!(?action, "key");
                        spawn(browser.handle(action, Instant::now()));
                        revision.set(browser.revision());
                    }
                }
                _ => {}
            }
        }
    });

    let Some(browser) = props.browser.as_ref() else {
        return element!(View).into_any();
    };

    if browser.should_exit() {
        system.exit();
    }

    let theme = theme();
    let rows = body_rows(height);
    let view = browser.view(rows);

    let (menu, confirm, detail) = match view.overlay {
        Overlay::None => (None, None, None),
        Overlay::Menu(menu) => (Some(menu), None, None),
        Overlay::Confirm(confirm) => (None, Some(confirm), None),
        Overlay::Detail(detail) => (None, None, Some(detail)),
    };

    element! {
        View(
            width,
            height,
            flex_direction: FlexDirection::Column,
            background_color: theme.background,
        ) {
            Header(
                title: view.title,
                subtitle: view.subtitle,
                total: view.total,
                hidden_columns: view.hidden_columns,
                busy: view.busy,
            )

            View(width: 100pct, padding_left: 1, padding_right: 1) {
                SearchBox(
                    value: view.search.query.clone(),
                    has_focus: view.search.is_focused,
                    settling: view.search.is_settling,
                )
            }

            DataTable(
                table: Some(view.table),
                focused_column: view.focused_column,
                search_term: view.search.query,
                scroll_offset: view.scroll_offset,
                visible_rows: rows,
            )

            PaginationBar(pagination: Some(view.pagination))
            ToastNotification(toast: view.toast)
            Footer(shortcuts: view.shortcuts)

            ActionMenu(menu)
            ConfirmDialog(confirm)
            DetailModal(detail)
        }
    }
    .into_any()
}
