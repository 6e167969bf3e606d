//! Browse session: one entity screen's state behind an object-safe handle
//!
//! A [`ScreenSession`] owns the screen's [`ListContract`], its column set, the
//! hidden-column set and the UI state. It is generic over the record and the
//! source; the iocraft component only sees `Arc<dyn Browser>`.
//!
//! Nothing here blocks or sleeps. The component calls [`Browser::tick`] from a
//! ticker and [`Browser::handle`] from key events; both may return a [`Job`]
//! (a list request or a row action) that the caller spawns. Jobs write their
//! outcome back through the shared state or the session's event channel.

use std::collections::BTreeSet;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use crate::entity::{EntityKind, Record};
use crate::error::{BackofficeError, Result};
use crate::list::coordinator::{CoordinatorOptions, QueryCoordinator};
use crate::list::pagination::{compute_pagination, cycle_page_size, step_page};
use crate::list::table::{
    compute_table_view, header_click, initial_hidden, toggle_column, visible_columns,
};
use crate::list::{
    ColumnDescriptor, DispatchPhase, FetchTicket, HeaderClick, ListContract, RowActionDispatcher,
    RowActions, available_actions,
};
use crate::source::ListSource;
use crate::tui::components::toast::Toast;
use crate::tui::model::{
    BrowserViewModel, ConfirmState, DetailState, InputMode, MenuState, Overlay, ScreenAction,
    SearchViewModel, UiState, scroll_offset, shortcuts_for, step_selection,
};
use crate::tui::screens::{DetailSlot, Mutator, Screen};

/// Background work produced by the session
pub type Job = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Messages from row-action callbacks back to the session
#[derive(Debug)]
pub enum SessionEvent {
    Inspect(DetailState),
    ConfirmDelete(ConfirmState),
    Notice(Toast),
    Reload,
}

/// What the TUI needs from a screen, independent of its record type
pub trait Browser: Send + Sync {
    fn kind(&self) -> EntityKind;

    fn mode(&self) -> InputMode;

    /// Apply one user action
    fn handle(&self, action: ScreenAction, now: Instant) -> Option<Job>;

    /// Drain callback events, expire toasts and settle debounced inputs.
    /// Returns the list request to run when the settled query changed.
    fn tick(&self, now: Instant) -> Option<Job>;

    /// View model for a body that fits `body_rows` table rows
    fn view(&self, body_rows: usize) -> BrowserViewModel;

    /// Bumped on every state change that affects rendering
    fn revision(&self) -> u64;

    fn should_exit(&self) -> bool;
}

struct SessionState<T> {
    contract: ListContract<T>,
    hidden: BTreeSet<String>,
    ui: UiState,
    events: UnboundedReceiver<SessionEvent>,
    reload_requested: bool,
    /// Dispatcher phase seen by the last tick
    phase: DispatchPhase,
    revision: u64,
}

impl<T> SessionState<T> {
    fn touch(&mut self) {
        self.revision += 1;
    }

    fn notify(&mut self, toast: Toast) {
        self.ui.toast = Some(toast);
    }
}

pub struct ScreenSession<T, S> {
    state: Arc<Mutex<SessionState<T>>>,
    columns: Vec<ColumnDescriptor<T>>,
    source: Arc<S>,
    dispatcher: RowActionDispatcher,
    events: UnboundedSender<SessionEvent>,
    subtitle: Option<String>,
}

impl<T, S> ScreenSession<T, S>
where
    T: Screen,
    S: ListSource<T> + 'static,
{
    /// Build a session; `target_timeout` bounds the detail fetch of row actions
    pub fn new(source: S, options: CoordinatorOptions, target_timeout: Option<Duration>) -> Result<Self> {
        let source = Arc::new(source);
        let (events, receiver) = unbounded_channel();
        let actions = row_actions(&source, &events);

        let contract = ListContract::new(QueryCoordinator::new(options)?, actions)
            .with_invisible_columns(T::invisible_columns().iter().copied());
        let columns = T::columns();
        let hidden = initial_hidden(&columns, &contract);

        Ok(Self {
            state: Arc::new(Mutex::new(SessionState {
                contract,
                hidden,
                ui: UiState::default(),
                events: receiver,
                reload_requested: false,
                phase: DispatchPhase::Idle,
                revision: 0,
            })),
            columns,
            source,
            dispatcher: RowActionDispatcher::new().with_target_timeout(target_timeout),
            events,
            subtitle: None,
        })
    }

    /// Text shown next to the title, e.g. where rows come from
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn source(&self) -> &Arc<S> {
        &self.source
    }

    fn fetch_job(&self, ticket: FetchTicket) -> Job {
        let state = Arc::clone(&self.state);
        let source = Arc::clone(&self.source);
        let request = ticket.key.to_request();
        let token = ticket.token;

        Box::pin(async move {
            let response = source.list(&request).await;
            let mut state = state.lock();
            let outcome = state.contract.query_mut().apply(token, response);
            tracing::debug!(token, ?outcome, "list response handled");
            let rows = state.contract.rows().len();
            state.ui.clamp_selection(rows);
            state.touch();
        })
    }

    fn dispatch_job(&self, state: &mut SessionState<T>) -> Option<Job> {
        let Overlay::Menu(menu) = std::mem::take(&mut state.ui.overlay) else {
            return None;
        };
        let entry = menu.current()?.clone();
        let Some(row) = state
            .contract
            .rows()
            .iter()
            .find(|r| r.id() == menu.row_id)
            .cloned()
        else {
            tracing::debug!(id = %menu.row_id, "menu row left the list before dispatch");
            state.notify(Toast::warning(format!(
                "{} is no longer listed",
                menu.row_label
            )));
            return None;
        };
        let actions = state.contract.actions().clone();
        let dispatcher = self.dispatcher.clone();
        let events = self.events.clone();

        Some(Box::pin(async move {
            if let Err(e) = dispatcher.dispatch(&actions, &entry.action, &row).await {
                let _ = events.send(SessionEvent::Notice(Toast::from_error(&e)));
            }
        }))
    }

    fn delete_job(&self, confirm: ConfirmState) -> Job {
        let source = Arc::clone(&self.source);
        let events = self.events.clone();

        Box::pin(async move {
            match source.delete(&confirm.id).await {
                Ok(()) => {
                    tracing::debug!(id = %confirm.id, "record deleted");
                    let _ = events.send(SessionEvent::Notice(Toast::success(format!(
                        "Deleted {}",
                        confirm.label
                    ))));
                    let _ = events.send(SessionEvent::Reload);
                }
                Err(e) => {
                    let _ = events.send(SessionEvent::Notice(Toast::from_error(&e)));
                }
            }
        })
    }

    fn focused_key(&self, state: &SessionState<T>) -> Option<&'static str> {
        visible_columns(&self.columns, &state.hidden)
            .get(state.ui.focused_column)
            .map(|c| c.key)
    }

    fn sort_focused(&self, state: &mut SessionState<T>, click: HeaderClick, now: Instant) {
        let Some(key) = self.focused_key(state) else {
            return;
        };
        if !header_click(&self.columns, &mut state.contract, key, click, now) {
            state.notify(Toast::warning(format!("Column '{key}' cannot be sorted")));
        }
    }

    fn apply_action(&self, state: &mut SessionState<T>, action: ScreenAction, now: Instant) -> Option<Job> {
        let rows = state.contract.rows().len();
        // Rows are hidden while pending; they must not be selected or acted on
        let rows_shown = !state.contract.is_pending();
        match action {
            ScreenAction::MoveUp | ScreenAction::MoveDown if rows_shown => {
                state.ui.selected =
                    step_selection(state.ui.selected, action == ScreenAction::MoveDown, rows);
            }
            ScreenAction::MoveUp | ScreenAction::MoveDown => {}

            ScreenAction::FocusSearch => state.ui.search_focused = true,
            ScreenAction::SearchInput(c) => {
                let mut term = state.contract.search_term().to_string();
                term.push(c);
                state.contract.set_search_term(&term, now);
            }
            ScreenAction::SearchBackspace => {
                let mut term = state.contract.search_term().to_string();
                if term.pop().is_some() {
                    state.contract.set_search_term(&term, now);
                }
            }
            ScreenAction::ExitSearch => state.ui.search_focused = false,
            ScreenAction::ClearSearchAndExit => {
                if !state.contract.search_term().is_empty() {
                    state.contract.set_search_term("", now);
                }
                state.ui.search_focused = false;
            }

            ScreenAction::FocusPrevColumn => {
                state.ui.focused_column = state.ui.focused_column.saturating_sub(1);
            }
            ScreenAction::FocusNextColumn => {
                let visible = visible_columns(&self.columns, &state.hidden).len();
                state.ui.focused_column = (state.ui.focused_column + 1).min(visible.saturating_sub(1));
            }
            ScreenAction::SortAscending => self.sort_focused(state, HeaderClick::Ascending, now),
            ScreenAction::SortDescending => self.sort_focused(state, HeaderClick::Descending, now),
            ScreenAction::ToggleColumn => {
                if let Some(key) = self.focused_key(state) {
                    if toggle_column(&self.columns, &mut state.hidden, key) {
                        let visible = visible_columns(&self.columns, &state.hidden).len();
                        state.ui.clamp_focus(visible);
                    } else {
                        state.notify(Toast::warning("At least one column must stay visible"));
                    }
                }
            }
            ScreenAction::ShowAllColumns => state.hidden.clear(),

            ScreenAction::Page(step) => {
                step_page(&mut state.contract, step, now);
            }
            ScreenAction::CyclePageSize => match cycle_page_size(&mut state.contract, now) {
                Ok(size) => state.notify(Toast::info(format!("{size} rows per page"))),
                Err(e) => state.notify(Toast::from_error(&e)),
            },

            ScreenAction::OpenMenu if !rows_shown => {}
            ScreenAction::OpenMenu => {
                if let Some(row) = state.contract.rows().get(state.ui.selected) {
                    let entries = available_actions(state.contract.actions(), row);
                    if entries.is_empty() {
                        state.notify(Toast::info("No actions for this row"));
                    } else {
                        state.ui.overlay = Overlay::Menu(MenuState {
                            row_id: row.id().to_string(),
                            row_label: row.label(),
                            entries,
                            selected: 0,
                        });
                    }
                }
            }
            ScreenAction::MenuUp | ScreenAction::MenuDown => {
                if let Overlay::Menu(menu) = &mut state.ui.overlay {
                    menu.move_by(if action == ScreenAction::MenuDown { 1 } else { -1 });
                }
            }
            ScreenAction::MenuSelect => return self.dispatch_job(state),
            ScreenAction::ConfirmYes => {
                if let Overlay::Confirm(confirm) = std::mem::take(&mut state.ui.overlay) {
                    return Some(self.delete_job(confirm));
                }
            }
            ScreenAction::CloseOverlay => state.ui.overlay = Overlay::None,
            ScreenAction::Create => match state.contract.create_callback().cloned() {
                Some(create) => create(),
                None => state.notify(Toast::info(format!(
                    "Creating {}s is not available here",
                    T::KIND.singular()
                ))),
            },

            ScreenAction::Reload => state.reload_requested = true,
            ScreenAction::Quit => state.ui.should_exit = true,
        }
        None
    }

    fn apply_event(state: &mut SessionState<T>, event: SessionEvent) {
        match event {
            SessionEvent::Inspect(detail) => state.ui.overlay = Overlay::Detail(detail),
            SessionEvent::ConfirmDelete(confirm) => state.ui.overlay = Overlay::Confirm(confirm),
            SessionEvent::Notice(toast) => state.notify(toast),
            SessionEvent::Reload => state.reload_requested = true,
        }
    }
}

/// Standard row actions: the target hook loads the full record into a slot
/// that the inspect callback reads; delete asks for confirmation first.
fn row_actions<T, S>(source: &Arc<S>, events: &UnboundedSender<SessionEvent>) -> RowActions<T>
where
    T: Screen,
    S: ListSource<T> + 'static,
{
    let detail: DetailSlot<T> = Arc::default();

    let target = {
        let source = Arc::clone(source);
        let detail = Arc::clone(&detail);
        move |row: T| {
            let source = Arc::clone(&source);
            let detail = Arc::clone(&detail);
            async move {
                let full = source.fetch(row.id()).await?;
                *detail.lock() = Some(full);
                Ok::<(), BackofficeError>(())
            }
        }
    };

    let inspect = {
        let detail = Arc::clone(&detail);
        let events = events.clone();
        move |row: &T| {
            let record = detail.lock().take().unwrap_or_else(|| row.clone());
            let fields = record
                .detail()
                .into_iter()
                .map(|(label, value)| (label.to_string(), value))
                .collect();
            let _ = events.send(SessionEvent::Inspect(DetailState {
                title: format!("{} {}", T::KIND.singular(), record.label()),
                fields,
            }));
        }
    };

    let delete = {
        let detail = Arc::clone(&detail);
        let events = events.clone();
        move |row: &T| {
            detail.lock().take();
            let _ = events.send(SessionEvent::ConfirmDelete(ConfirmState {
                id: row.id().to_string(),
                label: row.label(),
            }));
        }
    };

    let mut actions = RowActions::new()
        .on_target(target)
        .on_inspect(inspect)
        .on_delete(delete);
    let mutator = Mutator::new(Arc::clone(source), Arc::clone(&detail), events.clone());
    for (group, action) in T::extra_actions(&mutator) {
        actions = actions.with_action(group, action);
    }
    actions
}

impl<T, S> Browser for ScreenSession<T, S>
where
    T: Screen,
    S: ListSource<T> + 'static,
{
    fn kind(&self) -> EntityKind {
        T::KIND
    }

    fn mode(&self) -> InputMode {
        self.state.lock().ui.mode()
    }

    fn handle(&self, action: ScreenAction, now: Instant) -> Option<Job> {
        let mut state = self.state.lock();
        let job = self.apply_action(&mut state, action, now);
        state.touch();
        job
    }

    fn tick(&self, now: Instant) -> Option<Job> {
        let mut state = self.state.lock();
        let mut changed = false;

        while let Ok(event) = state.events.try_recv() {
            Self::apply_event(&mut state, event);
            changed = true;
        }

        if state.ui.toast.as_ref().is_some_and(|t| t.is_expired(now)) {
            state.ui.toast = None;
            changed = true;
        }

        let phase = self.dispatcher.phase();
        if phase != state.phase {
            state.phase = phase;
            changed = true;
        }

        let ticket = if std::mem::take(&mut state.reload_requested) {
            Some(state.contract.query_mut().refresh())
        } else {
            state.contract.query_mut().poll(now)
        };

        if changed || ticket.is_some() {
            state.touch();
        }
        drop(state);
        ticket.map(|ticket| self.fetch_job(ticket))
    }

    fn view(&self, body_rows: usize) -> BrowserViewModel {
        let state = self.state.lock();
        let contract = &state.contract;
        let mode = state.ui.mode();

        let table = compute_table_view(&self.columns, contract, &state.hidden, Some(state.ui.selected));
        let total = (!table.is_loading()).then(|| contract.query().total());

        BrowserViewModel {
            title: T::KIND.title().to_string(),
            subtitle: self.subtitle.clone(),
            search: SearchViewModel {
                query: contract.search_term().to_string(),
                is_focused: mode == InputMode::Search,
                is_settling: contract.query().is_settling(),
            },
            table,
            total,
            focused_column: self.focused_key(&state),
            hidden_columns: state.hidden.len(),
            scroll_offset: scroll_offset(state.ui.selected, body_rows),
            pagination: compute_pagination(contract),
            overlay: state.ui.overlay.clone(),
            toast: state.ui.toast.clone(),
            shortcuts: shortcuts_for(mode),
            busy: self.dispatcher.phase() == DispatchPhase::Targeting,
        }
    }

    fn revision(&self) -> u64 {
        self.state.lock().revision
    }

    fn should_exit(&self) -> bool {
        self.state.lock().ui.should_exit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Client;
    use crate::source::MemorySource;
    use crate::source::demo::DemoData;

    const QUIET: Duration = Duration::from_millis(500);

    fn session() -> ScreenSession<Client, MemorySource<Client>> {
        ScreenSession::new(
            MemorySource::new(Client::demo_records()),
            CoordinatorOptions::new(Client::default_sort()).with_quiet_period(QUIET),
            None,
        )
        .unwrap()
    }

    async fn settle(session: &ScreenSession<Client, MemorySource<Client>>, now: Instant) {
        if let Some(job) = session.tick(now) {
            job.await;
        }
    }

    #[tokio::test]
    async fn test_initial_tick_loads_first_page() {
        let session = session();
        let t0 = Instant::now();
        settle(&session, t0).await;

        let view = session.view(20);
        assert_eq!(view.table.row_count(), 10);
        assert_eq!(view.pagination.label, "page 1 of 5");
        assert_eq!(view.hidden_columns, 2);
    }

    #[tokio::test]
    async fn test_search_keystrokes_settle_into_one_request() {
        let session = session();
        let t0 = Instant::now();
        settle(&session, t0).await;

        session.handle(ScreenAction::FocusSearch, t0);
        for (i, c) in "dup".chars().enumerate() {
            session.handle(ScreenAction::SearchInput(c), t0 + Duration::from_millis(100 * i as u64));
        }
        assert!(session.tick(t0 + Duration::from_millis(300)).is_none());
        assert!(session.view(20).table.is_loading());

        settle(&session, t0 + Duration::from_millis(800)).await;
        let requests = session.source().requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].search.as_deref(), Some("dup"));
        assert_eq!(session.view(20).table.row_count(), 10);
    }

    #[tokio::test]
    async fn test_last_visible_column_cannot_be_hidden() {
        let session = session();
        let t0 = Instant::now();
        for _ in 0..10 {
            session.handle(ScreenAction::ToggleColumn, t0);
        }
        let view = session.view(20);
        assert_eq!(view.table.headers.len(), 1);
        assert!(view.toast.is_some());

        session.handle(ScreenAction::ShowAllColumns, t0);
        assert_eq!(session.view(20).table.headers.len(), 6);
    }

    #[tokio::test]
    async fn test_create_without_callback_shows_notice() {
        let session = session();
        session.handle(ScreenAction::Create, Instant::now());
        let toast = session.view(20).toast.unwrap();
        assert_eq!(toast.message, "Creating clients is not available here");
    }
}
