//! Browse session integration tests
//!
//! Exercise a full `ScreenSession` over an in-memory source through the same
//! calls the iocraft component makes: key -> action -> `handle`, the ticker's
//! `tick`, and `view` for rendering. Jobs are awaited inline instead of being
//! spawned.

mod common;

use std::time::{Duration, Instant};

use backoffice::entity::{Client, Record};
use backoffice::list::{CoordinatorOptions, PageStep};
use backoffice::source::{ListSource, MemorySource};
use backoffice::tui::components::ToastLevel;
use backoffice::tui::model::{InputMode, Overlay, ScreenAction, key_to_action};
use backoffice::tui::session::{Browser, ScreenSession};
use common::client_fixture;
use iocraft::prelude::{KeyCode, KeyModifiers};

const QUIET: Duration = Duration::from_millis(500);

type Session = ScreenSession<Client, MemorySource<Client>>;

fn session() -> Session {
    ScreenSession::new(
        MemorySource::new(client_fixture()),
        CoordinatorOptions::new(Client::default_sort()).with_quiet_period(QUIET),
        None,
    )
    .unwrap()
}

async fn tick(session: &Session, now: Instant) {
    if let Some(job) = session.tick(now) {
        job.await;
    }
}

async fn press(session: &Session, code: KeyCode, now: Instant) {
    let action = key_to_action(session.mode(), code, KeyModifiers::NONE)
        .unwrap_or_else(|| panic!("{code:?} is not bound in {:?}", session.mode()));
    if let Some(job) = session.handle(action, now) {
        job.await;
    }
}

#[tokio::test]
async fn test_typing_shows_loading_until_settled() {
    let session = session();
    let t0 = Instant::now();
    tick(&session, t0).await;

    press(&session, KeyCode::Char('/'), t0).await;
    assert_eq!(session.mode(), InputMode::Search);
    for c in "dup".chars() {
        press(&session, KeyCode::Char(c), t0).await;
    }
    tick(&session, t0 + Duration::from_millis(100)).await;

    let view = session.view(20);
    insta::assert_debug_snapshot!(
        (view.search.query.as_str(), view.search.is_settling, view.table.is_loading()),
        @r#"
    (
        "dup",
        true,
        true,
    )
    "#
    );

    tick(&session, t0 + QUIET).await;
    press(&session, KeyCode::Enter, t0 + QUIET).await;

    let view = session.view(20);
    assert_eq!(session.mode(), InputMode::Table);
    assert_eq!(view.table.row_count(), 3);
    assert_eq!(view.total, Some(3));
    assert_eq!(view.pagination.label, "page 1 of 1");
    assert!(!view.pagination.next_enabled);
}

#[tokio::test]
async fn test_next_page_key_requests_offset() {
    let session = session();
    let t0 = Instant::now();
    tick(&session, t0).await;

    press(&session, KeyCode::Char(']'), t0).await;
    tick(&session, t0 + QUIET).await;

    let last = session.source().requests().pop().unwrap();
    assert_eq!((last.limit, last.offset), (10, 10));
    assert_eq!(session.view(20).pagination.label, "page 2 of 10");

    // Already on the first page after `{`; prev does nothing
    press(&session, KeyCode::Char('{'), t0 + QUIET).await;
    tick(&session, t0 + QUIET * 2).await;
    assert!(session.handle(ScreenAction::Page(PageStep::Prev), t0 + QUIET * 2).is_none());
    assert_eq!(session.view(20).pagination.page, 1);
}

#[tokio::test]
async fn test_inspect_loads_detail_before_opening() {
    let session = session();
    let t0 = Instant::now();
    tick(&session, t0).await;

    press(&session, KeyCode::Enter, t0).await;
    let Overlay::Menu(menu) = session.view(20).overlay else {
        panic!("menu should be open");
    };
    let labels: Vec<_> = menu.entries.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, vec!["Inspect", "Delete"]);
    assert_eq!(menu.row_label, "Atelier Dupré");

    press(&session, KeyCode::Enter, t0).await;
    tick(&session, t0).await;

    assert_eq!(session.mode(), InputMode::Detail);
    let Overlay::Detail(detail) = session.view(20).overlay else {
        panic!("detail should be open");
    };
    assert_eq!(detail.title, "client Atelier Dupré");
    assert!(detail.fields.contains(&("ID".to_string(), "c-095".to_string())));

    press(&session, KeyCode::Esc, t0).await;
    assert_eq!(session.mode(), InputMode::Table);
}

#[tokio::test]
async fn test_menu_ignored_while_page_loads() {
    let session = session();
    let t0 = Instant::now();
    tick(&session, t0).await;

    press(&session, KeyCode::Char(']'), t0).await;
    let page_two = session.tick(t0 + QUIET).expect("page 2 request");
    assert!(session.view(20).table.is_loading());

    // Rows are hidden while loading; Enter must not act on page 1's rows
    press(&session, KeyCode::Enter, t0 + QUIET).await;
    assert_eq!(session.view(20).overlay, Overlay::None);
    assert_eq!(session.mode(), InputMode::Table);

    page_two.await;
    press(&session, KeyCode::Enter, t0 + QUIET).await;
    let Overlay::Menu(menu) = session.view(20).overlay else {
        panic!("menu should open once rows are shown");
    };
    assert_eq!(menu.row_label, "Client 010");

    press(&session, KeyCode::Enter, t0 + QUIET).await;
    tick(&session, t0 + QUIET).await;
    let Overlay::Detail(detail) = session.view(20).overlay else {
        panic!("detail should be open");
    };
    assert_eq!(detail.title, format!("client {}", menu.row_label));
}

#[tokio::test]
async fn test_menu_action_aborts_when_row_leaves_list() {
    let session = session();
    let t0 = Instant::now();
    tick(&session, t0).await;

    press(&session, KeyCode::Enter, t0).await;
    let Overlay::Menu(menu) = session.view(20).overlay else {
        panic!("menu should be open");
    };
    assert_eq!(menu.row_id, "c-095");

    // Someone else removes the row and the list reloads under the open menu
    session.source().delete("c-095").await.unwrap();
    assert!(session.handle(ScreenAction::Reload, t0).is_none());
    tick(&session, t0).await;

    press(&session, KeyCode::Enter, t0).await;
    tick(&session, t0).await;

    let view = session.view(20);
    assert_eq!(view.overlay, Overlay::None);
    let toast = view.toast.expect("abort should report");
    assert_eq!(toast.level, ToastLevel::Warning);
    assert_eq!(toast.message, "Atelier Dupré is no longer listed");
}

#[tokio::test]
async fn test_delete_confirms_then_reloads() {
    let session = session();
    let t0 = Instant::now();
    tick(&session, t0).await;

    press(&session, KeyCode::Enter, t0).await;
    press(&session, KeyCode::Char('j'), t0).await;
    press(&session, KeyCode::Enter, t0).await;
    tick(&session, t0).await;
    assert_eq!(session.mode(), InputMode::Confirm);
    assert_eq!(session.source().len(), 95);

    press(&session, KeyCode::Char('y'), t0).await;
    tick(&session, t0).await;

    assert_eq!(session.source().len(), 94);
    let view = session.view(20);
    assert_eq!(view.total, Some(94));
    let toast = view.toast.expect("delete should report");
    assert_eq!(toast.level, ToastLevel::Success);
    assert_eq!(toast.message, "Deleted Atelier Dupré");
}

#[tokio::test]
async fn test_cancelled_delete_keeps_row() {
    let session = session();
    let t0 = Instant::now();
    tick(&session, t0).await;

    press(&session, KeyCode::Enter, t0).await;
    press(&session, KeyCode::Char('j'), t0).await;
    press(&session, KeyCode::Enter, t0).await;
    tick(&session, t0).await;
    press(&session, KeyCode::Char('n'), t0).await;

    assert_eq!(session.mode(), InputMode::Table);
    assert_eq!(session.source().len(), 95);
}

#[tokio::test]
async fn test_failed_target_aborts_inspect() {
    let session = session();
    let t0 = Instant::now();
    tick(&session, t0).await;

    session.source().set_failure(Some("store unavailable".to_string()));
    press(&session, KeyCode::Enter, t0).await;
    press(&session, KeyCode::Enter, t0).await;
    tick(&session, t0).await;

    let view = session.view(20);
    assert_eq!(view.overlay, Overlay::None);
    let toast = view.toast.expect("failure should report");
    assert_eq!(toast.level, ToastLevel::Error);
    assert!(toast.message.starts_with("Load failed:"), "{}", toast.message);
}

#[tokio::test]
async fn test_sort_keys_act_on_focused_column() {
    let session = session();
    let t0 = Instant::now();
    tick(&session, t0).await;

    // name -> email
    press(&session, KeyCode::Char('l'), t0).await;
    assert_eq!(session.view(20).focused_column, Some("email"));
    press(&session, KeyCode::Char('S'), t0).await;
    tick(&session, t0 + QUIET).await;

    let last = session.source().requests().pop().unwrap();
    assert_eq!(last.sort_key, "email");
    let view = session.view(20);
    let email = view.table.headers.iter().find(|h| h.key == "email").unwrap();
    assert_eq!(email.indicator.map(|i| i.glyph()), Some("▼"));
    assert!(view.table.headers.iter().filter(|h| h.key != "email").all(|h| h.indicator.is_none()));
    assert!(Client::columns().iter().any(|c| c.key == "email" && c.sortable));
}

#[tokio::test]
async fn test_quit_key() {
    let session = session();
    assert!(!session.should_exit());
    press(&session, KeyCode::Char('q'), Instant::now()).await;
    assert!(session.should_exit());
}
