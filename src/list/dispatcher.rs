//! Row action dispatch with an asynchronous targeting step
//!
//! Before any row action runs, the contract's target hook is awaited (for
//! example to load the full record behind a list row). Only when it succeeds
//! is the requested callback invoked, and always with the original row.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::error::{BackofficeError, Result};

use super::contract::{EntityCallback, RowActions};

/// A row action a user can pick from the menu
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RowAction {
    Inspect,
    Update,
    Delete,
    /// Extra action by group number and position within the group
    Additional { group: u32, index: usize },
}

impl fmt::Display for RowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowAction::Inspect => write!(f, "inspect"),
            RowAction::Update => write!(f, "update"),
            RowAction::Delete => write!(f, "delete"),
            RowAction::Additional { group, index } => write!(f, "action {group}.{index}"),
        }
    }
}

/// One entry of the per-row action menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionEntry {
    pub action: RowAction,
    pub label: String,
    pub icon: Option<String>,
    /// Menu section; standard actions live in section 0
    pub group: u32,
}

/// Dispatcher lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchPhase {
    #[default]
    Idle,
    Targeting,
    Dispatching,
}

/// Menu entries offered for `entity`, in display order
pub fn available_actions<T>(actions: &RowActions<T>, entity: &T) -> Vec<ActionEntry> {
    let mut entries = Vec::new();
    let standard = [
        (RowAction::Inspect, "Inspect", actions.inspect.is_some()),
        (RowAction::Update, "Edit", actions.update.is_some()),
        (RowAction::Delete, "Delete", actions.delete.is_some()),
    ];
    for (action, label, present) in standard {
        if present {
            entries.push(ActionEntry {
                action,
                label: label.to_string(),
                icon: None,
                group: 0,
            });
        }
    }

    for (&group, group_actions) in &actions.additional {
        for (index, extra) in group_actions.iter().enumerate() {
            if extra.is_visible_for(entity) {
                entries.push(ActionEntry {
                    action: RowAction::Additional { group, index },
                    label: extra.label.clone(),
                    icon: extra.icon.clone(),
                    group,
                });
            }
        }
    }
    entries
}

fn resolve_callback<T>(
    actions: &RowActions<T>,
    action: &RowAction,
    entity: &T,
) -> Result<EntityCallback<T>> {
    let callback = match action {
        RowAction::Inspect => actions.inspect.clone(),
        RowAction::Update => actions.update.clone(),
        RowAction::Delete => actions.delete.clone(),
        RowAction::Additional { group, index } => actions
            .additional
            .get(group)
            .and_then(|g| g.get(*index))
            .filter(|extra| extra.is_visible_for(entity))
            .map(|extra| Arc::clone(&extra.callback)),
    };
    callback.ok_or_else(|| BackofficeError::ActionUnavailable(action.to_string()))
}

/// Runs row actions one at a time through the targeting protocol.
///
/// Cloning yields a handle to the same dispatcher, so the phase can be read
/// by the renderer while a dispatch runs on another task.
#[derive(Debug, Clone, Default)]
pub struct RowActionDispatcher {
    phase: Arc<Mutex<DispatchPhase>>,
    target_timeout: Option<Duration>,
}

/// Returns the dispatcher to idle however the dispatch ends
struct PhaseGuard<'a> {
    phase: &'a Mutex<DispatchPhase>,
}

impl Drop for PhaseGuard<'_> {
    fn drop(&mut self) {
        *self.phase.lock() = DispatchPhase::Idle;
    }
}

impl RowActionDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bound the targeting step; `None` waits indefinitely
    pub fn with_target_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.target_timeout = timeout;
        self
    }

    pub fn phase(&self) -> DispatchPhase {
        *self.phase.lock()
    }

    pub fn is_busy(&self) -> bool {
        self.phase() != DispatchPhase::Idle
    }

    fn begin(&self) -> Result<PhaseGuard<'_>> {
        let mut phase = self.phase.lock();
        if *phase != DispatchPhase::Idle {
            return Err(BackofficeError::ActionBusy);
        }
        *phase = DispatchPhase::Targeting;
        Ok(PhaseGuard { phase: &self.phase })
    }

    /// Target `entity`, then invoke the callback registered for `action`.
    ///
    /// A missing callback fails before targeting. A failed or timed-out
    /// target hook aborts without invoking the callback.
    pub async fn dispatch<T>(&self, actions: &RowActions<T>, action: &RowAction, entity: &T) -> Result<()>
    where
        T: Clone + Send + 'static,
    {
        let callback = resolve_callback(actions, action, entity)?;
        let _guard = self.begin()?;
        tracing::debug!(%action, "row action targeting");

        if let Some(target) = &actions.target {
            let pending = target(entity.clone());
            let outcome = match self.target_timeout {
                Some(limit) => tokio::time::timeout(limit, pending).await.map_err(|_| {
                    BackofficeError::Timeout("loading row details".to_string(), limit.as_secs())
                })?,
                None => pending.await,
            };
            if let Err(e) = outcome {
                tracing::warn!(%action, "row targeting failed: {e}");
                return Err(match e {
                    BackofficeError::Target(_) | BackofficeError::Timeout(..) => e,
                    other => BackofficeError::Target(other.to_string()),
                });
            }
        }

        *self.phase.lock() = DispatchPhase::Dispatching;
        tracing::debug!(%action, "row action dispatching");
        callback(entity);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::contract::AdditionalAction;

    type Log = Arc<Mutex<Vec<String>>>;

    fn logging_actions(log: &Log, fail_target: bool) -> RowActions<String> {
        let target_log = Arc::clone(log);
        let update_log = Arc::clone(log);
        let delete_log = Arc::clone(log);
        RowActions::new()
            .on_update(move |row: &String| update_log.lock().push(format!("update:{row}")))
            .on_delete(move |row: &String| delete_log.lock().push(format!("delete:{row}")))
            .on_target(move |row: String| {
                let log = Arc::clone(&target_log);
                async move {
                    tokio::task::yield_now().await;
                    log.lock().push(format!("target:{row}"));
                    if fail_target {
                        Err(BackofficeError::Other("detail fetch failed".to_string()))
                    } else {
                        Ok(())
                    }
                }
            })
    }

    #[tokio::test]
    async fn test_target_completes_before_callback() {
        let log: Log = Arc::default();
        let actions = logging_actions(&log, false);
        let dispatcher = RowActionDispatcher::new();

        dispatcher
            .dispatch(&actions, &RowAction::Update, &"acme".to_string())
            .await
            .unwrap();

        assert_eq!(*log.lock(), vec!["target:acme", "update:acme"]);
        assert_eq!(dispatcher.phase(), DispatchPhase::Idle);
    }

    #[tokio::test]
    async fn test_target_failure_aborts_action() {
        let log: Log = Arc::default();
        let actions = logging_actions(&log, true);
        let dispatcher = RowActionDispatcher::new();

        let result = dispatcher
            .dispatch(&actions, &RowAction::Delete, &"acme".to_string())
            .await;

        assert!(matches!(result, Err(BackofficeError::Target(_))));
        assert_eq!(*log.lock(), vec!["target:acme"]);
        assert_eq!(dispatcher.phase(), DispatchPhase::Idle);
    }

    #[tokio::test]
    async fn test_missing_callback_fails_without_targeting() {
        let log: Log = Arc::default();
        let actions = logging_actions(&log, false);
        let dispatcher = RowActionDispatcher::new();

        let result = dispatcher
            .dispatch(&actions, &RowAction::Inspect, &"acme".to_string())
            .await;

        assert!(matches!(result, Err(BackofficeError::ActionUnavailable(_))));
        assert!(log.lock().is_empty());
    }

    #[tokio::test]
    async fn test_callback_receives_original_row() {
        let seen: Log = Arc::default();
        let sink = Arc::clone(&seen);
        let actions: RowActions<String> = RowActions::new()
            .on_inspect(move |row: &String| sink.lock().push(row.clone()))
            .on_target(|row: String| async move {
                // The hook owns its copy; changing it must not leak into the callback
                let _detail = format!("{row} (full record)");
                Ok(())
            });

        RowActionDispatcher::new()
            .dispatch(&actions, &RowAction::Inspect, &"row-1".to_string())
            .await
            .unwrap();

        assert_eq!(*seen.lock(), vec!["row-1"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_target_timeout() {
        let log: Log = Arc::default();
        let update_log = Arc::clone(&log);
        let actions: RowActions<String> = RowActions::new()
            .on_update(move |row: &String| update_log.lock().push(row.clone()))
            .on_target(|_row: String| async {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(())
            });
        let dispatcher = RowActionDispatcher::new().with_target_timeout(Some(Duration::from_secs(5)));

        let result = dispatcher
            .dispatch(&actions, &RowAction::Update, &"slow".to_string())
            .await;

        assert!(matches!(result, Err(BackofficeError::Timeout(_, 5))));
        assert!(log.lock().is_empty());
        assert!(!dispatcher.is_busy());
    }

    #[tokio::test]
    async fn test_busy_dispatcher_rejects_second_action() {
        let (release_tx, release_rx) = tokio::sync::oneshot::channel::<()>();
        let release_rx = Arc::new(tokio::sync::Mutex::new(Some(release_rx)));
        let actions: RowActions<String> = RowActions::new()
            .on_update(|_: &String| {})
            .on_target(move |_row: String| {
                let release_rx = Arc::clone(&release_rx);
                async move {
                    if let Some(rx) = release_rx.lock().await.take() {
                        let _ = rx.await;
                    }
                    Ok(())
                }
            });
        let dispatcher = RowActionDispatcher::new();

        let first = {
            let dispatcher = dispatcher.clone();
            let actions = actions.clone();
            tokio::spawn(async move {
                dispatcher
                    .dispatch(&actions, &RowAction::Update, &"a".to_string())
                    .await
            })
        };

        while dispatcher.phase() != DispatchPhase::Targeting {
            tokio::task::yield_now().await;
        }
        let second = dispatcher
            .dispatch(&actions, &RowAction::Update, &"b".to_string())
            .await;
        assert!(matches!(second, Err(BackofficeError::ActionBusy)));

        release_tx.send(()).unwrap();
        first.await.unwrap().unwrap();
        assert_eq!(dispatcher.phase(), DispatchPhase::Idle);
    }

    #[test]
    fn test_available_actions_order_and_visibility() {
        let actions: RowActions<u32> = RowActions::new()
            .on_inspect(|_| {})
            .on_delete(|_| {})
            .with_action(2, AdditionalAction::new("Archive", |_| {}))
            .with_action(
                1,
                AdditionalAction::new("Send reminder", |_| {}).visible_when(|n: &u32| *n > 100),
            );

        let labels: Vec<String> = available_actions(&actions, &5)
            .into_iter()
            .map(|e| e.label)
            .collect();
        assert_eq!(labels, vec!["Inspect", "Delete", "Archive"]);

        let entries = available_actions(&actions, &500);
        assert_eq!(
            entries.iter().map(|e| e.label.as_str()).collect::<Vec<_>>(),
            vec!["Inspect", "Delete", "Send reminder", "Archive"]
        );
        assert_eq!(entries[2].action, RowAction::Additional { group: 1, index: 0 });
    }

    #[tokio::test]
    async fn test_hidden_additional_action_is_unavailable() {
        let actions: RowActions<u32> = RowActions::new().with_action(
            1,
            AdditionalAction::new("Send reminder", |_| {}).visible_when(|n: &u32| *n > 100),
        );
        let result = RowActionDispatcher::new()
            .dispatch(&actions, &RowAction::Additional { group: 1, index: 0 }, &5)
            .await;
        assert!(matches!(result, Err(BackofficeError::ActionUnavailable(_))));
    }
}
