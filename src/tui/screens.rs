//! Per-entity screen extras
//!
//! The standard inspect and delete actions are wired the same way for every
//! entity. A [`Screen`] adds the entity's own row actions on top, each of
//! which describes a change and hands it to a [`Mutator`]. The change is
//! applied to the full record loaded by the target hook, not to the list row.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc::UnboundedSender;

use crate::entity::{Client, Document, Invoice, InvoiceStatus, Partner, Project, ProjectStatus, Record};
use crate::list::AdditionalAction;
use crate::source::ListSource;
use crate::tui::components::toast::Toast;
use crate::tui::session::SessionEvent;

/// Record loaded by the target hook for the row being acted on
pub type DetailSlot<T> = Arc<Mutex<Option<T>>>;

/// Saves a modified record in the background, then reports and reloads
pub struct Mutator<T> {
    detail: DetailSlot<T>,
    save: Arc<dyn Fn(T, String) + Send + Sync>,
}

impl<T> Clone for Mutator<T> {
    fn clone(&self) -> Self {
        Self {
            detail: Arc::clone(&self.detail),
            save: Arc::clone(&self.save),
        }
    }
}

impl<T: Record> Mutator<T> {
    pub(crate) fn new<S>(
        source: Arc<S>,
        detail: DetailSlot<T>,
        events: UnboundedSender<SessionEvent>,
    ) -> Self
    where
        S: ListSource<T> + 'static,
    {
        Self {
            detail,
            save: Arc::new(move |record: T, done: String| {
                let source = Arc::clone(&source);
                let events = events.clone();
                tokio::spawn(async move {
                    match source.save(&record).await {
                        Ok(()) => {
                            tracing::debug!(id = record.id(), "record saved");
                            let _ = events.send(SessionEvent::Notice(Toast::success(done)));
                            let _ = events.send(SessionEvent::Reload);
                        }
                        Err(e) => {
                            tracing::warn!(id = record.id(), "save failed: {e}");
                            let _ = events.send(SessionEvent::Notice(Toast::from_error(&e)));
                        }
                    }
                });
            }),
        }
    }

    /// Apply `change` to the targeted record behind `row` and persist it.
    /// Falls back to the row itself when no matching record was loaded.
    /// `done` is shown once the save succeeds.
    pub fn update(&self, row: &T, change: impl FnOnce(&mut T), done: impl Into<String>) {
        let mut record = self
            .detail
            .lock()
            .take()
            .filter(|full| full.id() == row.id())
            .unwrap_or_else(|| row.clone());
        change(&mut record);
        (self.save)(record, done.into())
    }
}

/// A record type with a browse screen
pub trait Screen: Record {
    /// Extra row actions keyed by menu group
    fn extra_actions(_mutator: &Mutator<Self>) -> Vec<(u32, AdditionalAction<Self>)> {
        Vec::new()
    }
}

impl Screen for Client {}

impl Screen for Partner {}

impl Screen for Document {}

impl Screen for Invoice {
    fn extra_actions(mutator: &Mutator<Self>) -> Vec<(u32, AdditionalAction<Self>)> {
        let mark_paid = {
            let mutator = mutator.clone();
            AdditionalAction::new("Mark paid", move |invoice: &Invoice| {
                mutator.update(
                    invoice,
                    |full| full.status = InvoiceStatus::Paid,
                    format!("{} marked paid", invoice.label()),
                );
            })
            .with_icon("$")
            .visible_when(|invoice: &Invoice| invoice.status.is_open())
        };
        let cancel = {
            let mutator = mutator.clone();
            AdditionalAction::new("Cancel invoice", move |invoice: &Invoice| {
                mutator.update(
                    invoice,
                    |full| full.status = InvoiceStatus::Cancelled,
                    format!("{} cancelled", invoice.label()),
                );
            })
            .visible_when(|invoice: &Invoice| invoice.status == InvoiceStatus::Draft)
        };
        vec![(1, mark_paid), (2, cancel)]
    }
}

impl Screen for Project {
    fn extra_actions(mutator: &Mutator<Self>) -> Vec<(u32, AdditionalAction<Self>)> {
        let complete = {
            let mutator = mutator.clone();
            AdditionalAction::new("Mark completed", move |project: &Project| {
                mutator.update(
                    project,
                    |full| full.status = ProjectStatus::Completed,
                    format!("{} completed", project.label()),
                );
            })
            .visible_when(|project: &Project| project.status == ProjectStatus::Active)
        };
        let archive = {
            let mutator = mutator.clone();
            AdditionalAction::new("Archive", move |project: &Project| {
                mutator.update(
                    project,
                    |full| full.status = ProjectStatus::Archived,
                    format!("{} archived", project.label()),
                );
            })
            .visible_when(|project: &Project| project.status != ProjectStatus::Archived)
        };
        vec![(1, complete), (1, archive)]
    }
}
