//! In-memory list source
//!
//! Answers the list RPC the way the store does: filter by search term, sort by
//! the requested key, then slice by offset and limit. Used for `--demo` and
//! in tests.

use std::cmp::Ordering;
use std::time::Duration;

use parking_lot::{Mutex, RwLock};

use crate::entity::Record;
use crate::error::{BackofficeError, Result};
use crate::list::query::{ListRequest, ListResult, SortOrder};

use super::ListSource;

#[derive(Debug, Default)]
pub struct MemorySource<T> {
    records: RwLock<Vec<T>>,
    latency: Option<Duration>,
    requests: Mutex<Vec<ListRequest>>,
    failure: Mutex<Option<String>>,
}

impl<T: Record> MemorySource<T> {
    pub fn new(records: Vec<T>) -> Self {
        Self {
            records: RwLock::new(records),
            latency: None,
            requests: Mutex::new(Vec::new()),
            failure: Mutex::new(None),
        }
    }

    /// Delay every call, to make loading states visible
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Make every call fail with `message` until cleared
    pub fn set_failure(&self, message: Option<String>) {
        *self.failure.lock() = message;
    }

    /// List requests received so far, oldest first
    pub fn requests(&self) -> Vec<ListRequest> {
        self.requests.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Run a list request against the stored records
    pub fn query(&self, request: &ListRequest) -> ListResult<T> {
        let records = self.records.read();
        let mut matched: Vec<&T> = match request.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => records.iter().filter(|r| r.matches(term)).collect(),
            _ => records.iter().collect(),
        };

        let descending = request.order == SortOrder::Desc;
        matched.sort_by(|a, b| {
            let by_key = match (a.sort_value(&request.sort_key), b.sort_value(&request.sort_key)) {
                (Some(x), Some(y)) if descending => y.cmp(&x),
                (Some(x), Some(y)) => x.cmp(&y),
                // Missing values go last in either direction
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            };
            by_key.then_with(|| a.id().cmp(b.id()))
        });

        let total = matched.len() as u64;
        let offset = usize::try_from(request.offset).unwrap_or(usize::MAX);
        let items = matched
            .into_iter()
            .skip(offset)
            .take(request.limit as usize)
            .cloned()
            .collect();

        ListResult { items, total }
    }

    async fn simulate(&self) -> Result<()> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        match self.failure.lock().clone() {
            Some(message) => Err(BackofficeError::Api {
                status: 503,
                message,
            }),
            None => Ok(()),
        }
    }

    fn not_found(id: &str) -> BackofficeError {
        BackofficeError::NotFound {
            kind: T::KIND.singular().to_string(),
            id: id.to_string(),
        }
    }
}

impl<T: Record> ListSource<T> for MemorySource<T> {
    async fn list(&self, request: &ListRequest) -> Result<ListResult<T>> {
        self.requests.lock().push(request.clone());
        self.simulate().await?;
        Ok(self.query(request))
    }

    async fn fetch(&self, id: &str) -> Result<T> {
        self.simulate().await?;
        self.records
            .read()
            .iter()
            .find(|r| r.id() == id)
            .cloned()
            .ok_or_else(|| Self::not_found(id))
    }

    async fn save(&self, record: &T) -> Result<()> {
        self.simulate().await?;
        let mut records = self.records.write();
        match records.iter_mut().find(|r| r.id() == record.id()) {
            Some(slot) => {
                *slot = record.clone();
                Ok(())
            }
            None => Err(Self::not_found(record.id())),
        }
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.simulate().await?;
        let mut records = self.records.write();
        let before = records.len();
        records.retain(|r| r.id() != id);
        if records.len() == before {
            return Err(Self::not_found(id));
        }
        Ok(())
    }
}
