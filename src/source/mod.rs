//! Where list rows come from
//!
//! A [`ListSource`] answers the paginated list RPC for one entity type plus
//! the single-record calls row actions need (detail fetch for targeting,
//! save and delete for mutations).

use std::future::Future;

use crate::error::Result;
use crate::list::query::{ListRequest, ListResult};

pub mod demo;
pub mod http;
pub mod memory;

pub use http::HttpSource;
pub use memory::MemorySource;

/// The remote collection behind one entity screen
pub trait ListSource<T>: Send + Sync {
    /// Run the list RPC for one settled query
    fn list(&self, request: &ListRequest) -> impl Future<Output = Result<ListResult<T>>> + Send;

    /// Load the full record behind a list row
    fn fetch(&self, id: &str) -> impl Future<Output = Result<T>> + Send;

    /// Persist a modified record
    fn save(&self, record: &T) -> impl Future<Output = Result<()>> + Send;

    fn delete(&self, id: &str) -> impl Future<Output = Result<()>> + Send;
}
