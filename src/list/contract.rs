//! The list contract every entity screen supplies
//!
//! A `ListContract<T>` is the one object a screen builds for its entity type:
//! the pagination, sort and search state (held by the coordinator) plus the
//! optional row-action callbacks. Renderers and controllers only borrow it.

use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Instant;

use crate::error::Result;

use super::coordinator::QueryCoordinator;
use super::query::SortSpec;

/// Callback taking no entity (create)
pub type CreateCallback = Arc<dyn Fn() + Send + Sync>;

/// Callback receiving the row it was invoked on
pub type EntityCallback<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Decides whether an extra action is offered for a row
pub type VisibilityPredicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// Future returned by a target hook
pub type TargetFuture = Pin<Box<dyn Future<Output = Result<()>> + Send>>;

/// Pre-step run before any row action, e.g. to load the full record
pub type TargetHook<T> = Arc<dyn Fn(T) -> TargetFuture + Send + Sync>;

/// A screen-specific row action shown after the standard ones
pub struct AdditionalAction<T> {
    pub label: String,
    pub icon: Option<String>,
    pub callback: EntityCallback<T>,
    pub is_visible: Option<VisibilityPredicate<T>>,
}

impl<T> AdditionalAction<T> {
    pub fn new(label: impl Into<String>, callback: impl Fn(&T) + Send + Sync + 'static) -> Self {
        Self {
            label: label.into(),
            icon: None,
            callback: Arc::new(callback),
            is_visible: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn visible_when(mut self, predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        self.is_visible = Some(Arc::new(predicate));
        self
    }

    /// Actions without a predicate are always visible
    pub fn is_visible_for(&self, entity: &T) -> bool {
        self.is_visible.as_ref().is_none_or(|visible| visible(entity))
    }
}

impl<T> Clone for AdditionalAction<T> {
    fn clone(&self) -> Self {
        Self {
            label: self.label.clone(),
            icon: self.icon.clone(),
            callback: Arc::clone(&self.callback),
            is_visible: self.is_visible.clone(),
        }
    }
}

impl<T> fmt::Debug for AdditionalAction<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdditionalAction")
            .field("label", &self.label)
            .field("icon", &self.icon)
            .field("has_predicate", &self.is_visible.is_some())
            .finish()
    }
}

/// The optional action callbacks of a list
pub struct RowActions<T> {
    pub create: Option<CreateCallback>,
    pub inspect: Option<EntityCallback<T>>,
    pub update: Option<EntityCallback<T>>,
    pub delete: Option<EntityCallback<T>>,
    /// Extra actions keyed by group number; groups render in ascending order
    pub additional: BTreeMap<u32, Vec<AdditionalAction<T>>>,
    pub target: Option<TargetHook<T>>,
}

impl<T> Default for RowActions<T> {
    fn default() -> Self {
        Self {
            create: None,
            inspect: None,
            update: None,
            delete: None,
            additional: BTreeMap::new(),
            target: None,
        }
    }
}

impl<T> Clone for RowActions<T> {
    fn clone(&self) -> Self {
        Self {
            create: self.create.clone(),
            inspect: self.inspect.clone(),
            update: self.update.clone(),
            delete: self.delete.clone(),
            additional: self.additional.clone(),
            target: self.target.clone(),
        }
    }
}

impl<T> fmt::Debug for RowActions<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowActions")
            .field("create", &self.create.is_some())
            .field("inspect", &self.inspect.is_some())
            .field("update", &self.update.is_some())
            .field("delete", &self.delete.is_some())
            .field("additional", &self.additional)
            .field("target", &self.target.is_some())
            .finish()
    }
}

impl<T> RowActions<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_create(mut self, callback: impl Fn() + Send + Sync + 'static) -> Self {
        self.create = Some(Arc::new(callback));
        self
    }

    pub fn on_inspect(mut self, callback: impl Fn(&T) + Send + Sync + 'static) -> Self {
        self.inspect = Some(Arc::new(callback));
        self
    }

    pub fn on_update(mut self, callback: impl Fn(&T) + Send + Sync + 'static) -> Self {
        self.update = Some(Arc::new(callback));
        self
    }

    pub fn on_delete(mut self, callback: impl Fn(&T) + Send + Sync + 'static) -> Self {
        self.delete = Some(Arc::new(callback));
        self
    }

    pub fn on_target<F, Fut>(mut self, hook: F) -> Self
    where
        T: 'static,
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        self.target = Some(Arc::new(move |entity: T| -> TargetFuture {
            Box::pin(hook(entity))
        }));
        self
    }

    pub fn with_action(mut self, group: u32, action: AdditionalAction<T>) -> Self {
        self.additional.entry(group).or_default().push(action);
        self
    }
}

/// Pagination, sort, search and actions for one entity list
#[derive(Debug)]
pub struct ListContract<T> {
    query: QueryCoordinator<T>,
    actions: RowActions<T>,
    invisible_columns: Vec<String>,
}

impl<T> ListContract<T> {
    pub fn new(query: QueryCoordinator<T>, actions: RowActions<T>) -> Self {
        Self {
            query,
            actions,
            invisible_columns: Vec::new(),
        }
    }

    /// Column keys hidden until the user asks for them
    pub fn with_invisible_columns<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.invisible_columns = keys.into_iter().map(Into::into).collect();
        self
    }

    // Pagination

    pub fn page(&self) -> u32 {
        self.query.page()
    }

    pub fn size(&self) -> u32 {
        self.query.size()
    }

    pub fn total_page_count(&self) -> u32 {
        self.query.total_page_count()
    }

    pub fn set_page(&mut self, page: u32, now: Instant) {
        self.query.set_page(page, now);
    }

    pub fn set_size(&mut self, size: u32, now: Instant) -> Result<()> {
        self.query.set_size(size, now)
    }

    // Sort

    pub fn sort_key(&self) -> &str {
        &self.query.sort().key
    }

    /// `true` when sorting descending
    pub fn order(&self) -> bool {
        self.query.sort().descending
    }

    pub fn set_sort_details(&mut self, order: bool, sort_key: &str, now: Instant) {
        self.query.set_sort(SortSpec::new(sort_key, order), now);
    }

    // Search

    pub fn search_term(&self) -> &str {
        self.query.search()
    }

    pub fn set_search_term(&mut self, term: &str, now: Instant) {
        self.query.set_search(term, now);
    }

    // Actions

    pub fn create_callback(&self) -> Option<&CreateCallback> {
        self.actions.create.as_ref()
    }

    pub fn inspect_callback(&self) -> Option<&EntityCallback<T>> {
        self.actions.inspect.as_ref()
    }

    pub fn update_callback(&self) -> Option<&EntityCallback<T>> {
        self.actions.update.as_ref()
    }

    pub fn delete_callback(&self) -> Option<&EntityCallback<T>> {
        self.actions.delete.as_ref()
    }

    pub fn additional_actions(&self) -> &BTreeMap<u32, Vec<AdditionalAction<T>>> {
        &self.actions.additional
    }

    pub fn target_entity(&self) -> Option<&TargetHook<T>> {
        self.actions.target.as_ref()
    }

    pub fn actions(&self) -> &RowActions<T> {
        &self.actions
    }

    pub fn invisible_columns(&self) -> &[String] {
        &self.invisible_columns
    }

    // Engine access

    pub fn query(&self) -> &QueryCoordinator<T> {
        &self.query
    }

    pub fn query_mut(&mut self) -> &mut QueryCoordinator<T> {
        &mut self.query
    }

    pub fn is_pending(&self) -> bool {
        self.query.is_pending()
    }

    pub fn rows(&self) -> &[T] {
        self.query.rows()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::coordinator::CoordinatorOptions;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn contract() -> ListContract<u32> {
        let query = QueryCoordinator::new(
            CoordinatorOptions::new(SortSpec::ascending("name"))
                .with_quiet_period(Duration::from_millis(500)),
        )
        .unwrap();
        ListContract::new(query, RowActions::new())
    }

    #[test]
    fn test_contract_exposes_raw_inputs() {
        let t0 = Instant::now();
        let mut c = contract();
        c.set_page(3, t0);
        c.set_sort_details(true, "created_at", t0);
        c.set_search_term("acme", t0);

        assert_eq!(c.page(), 3);
        assert_eq!(c.sort_key(), "created_at");
        assert!(c.order());
        assert_eq!(c.search_term(), "acme");
        assert!(c.is_pending());
    }

    #[test]
    fn test_builder_registers_callbacks() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let actions: RowActions<u32> = RowActions::new()
            .on_update(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .with_action(2, AdditionalAction::new("Archive", |_| {}))
            .with_action(1, AdditionalAction::new("Duplicate", |_| {}).with_icon("+"));

        assert!(actions.inspect.is_none());
        (actions.update.as_ref().unwrap())(&7);
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        let groups: Vec<u32> = actions.additional.keys().copied().collect();
        assert_eq!(groups, vec![1, 2]);
    }

    #[test]
    fn test_additional_action_visibility() {
        let action = AdditionalAction::new("Mark paid", |_: &u32| {}).visible_when(|n| *n > 10);
        assert!(action.is_visible_for(&11));
        assert!(!action.is_visible_for(&3));

        let always = AdditionalAction::new("Copy", |_: &u32| {});
        assert!(always.is_visible_for(&0));
    }

    #[test]
    fn test_invisible_columns() {
        let c = contract().with_invisible_columns(["email", "phone"]);
        assert_eq!(c.invisible_columns(), &["email".to_string(), "phone".to_string()]);
    }
}
