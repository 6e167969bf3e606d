//! Generic server-driven list engine
//!
//! Debounced filter inputs, keyed list requests with stale-response
//! rejection, the per-screen list contract, table and pagination view
//! models, and row action dispatch.

pub mod contract;
pub mod coordinator;
pub mod debounce;
pub mod dispatcher;
pub mod pagination;
pub mod query;
pub mod table;

pub use contract::{AdditionalAction, ListContract, RowActions, TargetFuture, TargetHook};
pub use coordinator::{
    ApplyOutcome, CoordinatorOptions, FetchTicket, OutOfRangePolicy, QueryCoordinator,
};
pub use debounce::FilterDimension;
pub use dispatcher::{ActionEntry, DispatchPhase, RowAction, RowActionDispatcher, available_actions};
pub use pagination::{
    PageSizeOption, PageStep, PaginationView, compute_pagination, cycle_page_size, step_page,
};
pub use query::{
    DEFAULT_PAGE_SIZES, ListRequest, ListResult, PageSizes, QueryKey, SortOrder, SortSpec,
};
pub use table::{
    Cell, CellTone, ColumnDescriptor, HeaderClick, TableBody, TableViewModel, compute_table_view,
};
