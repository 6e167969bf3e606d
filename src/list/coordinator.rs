//! Query state coordination
//!
//! Combines the four debounced filter dimensions into one [`QueryKey`],
//! decides when a list request must be issued, and applies responses in key
//! order. Every issued request carries a token from a monotonically increasing
//! counter; a response is applied only if its token is still the latest one,
//! so a slow answer for a superseded key can never overwrite newer rows.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::debounce::FilterDimension;
use super::query::{ListResult, PageSizes, QueryKey, SortSpec, total_page_count};

/// What to do when a result shows the current page no longer exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutOfRangePolicy {
    /// Jump back to page 1 and fetch again
    #[default]
    Reset,
    /// Stay on the page and show the empty state
    Empty,
}

/// Construction parameters for a coordinator
#[derive(Debug, Clone)]
pub struct CoordinatorOptions {
    pub quiet_period: Duration,
    pub page_sizes: PageSizes,
    pub page_size: u32,
    pub sort: SortSpec,
    pub out_of_range: OutOfRangePolicy,
}

impl CoordinatorOptions {
    pub fn new(sort: SortSpec) -> Self {
        let page_sizes = PageSizes::default();
        Self {
            quiet_period: Duration::from_millis(500),
            page_size: page_sizes.smallest(),
            page_sizes,
            sort,
            out_of_range: OutOfRangePolicy::default(),
        }
    }

    pub fn with_quiet_period(mut self, quiet_period: Duration) -> Self {
        self.quiet_period = quiet_period;
        self
    }

    pub fn with_page_sizes(mut self, page_sizes: PageSizes, page_size: u32) -> Self {
        self.page_sizes = page_sizes;
        self.page_size = page_size;
        self
    }

    pub fn with_out_of_range(mut self, policy: OutOfRangePolicy) -> Self {
        self.out_of_range = policy;
        self
    }
}

/// A list request the caller must execute and report back with [`QueryCoordinator::apply`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub token: u64,
    pub key: QueryKey,
}

/// Result of handing a response to the coordinator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Rows and total now reflect the response
    Applied,
    /// A failure was recorded for the current key
    Failed,
    /// The response belonged to a superseded key and was dropped
    Stale,
    /// The page fell outside the result; page was reset to 1 and a new fetch is due
    PageReset,
}

/// Owns the filter dimensions and the latest applied result for one list
#[derive(Debug)]
pub struct QueryCoordinator<T> {
    page: FilterDimension<u32>,
    size: FilterDimension<u32>,
    sort: FilterDimension<SortSpec>,
    search: FilterDimension<String>,
    page_sizes: PageSizes,
    out_of_range: OutOfRangePolicy,
    next_token: u64,
    issued: Option<FetchTicket>,
    in_flight: Option<u64>,
    /// Set by an out-of-range reset until the page 1 request is issued
    reset_due: bool,
    result: ListResult<T>,
    error: Option<String>,
}

impl<T> QueryCoordinator<T> {
    /// Create a coordinator; the configured page size must be in the allow-list
    pub fn new(options: CoordinatorOptions) -> Result<Self> {
        let CoordinatorOptions {
            quiet_period,
            page_sizes,
            page_size,
            sort,
            out_of_range,
        } = options;
        let page_size = page_sizes.validate(page_size)?;

        Ok(Self {
            page: FilterDimension::new(1, quiet_period),
            size: FilterDimension::new(page_size, quiet_period),
            sort: FilterDimension::new(sort, quiet_period),
            search: FilterDimension::new(String::new(), quiet_period),
            page_sizes,
            out_of_range,
            next_token: 0,
            issued: None,
            in_flight: None,
            reset_due: false,
            result: ListResult::empty(),
            error: None,
        })
    }

    // ------------------------------------------------------------------
    // Inputs
    // ------------------------------------------------------------------

    /// Request a page; values below 1 are raised to 1
    pub fn set_page(&mut self, page: u32, now: Instant) {
        self.page.set(page.max(1), now);
    }

    /// Change the page size. The page is reset to 1 in the same quiet period,
    /// so the pair settles together and produces a single request.
    pub fn set_size(&mut self, size: u32, now: Instant) -> Result<()> {
        let size = self.page_sizes.validate(size)?;
        self.size.set(size, now);
        self.page.set(1, now);
        Ok(())
    }

    pub fn set_sort(&mut self, sort: SortSpec, now: Instant) {
        self.sort.set(sort, now);
    }

    pub fn set_search(&mut self, term: impl Into<String>, now: Instant) {
        self.search.set(term.into(), now);
    }

    // ------------------------------------------------------------------
    // Driving
    // ------------------------------------------------------------------

    /// Commit due inputs and issue a request if the settled key changed
    pub fn poll(&mut self, now: Instant) -> Option<FetchTicket> {
        self.page.poll(now);
        self.size.poll(now);
        self.sort.poll(now);
        self.search.poll(now);

        let key = self.current_key();
        match &self.issued {
            Some(ticket) if ticket.key == key => None,
            _ => Some(self.issue(key)),
        }
    }

    /// Issue a request for the current key even if it was already fetched
    pub fn refresh(&mut self) -> FetchTicket {
        let key = self.current_key();
        self.issue(key)
    }

    fn issue(&mut self, key: QueryKey) -> FetchTicket {
        self.next_token += 1;
        let ticket = FetchTicket {
            token: self.next_token,
            key,
        };
        tracing::debug!(
            token = ticket.token,
            page = ticket.key.page,
            size = ticket.key.size,
            sort = %ticket.key.sort_key,
            descending = ticket.key.descending,
            search = %ticket.key.search,
            "issuing list request"
        );
        self.issued = Some(ticket.clone());
        self.in_flight = Some(ticket.token);
        self.reset_due = false;
        ticket
    }

    /// Hand a response back. Only the latest issued token is applied.
    pub fn apply<E: std::fmt::Display>(
        &mut self,
        token: u64,
        response: std::result::Result<ListResult<T>, E>,
    ) -> ApplyOutcome {
        let current = self.issued.as_ref().map(|t| t.token);
        if current != Some(token) {
            tracing::debug!(token, ?current, "discarding stale list response");
            return ApplyOutcome::Stale;
        }
        self.in_flight = None;

        match response {
            Ok(result) => {
                self.error = None;
                let pages = total_page_count(result.total, *self.size.settled());
                let page = *self.page.settled();
                self.result = result;

                if page > pages.max(1) && self.out_of_range == OutOfRangePolicy::Reset {
                    tracing::debug!(page, pages, "page out of range, resetting to 1");
                    self.page.commit_now(1);
                    self.result.items.clear();
                    self.reset_due = true;
                    return ApplyOutcome::PageReset;
                }
                ApplyOutcome::Applied
            }
            Err(e) => {
                tracing::warn!(token, "list request failed: {e}");
                self.result = ListResult::empty();
                self.error = Some(e.to_string());
                ApplyOutcome::Failed
            }
        }
    }

    // ------------------------------------------------------------------
    // Derived state
    // ------------------------------------------------------------------

    /// Key built from the settled dimensions
    pub fn current_key(&self) -> QueryKey {
        QueryKey::new(
            *self.page.settled(),
            *self.size.settled(),
            self.sort.settled(),
            self.search.settled(),
        )
    }

    /// Any input still settling, the request for the current key unanswered,
    /// or a page reset waiting for its request
    pub fn is_pending(&self) -> bool {
        self.is_settling() || self.in_flight.is_some() || self.reset_due
    }

    pub fn is_settling(&self) -> bool {
        self.page.is_settling()
            || self.size.is_settling()
            || self.sort.is_settling()
            || self.search.is_settling()
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Earliest instant at which a pending input will commit
    pub fn next_deadline(&self) -> Option<Instant> {
        [
            self.page.deadline(),
            self.size.deadline(),
            self.sort.deadline(),
            self.search.deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Page as last requested by the user
    pub fn page(&self) -> u32 {
        *self.page.raw()
    }

    pub fn size(&self) -> u32 {
        *self.size.raw()
    }

    pub fn sort(&self) -> &SortSpec {
        self.sort.raw()
    }

    pub fn search(&self) -> &str {
        self.search.raw()
    }

    pub fn page_sizes(&self) -> &PageSizes {
        &self.page_sizes
    }

    pub fn out_of_range_policy(&self) -> OutOfRangePolicy {
        self.out_of_range
    }

    /// `ceil(total / size)` of the latest applied result
    pub fn total_page_count(&self) -> u32 {
        total_page_count(self.result.total, *self.size.settled())
    }

    pub fn total(&self) -> u64 {
        self.result.total
    }

    pub fn rows(&self) -> &[T] {
        &self.result.items
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The ticket most recently issued, answered or not
    pub fn last_issued(&self) -> Option<&FetchTicket> {
        self.issued.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIET: Duration = Duration::from_millis(500);

    fn coordinator() -> QueryCoordinator<&'static str> {
        QueryCoordinator::new(
            CoordinatorOptions::new(SortSpec::ascending("name")).with_quiet_period(QUIET),
        )
        .unwrap()
    }

    fn ok(
        items: Vec<&'static str>,
        total: u64,
    ) -> std::result::Result<ListResult<&'static str>, String> {
        Ok(ListResult { items, total })
    }

    #[test]
    fn test_first_poll_issues_initial_request() {
        let t0 = Instant::now();
        let mut c = coordinator();

        let ticket = c.poll(t0).expect("initial request");
        assert_eq!(ticket.token, 1);
        assert_eq!(ticket.key.page, 1);
        assert_eq!(ticket.key.size, 10);
        assert_eq!(ticket.key.offset, 0);
        assert!(c.is_pending());

        // Same key, no new request
        assert!(c.poll(t0).is_none());
    }

    #[test]
    fn test_apply_current_token() {
        let t0 = Instant::now();
        let mut c = coordinator();
        let ticket = c.poll(t0).unwrap();

        assert_eq!(c.apply(ticket.token, ok(vec!["a", "b"], 95)), ApplyOutcome::Applied);
        assert!(!c.is_pending());
        assert_eq!(c.rows(), &["a", "b"]);
        assert_eq!(c.total_page_count(), 10);
    }

    #[test]
    fn test_superseded_response_is_discarded() {
        let t0 = Instant::now();
        let mut c = coordinator();
        let first = c.poll(t0).unwrap();
        c.apply(first.token, ok(vec!["a"], 30));

        c.set_page(2, t0);
        let k1 = c.poll(t0 + QUIET).unwrap();
        c.set_page(3, t0 + QUIET);
        let k2 = c.poll(t0 + QUIET * 2).unwrap();
        assert!(k2.token > k1.token);

        // K2 answers first, then K1 straggles in
        assert_eq!(c.apply(k2.token, ok(vec!["page3"], 30)), ApplyOutcome::Applied);
        assert_eq!(c.apply(k1.token, ok(vec!["page2"], 30)), ApplyOutcome::Stale);
        assert_eq!(c.rows(), &["page3"]);
    }

    #[test]
    fn test_stale_response_does_not_clear_pending() {
        let t0 = Instant::now();
        let mut c = coordinator();
        let k1 = c.poll(t0).unwrap();
        c.set_search("x", t0);
        let k2 = c.poll(t0 + QUIET).unwrap();

        assert_eq!(c.apply(k1.token, ok(vec!["old"], 1)), ApplyOutcome::Stale);
        assert!(c.is_pending(), "current key still unanswered");
        assert!(c.rows().is_empty());

        c.apply(k2.token, ok(vec!["new"], 1));
        assert!(!c.is_pending());
    }

    #[test]
    fn test_pending_while_settling() {
        let t0 = Instant::now();
        let mut c = coordinator();
        let ticket = c.poll(t0).unwrap();
        c.apply(ticket.token, ok(vec![], 0));
        assert!(!c.is_pending());

        c.set_search("d", t0);
        assert!(c.is_pending());
        assert!(c.is_settling());
        assert_eq!(c.search(), "d");
        assert_eq!(c.current_key().search, "");
        assert_eq!(c.next_deadline(), Some(t0 + QUIET));
    }

    #[test]
    fn test_size_change_resets_page_in_one_request() {
        let t0 = Instant::now();
        let mut c = coordinator();
        let ticket = c.poll(t0).unwrap();
        c.apply(ticket.token, ok(vec![], 500));

        c.set_page(4, t0);
        let paged = c.poll(t0 + QUIET).unwrap();
        assert_eq!(paged.key.offset, 30);
        c.apply(paged.token, ok(vec![], 500));

        let t1 = t0 + QUIET * 2;
        c.set_size(50, t1).unwrap();
        assert_eq!(c.page(), 1);
        assert!(c.poll(t1 + Duration::from_millis(100)).is_none());

        let resized = c.poll(t1 + QUIET).unwrap();
        assert_eq!(resized.key.page, 1);
        assert_eq!(resized.key.size, 50);
        assert_eq!(resized.key.offset, 0);
        assert!(c.poll(t1 + QUIET * 2).is_none());
    }

    #[test]
    fn test_invalid_size_rejected_without_state_change() {
        let t0 = Instant::now();
        let mut c = coordinator();
        assert!(c.set_size(25, t0).is_err());
        assert_eq!(c.size(), 10);
        assert!(!c.is_settling());
    }

    #[test]
    fn test_fetch_failure_clears_rows() {
        let t0 = Instant::now();
        let mut c = coordinator();
        let first = c.poll(t0).unwrap();
        c.apply(first.token, ok(vec!["a"], 1));

        let again = c.refresh();
        let failed: std::result::Result<ListResult<&str>, String> = Err("boom".to_string());
        assert_eq!(c.apply(again.token, failed), ApplyOutcome::Failed);
        assert!(!c.is_pending());
        assert!(c.rows().is_empty());
        assert_eq!(c.error(), Some("boom"));
        assert_eq!(c.total_page_count(), 0);
    }

    #[test]
    fn test_out_of_range_reset_policy() {
        let t0 = Instant::now();
        let mut c = coordinator();
        let first = c.poll(t0).unwrap();
        c.apply(first.token, ok(vec![], 100));

        c.set_page(5, t0);
        let paged = c.poll(t0 + QUIET).unwrap();
        c.apply(paged.token, ok(vec![], 100));

        // A narrower search leaves only one page
        c.set_search("dup", t0 + QUIET);
        let narrowed = c.poll(t0 + QUIET * 2).unwrap();
        assert_eq!(narrowed.key.page, 5);
        assert_eq!(c.apply(narrowed.token, ok(vec!["stray"], 3)), ApplyOutcome::PageReset);
        assert_eq!(c.page(), 1);

        // Still pending until page 1 has been requested and answered
        assert!(c.is_pending());
        assert!(!c.is_fetching());
        assert!(c.rows().is_empty());

        let retry = c.poll(t0 + QUIET * 2).expect("page 1 request");
        assert_eq!(retry.key.page, 1);
        assert_eq!(retry.key.search, "dup");
        assert!(c.is_pending());

        assert_eq!(c.apply(retry.token, ok(vec!["a", "b", "c"], 3)), ApplyOutcome::Applied);
        assert!(!c.is_pending());
    }

    #[test]
    fn test_out_of_range_empty_policy() {
        let t0 = Instant::now();
        let mut c: QueryCoordinator<&str> = QueryCoordinator::new(
            CoordinatorOptions::new(SortSpec::ascending("name"))
                .with_quiet_period(QUIET)
                .with_out_of_range(OutOfRangePolicy::Empty),
        )
        .unwrap();
        c.set_page(5, t0);
        let ticket = c.poll(t0 + QUIET).unwrap();

        assert_eq!(c.apply(ticket.token, ok(vec![], 3)), ApplyOutcome::Applied);
        assert_eq!(c.page(), 5);
        assert!(c.rows().is_empty());
        assert!(c.poll(t0 + QUIET).is_none());
    }

    #[test]
    fn test_whitespace_only_edit_issues_no_request() {
        let t0 = Instant::now();
        let mut c = coordinator();
        c.set_search("dup", t0);
        let ticket = c.poll(t0 + QUIET).unwrap();
        c.apply(ticket.token, ok(vec!["a"], 1));

        c.set_search("dup ", t0 + QUIET);
        assert!(c.poll(t0 + QUIET * 2).is_none());
        assert_eq!(c.search(), "dup ");
        assert!(!c.is_pending());
    }

    #[test]
    fn test_refresh_supersedes_in_flight_request() {
        let t0 = Instant::now();
        let mut c = coordinator();
        let first = c.poll(t0).unwrap();
        let second = c.refresh();

        assert_eq!(first.key, second.key);
        assert_eq!(c.apply(first.token, ok(vec!["x"], 1)), ApplyOutcome::Stale);
        assert_eq!(c.apply(second.token, ok(vec!["y"], 1)), ApplyOutcome::Applied);
        assert_eq!(c.rows(), &["y"]);
    }
}
