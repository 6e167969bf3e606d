//! Pagination controller
//!
//! Step targets and button states derived from the contract's page and
//! page count. Stepping from a bound is a no-op.

use std::time::Instant;

use crate::error::Result;

use super::contract::ListContract;
use super::query::page_offset;

/// A step control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStep {
    First,
    Prev,
    Next,
    Last,
}

/// One page-size button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSizeOption {
    pub size: u32,
    pub selected: bool,
}

/// Rendered state of the pagination bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationView {
    pub page: u32,
    pub page_count: u32,
    pub sizes: Vec<PageSizeOption>,
    pub first_enabled: bool,
    pub prev_enabled: bool,
    pub next_enabled: bool,
    pub last_enabled: bool,
    /// "page X of Y"
    pub label: String,
    /// "showing a-b of total" or "no results"
    pub summary: String,
}

/// Page a step lands on. Never leaves `1..=page_count`; with no pages the
/// current page is kept.
pub fn step_target(step: PageStep, page: u32, page_count: u32) -> u32 {
    if page_count == 0 {
        return page;
    }
    match step {
        PageStep::First => 1,
        PageStep::Prev if page > 1 => (page - 1).min(page_count),
        PageStep::Prev => page,
        PageStep::Next if page < page_count => page + 1,
        PageStep::Next => page,
        PageStep::Last => page_count,
    }
}

/// Whether a step control is enabled
pub fn step_enabled(step: PageStep, page: u32, page_count: u32) -> bool {
    if page_count == 0 {
        return false;
    }
    match step {
        PageStep::First | PageStep::Prev => page > 1,
        PageStep::Next | PageStep::Last => page < page_count,
    }
}

/// "page X of Y"; an empty result still reads as one page
pub fn page_label(page: u32, page_count: u32) -> String {
    format!("page {} of {}", page, page_count.max(1))
}

/// "showing a-b of total"
pub fn range_summary(page: u32, size: u32, total: u64) -> String {
    if total == 0 {
        return "no results".to_string();
    }
    let start = page_offset(page, size) + 1;
    if start > total {
        return format!("showing 0 of {total}");
    }
    let end = (start - 1 + u64::from(size)).min(total);
    format!("showing {start}-{end} of {total}")
}

pub fn compute_pagination<T>(contract: &ListContract<T>) -> PaginationView {
    let page = contract.page();
    let size = contract.size();
    let page_count = contract.total_page_count();

    PaginationView {
        page,
        page_count,
        sizes: contract
            .query()
            .page_sizes()
            .as_slice()
            .iter()
            .map(|&s| PageSizeOption {
                size: s,
                selected: s == size,
            })
            .collect(),
        first_enabled: step_enabled(PageStep::First, page, page_count),
        prev_enabled: step_enabled(PageStep::Prev, page, page_count),
        next_enabled: step_enabled(PageStep::Next, page, page_count),
        last_enabled: step_enabled(PageStep::Last, page, page_count),
        label: page_label(page, page_count),
        summary: range_summary(page, size, contract.query().total()),
    }
}

/// Apply a step control. Returns `true` when the page changed.
pub fn step_page<T>(contract: &mut ListContract<T>, step: PageStep, now: Instant) -> bool {
    let page = contract.page();
    let target = step_target(step, page, contract.total_page_count());
    if target == page {
        return false;
    }
    contract.set_page(target, now);
    true
}

/// Commit a page size from the allow-list; the page goes back to 1
pub fn select_page_size<T>(contract: &mut ListContract<T>, size: u32, now: Instant) -> Result<()> {
    contract.set_size(size, now)
}

/// Move to the next allowed page size, wrapping around
pub fn cycle_page_size<T>(contract: &mut ListContract<T>, now: Instant) -> Result<u32> {
    let next = contract.query().page_sizes().next_after(contract.size());
    select_page_size(contract, next, now)?;
    Ok(next)
}
