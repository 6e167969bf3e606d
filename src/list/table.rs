//! Column-driven table view model
//!
//! Turns a column set and a [`ListContract`] into headers plus exactly one
//! body branch. Nothing here fetches; the view model is rebuilt from the
//! contract on every render.

use std::collections::BTreeSet;
use std::time::Instant;

use crate::error::{BackofficeError, Result};

use super::contract::ListContract;

/// Visual emphasis of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellTone {
    #[default]
    Normal,
    Muted,
    Accent,
    Success,
    Warning,
    Danger,
}

/// One rendered table cell
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cell {
    pub text: String,
    pub tone: CellTone,
}

impl Cell {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: CellTone::Normal,
        }
    }

    pub fn toned(text: impl Into<String>, tone: CellTone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }

    /// Placeholder for a missing value
    pub fn blank() -> Self {
        Self::toned("-", CellTone::Muted)
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// Describes one table column; built once per screen and never mutated
pub struct ColumnDescriptor<T> {
    pub key: &'static str,
    pub title: &'static str,
    pub sortable: bool,
    /// Preferred width in terminal cells
    pub width: u16,
    pub render: fn(&T) -> Cell,
}

impl<T> ColumnDescriptor<T> {
    pub fn new(key: &'static str, title: &'static str, render: fn(&T) -> Cell) -> Self {
        Self {
            key,
            title,
            sortable: false,
            width: 16,
            render,
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }
}

impl<T> Clone for ColumnDescriptor<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            title: self.title,
            sortable: self.sortable,
            width: self.width,
            render: self.render,
        }
    }
}

impl<T> std::fmt::Debug for ColumnDescriptor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColumnDescriptor")
            .field("key", &self.key)
            .field("title", &self.title)
            .field("sortable", &self.sortable)
            .field("width", &self.width)
            .finish()
    }
}

/// Direction arrow shown on the active sort column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortIndicator {
    Ascending,
    Descending,
}

impl SortIndicator {
    pub fn glyph(self) -> &'static str {
        match self {
            SortIndicator::Ascending => "▲",
            SortIndicator::Descending => "▼",
        }
    }
}

/// A header cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub key: &'static str,
    pub title: &'static str,
    pub sortable: bool,
    pub width: u16,
    /// Set only on the column the list is sorted by
    pub indicator: Option<SortIndicator>,
}

/// One body row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub cells: Vec<Cell>,
    pub is_selected: bool,
}

/// The body branch to draw; exactly one applies at a time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableBody {
    Loading,
    Error(String),
    Empty,
    Rows(Vec<TableRow>),
}

/// Everything a renderer needs to draw the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableViewModel {
    pub headers: Vec<HeaderCell>,
    pub body: TableBody,
}

impl TableViewModel {
    pub fn is_loading(&self) -> bool {
        self.body == TableBody::Loading
    }

    pub fn row_count(&self) -> usize {
        match &self.body {
            TableBody::Rows(rows) => rows.len(),
            _ => 0,
        }
    }
}

/// How a header was activated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderClick {
    /// Explicit ascending request
    Ascending,
    /// Explicit descending request
    Descending,
    /// Flip direction if already sorted ascending on this column, else ascending
    Toggle,
}

/// Columns the user currently sees, in descriptor order
pub fn visible_columns<'a, T>(
    columns: &'a [ColumnDescriptor<T>],
    hidden: &BTreeSet<String>,
) -> Vec<&'a ColumnDescriptor<T>> {
    columns.iter().filter(|c| !hidden.contains(c.key)).collect()
}

/// Hidden set a screen starts with: the contract's invisible columns that exist
pub fn initial_hidden<T>(columns: &[ColumnDescriptor<T>], contract: &ListContract<T>) -> BTreeSet<String> {
    contract
        .invisible_columns()
        .iter()
        .filter(|key| columns.iter().any(|c| c.key == key.as_str()))
        .cloned()
        .collect()
}

/// Show or hide `key`. The last visible column cannot be hidden.
///
/// Returns `true` when the hidden set changed.
pub fn toggle_column<T>(columns: &[ColumnDescriptor<T>], hidden: &mut BTreeSet<String>, key: &str) -> bool {
    if !columns.iter().any(|c| c.key == key) {
        return false;
    }
    if hidden.remove(key) {
        return true;
    }
    if visible_columns(columns, hidden).len() <= 1 {
        return false;
    }
    hidden.insert(key.to_string())
}

/// Build the view model for the current contract state
pub fn compute_table_view<T>(
    columns: &[ColumnDescriptor<T>],
    contract: &ListContract<T>,
    hidden: &BTreeSet<String>,
    selected: Option<usize>,
) -> TableViewModel {
    let visible = visible_columns(columns, hidden);

    let headers = visible
        .iter()
        .map(|column| HeaderCell {
            key: column.key,
            title: column.title,
            sortable: column.sortable,
            width: column.width,
            indicator: (column.sortable && column.key == contract.sort_key()).then(|| {
                if contract.order() {
                    SortIndicator::Descending
                } else {
                    SortIndicator::Ascending
                }
            }),
        })
        .collect();

    let body = if contract.is_pending() {
        TableBody::Loading
    } else if let Some(message) = contract.query().error() {
        TableBody::Error(message.to_string())
    } else if contract.rows().is_empty() {
        TableBody::Empty
    } else {
        TableBody::Rows(
            contract
                .rows()
                .iter()
                .enumerate()
                .map(|(i, row)| TableRow {
                    cells: visible.iter().map(|column| (column.render)(row)).collect(),
                    is_selected: selected == Some(i),
                })
                .collect(),
        )
    };

    TableViewModel { headers, body }
}

/// Fails unless `key` names a sortable column
pub fn validate_sort_key<T>(columns: &[ColumnDescriptor<T>], key: &str) -> Result<()> {
    match columns.iter().find(|c| c.key == key) {
        Some(column) if column.sortable => Ok(()),
        _ => Err(BackofficeError::UnsortableColumn(key.to_string())),
    }
}

/// Apply a header activation to the contract.
///
/// Clicks on unknown or non-sortable columns are ignored and return `false`.
pub fn header_click<T>(
    columns: &[ColumnDescriptor<T>],
    contract: &mut ListContract<T>,
    key: &str,
    click: HeaderClick,
    now: Instant,
) -> bool {
    if validate_sort_key(columns, key).is_err() {
        return false;
    }
    let descending = match click {
        HeaderClick::Ascending => false,
        HeaderClick::Descending => true,
        HeaderClick::Toggle => contract.sort_key() == key && !contract.order(),
    };
    contract.set_sort_details(descending, key, now);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::contract::RowActions;
    use crate::list::coordinator::{CoordinatorOptions, QueryCoordinator};
    use crate::list::query::{ListResult, SortSpec};
    use std::time::Duration;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: &'static str,
        city: &'static str,
    }

    fn columns() -> Vec<ColumnDescriptor<Row>> {
        vec![
            ColumnDescriptor::new("name", "Name", |r: &Row| Cell::new(r.name)).sortable(),
            ColumnDescriptor::new("city", "City", |r: &Row| Cell::new(r.city)),
        ]
    }

    fn contract() -> ListContract<Row> {
        let query = QueryCoordinator::new(
            CoordinatorOptions::new(SortSpec::ascending("name"))
                .with_quiet_period(Duration::from_millis(500)),
        )
        .unwrap();
        ListContract::new(query, RowActions::new())
    }

    fn loaded(rows: Vec<Row>) -> ListContract<Row> {
        let mut c = contract();
        let total = rows.len() as u64;
        let ticket = c.query_mut().poll(Instant::now()).unwrap();
        c.query_mut()
            .apply::<String>(ticket.token, Ok(ListResult { items: rows, total }));
        c
    }

    #[test]
    fn test_pending_contract_renders_loading() {
        let mut c = contract();
        c.query_mut().poll(Instant::now());
        let view = compute_table_view(&columns(), &c, &BTreeSet::new(), None);
        assert_eq!(view.body, TableBody::Loading);
        assert_eq!(view.headers.len(), 2);
    }

    #[test]
    fn test_empty_result_renders_empty() {
        let c = loaded(vec![]);
        let view = compute_table_view(&columns(), &c, &BTreeSet::new(), None);
        assert_eq!(view.body, TableBody::Empty);
    }

    #[test]
    fn test_rows_follow_visible_columns() {
        let c = loaded(vec![Row { name: "Acme", city: "Oslo" }]);
        let hidden = BTreeSet::from(["city".to_string()]);
        let view = compute_table_view(&columns(), &c, &hidden, Some(0));

        assert_eq!(view.headers.len(), 1);
        match view.body {
            TableBody::Rows(rows) => {
                assert_eq!(rows[0].cells, vec![Cell::new("Acme")]);
                assert!(rows[0].is_selected);
            }
            other => panic!("expected rows, got {other:?}"),
        }
    }

    #[test]
    fn test_indicator_only_on_sorted_sortable_column() {
        let c = loaded(vec![Row { name: "Acme", city: "Oslo" }]);
        let view = compute_table_view(&columns(), &c, &BTreeSet::new(), None);
        assert_eq!(view.headers[0].indicator, Some(SortIndicator::Ascending));
        assert_eq!(view.headers[1].indicator, None);
    }

    #[test]
    fn test_header_toggle_is_deterministic() {
        let t0 = Instant::now();
        let cols = columns();
        let mut c = contract();

        // Already ascending on "name": toggle flips to descending
        assert!(header_click(&cols, &mut c, "name", HeaderClick::Toggle, t0));
        assert!(c.order());
        // Descending: toggle goes back to ascending
        assert!(header_click(&cols, &mut c, "name", HeaderClick::Toggle, t0));
        assert!(!c.order());

        assert!(header_click(&cols, &mut c, "name", HeaderClick::Descending, t0));
        assert!(c.order());
        assert!(header_click(&cols, &mut c, "name", HeaderClick::Ascending, t0));
        assert!(!c.order());
    }

    #[test]
    fn test_non_sortable_header_is_ignored() {
        let t0 = Instant::now();
        let cols = columns();
        let mut c = contract();
        assert!(!header_click(&cols, &mut c, "city", HeaderClick::Toggle, t0));
        assert!(!header_click(&cols, &mut c, "nope", HeaderClick::Ascending, t0));
        assert_eq!(c.sort_key(), "name");
        assert!(!c.is_pending());
    }

    #[test]
    fn test_toggle_column_keeps_one_visible() {
        let cols = columns();
        let mut hidden = BTreeSet::new();
        assert!(toggle_column(&cols, &mut hidden, "city"));
        assert!(!toggle_column(&cols, &mut hidden, "name"));
        assert!(toggle_column(&cols, &mut hidden, "city"));
        assert!(hidden.is_empty());
        assert!(!toggle_column(&cols, &mut hidden, "missing"));
    }

    #[test]
    fn test_initial_hidden_ignores_unknown_keys() {
        let c = contract().with_invisible_columns(["city", "ghost"]);
        let hidden = initial_hidden(&columns(), &c);
        assert_eq!(hidden, BTreeSet::from(["city".to_string()]));
    }
}
