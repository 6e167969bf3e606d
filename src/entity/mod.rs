//! Entity records browsed by the console
//!
//! Each record type knows its column set, its default sort and how to answer
//! the questions an in-memory list source asks (search match, sort value).

use std::cmp::Ordering;

use serde::Serialize;
use serde::de::DeserializeOwned;
use unicase::UniCase;

use crate::error::BackofficeError;
use crate::list::query::SortSpec;
use crate::list::table::ColumnDescriptor;

pub mod client;
pub mod document;
pub mod invoice;
pub mod partner;
pub mod project;

pub use client::Client;
pub use document::{Document, DocumentKind};
pub use invoice::{Invoice, InvoiceStatus};
pub use partner::Partner;
pub use project::{Project, ProjectStatus};

/// The entity collections exposed by the remote store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Clients,
    Projects,
    Partners,
    Invoices,
    Documents,
}

crate::string_enum!(
    EntityKind,
    BackofficeError::UnknownEntity,
    {
        Clients => "clients",
        Projects => "projects",
        Partners => "partners",
        Invoices => "invoices",
        Documents => "documents",
    }
);

impl EntityKind {
    /// Singular noun for messages ("client 'c-1' not found")
    pub fn singular(&self) -> &'static str {
        match self {
            EntityKind::Clients => "client",
            EntityKind::Projects => "project",
            EntityKind::Partners => "partner",
            EntityKind::Invoices => "invoice",
            EntityKind::Documents => "document",
        }
    }

    /// Screen title
    pub fn title(&self) -> &'static str {
        match self {
            EntityKind::Clients => "Clients",
            EntityKind::Projects => "Projects",
            EntityKind::Partners => "Partners",
            EntityKind::Invoices => "Invoices",
            EntityKind::Documents => "Documents",
        }
    }
}

/// Comparable value of one record field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortValue {
    Number(i64),
    Text(String),
}

impl Ord for SortValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortValue::Number(a), SortValue::Number(b)) => a.cmp(b),
            (SortValue::Text(a), SortValue::Text(b)) => {
                UniCase::new(a.as_str()).cmp(&UniCase::new(b.as_str()))
            }
            (SortValue::Number(_), SortValue::Text(_)) => Ordering::Less,
            (SortValue::Text(_), SortValue::Number(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for SortValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<&str> for SortValue {
    fn from(s: &str) -> Self {
        SortValue::Text(s.to_string())
    }
}

impl From<&String> for SortValue {
    fn from(s: &String) -> Self {
        SortValue::Text(s.clone())
    }
}

impl From<i64> for SortValue {
    fn from(n: i64) -> Self {
        SortValue::Number(n)
    }
}

/// A row type the list engine can browse
pub trait Record: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    const KIND: EntityKind;

    fn id(&self) -> &str;

    /// Human-readable name used in toasts and confirm dialogs
    fn label(&self) -> String;

    /// Value of the field named by a sort key; `None` sorts last
    fn sort_value(&self, key: &str) -> Option<SortValue>;

    /// Whether the record matches a free-text search term
    fn matches(&self, term: &str) -> bool;

    fn columns() -> Vec<ColumnDescriptor<Self>>;

    fn default_sort() -> SortSpec;

    /// Column keys hidden until the user toggles them on
    fn invisible_columns() -> &'static [&'static str] {
        &[]
    }

    /// Label/value pairs for the detail view
    fn detail(&self) -> Vec<(&'static str, String)>;
}

/// Case-insensitive substring match with Unicode case folding
pub fn contains_folded(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let haystack = UniCase::new(haystack).to_folded_case();
    let needle = UniCase::new(needle).to_folded_case();
    haystack.contains(&needle)
}

/// True when any field contains `term`
pub(crate) fn any_field_matches<'a>(fields: impl IntoIterator<Item = &'a str>, term: &str) -> bool {
    let term = term.trim();
    fields.into_iter().any(|f| contains_folded(f, term))
}

/// Format an amount in minor units, e.g. `123450, "EUR"` -> `1,234.50 EUR`
pub fn format_money(cents: i64, currency: &str) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    let units = (cents / 100).to_string();

    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (i, ch) in units.chars().enumerate() {
        if i > 0 && (units.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}.{:02} {currency}", cents % 100)
}

pub(crate) fn optional(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "-".to_string())
}
