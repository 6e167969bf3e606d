use serde::{Deserialize, Serialize};

use crate::list::query::SortSpec;
use crate::list::table::{Cell, CellTone, ColumnDescriptor};

use super::{EntityKind, Record, SortValue, any_field_matches, optional};

/// A customer of the agency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub vat_number: Option<String>,
    /// ISO 8601 date
    pub created_at: String,
}

fn optional_cell(value: &Option<String>) -> Cell {
    match value {
        Some(v) => Cell::new(v.as_str()),
        None => Cell::blank(),
    }
}

impl Record for Client {
    const KIND: EntityKind = EntityKind::Clients;

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn sort_value(&self, key: &str) -> Option<SortValue> {
        match key {
            "id" => Some(SortValue::from(&self.id)),
            "name" => Some(SortValue::from(&self.name)),
            "email" => self.email.as_ref().map(SortValue::from),
            "city" => self.city.as_ref().map(SortValue::from),
            "created_at" => Some(SortValue::from(&self.created_at)),
            _ => None,
        }
    }

    fn matches(&self, term: &str) -> bool {
        any_field_matches(
            [
                Some(self.name.as_str()),
                self.email.as_deref(),
                self.phone.as_deref(),
                self.city.as_deref(),
            ]
            .into_iter()
            .flatten(),
            term,
        )
    }

    fn columns() -> Vec<ColumnDescriptor<Self>> {
        vec![
            ColumnDescriptor::new("name", "Name", |c: &Client| Cell::toned(c.name.as_str(), CellTone::Accent))
                .sortable()
                .width(24),
            ColumnDescriptor::new("email", "Email", |c: &Client| optional_cell(&c.email))
                .sortable()
                .width(28),
            ColumnDescriptor::new("phone", "Phone", |c: &Client| optional_cell(&c.phone)).width(16),
            ColumnDescriptor::new("city", "City", |c: &Client| optional_cell(&c.city))
                .sortable()
                .width(14),
            ColumnDescriptor::new("vat_number", "VAT", |c: &Client| optional_cell(&c.vat_number))
                .width(14),
            ColumnDescriptor::new("created_at", "Created", |c: &Client| {
                Cell::toned(c.created_at.as_str(), CellTone::Muted)
            })
            .sortable()
            .width(12),
        ]
    }

    fn default_sort() -> SortSpec {
        SortSpec::ascending("name")
    }

    fn invisible_columns() -> &'static [&'static str] {
        &["phone", "vat_number"]
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.clone()),
            ("Name", self.name.clone()),
            ("Email", optional(&self.email)),
            ("Phone", optional(&self.phone)),
            ("City", optional(&self.city)),
            ("VAT number", optional(&self.vat_number)),
            ("Created", self.created_at.clone()),
        ]
    }
}
