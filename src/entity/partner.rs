use serde::{Deserialize, Serialize};

use crate::list::query::SortSpec;
use crate::list::table::{Cell, CellTone, ColumnDescriptor};

use super::{EntityKind, Record, SortValue, any_field_matches, optional};

/// A freelancer or subcontractor the agency works with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partner {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub specialty: Option<String>,
    /// Day rate in minor currency units
    #[serde(default)]
    pub day_rate_cents: Option<i64>,
    pub created_at: String,
}

impl Record for Partner {
    const KIND: EntityKind = EntityKind::Partners;

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> String {
        match &self.company {
            Some(company) => format!("{} ({company})", self.name),
            None => self.name.clone(),
        }
    }

    fn sort_value(&self, key: &str) -> Option<SortValue> {
        match key {
            "id" => Some(SortValue::from(&self.id)),
            "name" => Some(SortValue::from(&self.name)),
            "company" => self.company.as_ref().map(SortValue::from),
            "specialty" => self.specialty.as_ref().map(SortValue::from),
            "day_rate" => self.day_rate_cents.map(SortValue::from),
            "created_at" => Some(SortValue::from(&self.created_at)),
            _ => None,
        }
    }

    fn matches(&self, term: &str) -> bool {
        any_field_matches(
            [
                Some(self.name.as_str()),
                self.company.as_deref(),
                self.email.as_deref(),
                self.specialty.as_deref(),
            ]
            .into_iter()
            .flatten(),
            term,
        )
    }

    fn columns() -> Vec<ColumnDescriptor<Self>> {
        vec![
            ColumnDescriptor::new("name", "Name", |p: &Partner| {
                Cell::toned(p.name.as_str(), CellTone::Accent)
            })
            .sortable()
            .width(22),
            ColumnDescriptor::new("company", "Company", |p: &Partner| {
                p.company.as_deref().map(Cell::from).unwrap_or_else(Cell::blank)
            })
            .sortable()
            .width(20),
            ColumnDescriptor::new("specialty", "Specialty", |p: &Partner| {
                p.specialty.as_deref().map(Cell::from).unwrap_or_else(Cell::blank)
            })
            .sortable()
            .width(18),
            ColumnDescriptor::new("email", "Email", |p: &Partner| {
                p.email.as_deref().map(Cell::from).unwrap_or_else(Cell::blank)
            })
            .width(26),
            ColumnDescriptor::new("day_rate", "Day rate", |p: &Partner| match p.day_rate_cents {
                Some(cents) => Cell::new(super::format_money(cents, "EUR")),
                None => Cell::blank(),
            })
            .sortable()
            .width(14),
        ]
    }

    fn default_sort() -> SortSpec {
        SortSpec::ascending("name")
    }

    fn invisible_columns() -> &'static [&'static str] {
        &["day_rate"]
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.clone()),
            ("Name", self.name.clone()),
            ("Company", optional(&self.company)),
            ("Email", optional(&self.email)),
            ("Specialty", optional(&self.specialty)),
            ("Created", self.created_at.clone()),
        ]
    }
}
