use serde::{Deserialize, Serialize};

use crate::error::BackofficeError;
use crate::list::query::SortSpec;
use crate::list::table::{Cell, CellTone, ColumnDescriptor};

use super::{EntityKind, Record, SortValue, any_field_matches, format_money, optional};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    #[default]
    Draft,
    Sent,
    Paid,
    Overdue,
    Cancelled,
}

crate::string_enum!(
    InvoiceStatus,
    BackofficeError::UnknownStatus,
    {
        Draft => "draft",
        Sent => "sent",
        Paid => "paid",
        Overdue => "overdue",
        Cancelled => "cancelled",
    }
);

impl InvoiceStatus {
    pub fn tone(self) -> CellTone {
        match self {
            InvoiceStatus::Draft | InvoiceStatus::Cancelled => CellTone::Muted,
            InvoiceStatus::Sent => CellTone::Accent,
            InvoiceStatus::Paid => CellTone::Success,
            InvoiceStatus::Overdue => CellTone::Danger,
        }
    }

    /// Still waiting for money
    pub fn is_open(self) -> bool {
        matches!(self, InvoiceStatus::Sent | InvoiceStatus::Overdue)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    /// Human-facing invoice number, e.g. `2024-0042`
    pub number: String,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub status: InvoiceStatus,
    /// Total including tax, in minor currency units
    pub amount_cents: i64,
    pub currency: String,
    /// ISO 8601 date
    pub issued_on: String,
    #[serde(default)]
    pub due_on: Option<String>,
}

impl Record for Invoice {
    const KIND: EntityKind = EntityKind::Invoices;

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> String {
        format!("invoice {}", self.number)
    }

    fn sort_value(&self, key: &str) -> Option<SortValue> {
        match key {
            "id" => Some(SortValue::from(&self.id)),
            "number" => Some(SortValue::from(&self.number)),
            "client_name" => self.client_name.as_ref().map(SortValue::from),
            "status" => Some(SortValue::from(self.status.as_str())),
            "amount" => Some(SortValue::from(self.amount_cents)),
            "issued_on" => Some(SortValue::from(&self.issued_on)),
            "due_on" => self.due_on.as_ref().map(SortValue::from),
            _ => None,
        }
    }

    fn matches(&self, term: &str) -> bool {
        any_field_matches(
            [
                Some(self.number.as_str()),
                self.client_name.as_deref(),
                Some(self.status.as_str()),
            ]
            .into_iter()
            .flatten(),
            term,
        )
    }

    fn columns() -> Vec<ColumnDescriptor<Self>> {
        vec![
            ColumnDescriptor::new("number", "Number", |i: &Invoice| {
                Cell::toned(i.number.as_str(), CellTone::Accent)
            })
            .sortable()
            .width(12),
            ColumnDescriptor::new("client_name", "Client", |i: &Invoice| {
                i.client_name.as_deref().map(Cell::from).unwrap_or_else(Cell::blank)
            })
            .sortable()
            .width(22),
            ColumnDescriptor::new("status", "Status", |i: &Invoice| {
                Cell::toned(i.status.as_str(), i.status.tone())
            })
            .sortable()
            .width(10),
            ColumnDescriptor::new("amount", "Amount", |i: &Invoice| {
                Cell::new(format_money(i.amount_cents, &i.currency))
            })
            .sortable()
            .width(16),
            ColumnDescriptor::new("issued_on", "Issued", |i: &Invoice| Cell::new(i.issued_on.as_str()))
                .sortable()
                .width(12),
            ColumnDescriptor::new("due_on", "Due", |i: &Invoice| match &i.due_on {
                Some(due) if i.status == InvoiceStatus::Overdue => {
                    Cell::toned(due.as_str(), CellTone::Danger)
                }
                Some(due) => Cell::new(due.as_str()),
                None => Cell::blank(),
            })
            .sortable()
            .width(12),
        ]
    }

    fn default_sort() -> SortSpec {
        SortSpec::new("issued_on", true)
    }

    fn invisible_columns() -> &'static [&'static str] {
        &["due_on"]
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.clone()),
            ("Number", self.number.clone()),
            ("Client", optional(&self.client_name)),
            ("Status", self.status.to_string()),
            ("Amount", format_money(self.amount_cents, &self.currency)),
            ("Issued", self.issued_on.clone()),
            ("Due", optional(&self.due_on)),
        ]
    }
}
