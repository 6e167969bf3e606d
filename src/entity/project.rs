use serde::{Deserialize, Serialize};

use crate::error::BackofficeError;
use crate::list::query::SortSpec;
use crate::list::table::{Cell, CellTone, ColumnDescriptor};

use super::{EntityKind, Record, SortValue, any_field_matches, format_money, optional};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    #[default]
    Planned,
    Active,
    Completed,
    Archived,
}

crate::string_enum!(
    ProjectStatus,
    BackofficeError::UnknownStatus,
    {
        Planned => "planned",
        Active => "active",
        Completed => "completed",
        Archived => "archived",
    }
);

impl ProjectStatus {
    fn tone(self) -> CellTone {
        match self {
            ProjectStatus::Planned => CellTone::Muted,
            ProjectStatus::Active => CellTone::Accent,
            ProjectStatus::Completed => CellTone::Success,
            ProjectStatus::Archived => CellTone::Muted,
        }
    }
}

/// A piece of client work
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub status: ProjectStatus,
    /// Budget in minor currency units
    #[serde(default)]
    pub budget_cents: Option<i64>,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub due_date: Option<String>,
    pub created_at: String,
}

fn default_currency() -> String {
    "EUR".to_string()
}

impl Record for Project {
    const KIND: EntityKind = EntityKind::Projects;

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
            "client_name" => self.client_name.as_ref().map(SortValue::from),
            "status" => Some(SortValue::from(self.status.as_str())),
            "budget" => self.budget_cents.map(SortValue::from),
            "due_date" => self.due_date.as_ref().map(SortValue::from),
            "created_at" => Some(SortValue::from(&self.created_at)),
            _ => None,
        }
    }

    fn matches(&self, term: &str) -> bool {
        any_field_matches(
            [
                Some(self.name.as_str()),
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
            ColumnDescriptor::new("name", "Project", |p: &Project| {
                Cell::toned(p.name.as_str(), CellTone::Accent)
            })
            .sortable()
            .width(26),
            ColumnDescriptor::new("client_name", "Client", |p: &Project| match &p.client_name {
                Some(name) => Cell::new(name.as_str()),
                None => Cell::blank(),
            })
            .sortable()
            .width(20),
            ColumnDescriptor::new("status", "Status", |p: &Project| {
                Cell::toned(p.status.as_str(), p.status.tone())
            })
            .sortable()
            .width(10),
            ColumnDescriptor::new("budget", "Budget", |p: &Project| match p.budget_cents {
                Some(cents) => Cell::new(format_money(cents, &p.currency)),
                None => Cell::blank(),
            })
            .sortable()
            .width(16),
            ColumnDescriptor::new("due_date", "Due", |p: &Project| match &p.due_date {
                Some(date) => Cell::new(date.as_str()),
                None => Cell::blank(),
            })
            .sortable()
            .width(12),
        ]
    }

    fn default_sort() -> SortSpec {
        SortSpec::new("created_at", true)
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.clone()),
            ("Name", self.name.clone()),
            ("Client", optional(&self.client_name)),
            ("Status", self.status.to_string()),
            (
                "Budget",
                self.budget_cents
                    .map(|c| format_money(c, &self.currency))
                    .unwrap_or_else(|| "-".to_string()),
            ),
            ("Due", optional(&self.due_date)),
            ("Created", self.created_at.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_format() {
        let p: Project = serde_json::from_str(
            r#"{"id":"p-1","name":"Rebrand","status":"active","budget_cents":1500000,"created_at":"2024-02-02"}"#,
        )
        .unwrap();
        assert_eq!(p.status, ProjectStatus::Active);
        assert_eq!(p.currency, "EUR");
        assert_eq!(p.sort_value("budget"), Some(SortValue::Number(1_500_000)));
    }

    #[test]
    fn test_matches_status() {
        let p = Project {
            id: "p-2".to_string(),
            name: "Website".to_string(),
            client_name: None,
            status: ProjectStatus::Archived,
            budget_cents: None,
            currency: "EUR".to_string(),
            due_date: None,
            created_at: "2023-11-11".to_string(),
        };
        assert!(p.matches("archiv"));
        assert!(!p.matches("active"));
    }
}
