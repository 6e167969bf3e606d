use serde::{Deserialize, Serialize};

use crate::error::BackofficeError;
use crate::list::query::SortSpec;
use crate::list::table::{Cell, CellTone, ColumnDescriptor};

use super::{EntityKind, Record, SortValue, any_field_matches, optional};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Contract,
    Proposal,
    Brief,
    Report,
    #[default]
    Other,
}

crate::string_enum!(
    DocumentKind,
    BackofficeError::UnknownStatus,
    {
        Contract => "contract",
        Proposal => "proposal",
        Brief => "brief",
        Report => "report",
        Other => "other",
    }
);

/// File metadata; the stored bytes live in object storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub kind: DocumentKind,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub size_bytes: u64,
    /// ISO 8601 timestamp
    pub uploaded_at: String,
}

/// `1536` -> `1.5 KB`
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

impl Record for Document {
    const KIND: EntityKind = EntityKind::Documents;

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> String {
        self.title.clone()
    }

    fn sort_value(&self, key: &str) -> Option<SortValue> {
        match key {
            "id" => Some(SortValue::from(&self.id)),
            "title" => Some(SortValue::from(&self.title)),
            "kind" => Some(SortValue::from(self.kind.as_str())),
            "project_name" => self.project_name.as_ref().map(SortValue::from),
            "size" => Some(SortValue::Number(i64::try_from(self.size_bytes).unwrap_or(i64::MAX))),
            "uploaded_at" => Some(SortValue::from(&self.uploaded_at)),
            _ => None,
        }
    }

    fn matches(&self, term: &str) -> bool {
        any_field_matches(
            [
                Some(self.title.as_str()),
                self.project_name.as_deref(),
                Some(self.kind.as_str()),
            ]
            .into_iter()
            .flatten(),
            term,
        )
    }

    fn columns() -> Vec<ColumnDescriptor<Self>> {
        vec![
            ColumnDescriptor::new("title", "Title", |d: &Document| {
                Cell::toned(d.title.as_str(), CellTone::Accent)
            })
            .sortable()
            .width(30),
            ColumnDescriptor::new("kind", "Kind", |d: &Document| Cell::new(d.kind.as_str()))
                .sortable()
                .width(10),
            ColumnDescriptor::new("project_name", "Project", |d: &Document| {
                d.project_name.as_deref().map(Cell::from).unwrap_or_else(Cell::blank)
            })
            .sortable()
            .width(20),
            ColumnDescriptor::new("size", "Size", |d: &Document| {
                Cell::toned(format_size(d.size_bytes), CellTone::Muted)
            })
            .sortable()
            .width(10),
            ColumnDescriptor::new("uploaded_at", "Uploaded", |d: &Document| {
                Cell::new(d.uploaded_at.as_str())
            })
            .sortable()
            .width(20),
        ]
    }

    fn default_sort() -> SortSpec {
        SortSpec::new("uploaded_at", true)
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.clone()),
            ("Title", self.title.clone()),
            ("Kind", self.kind.to_string()),
            ("Project", optional(&self.project_name)),
            ("Size", format_size(self.size_bytes)),
            ("Uploaded", self.uploaded_at.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
    }

    #[test]
    fn test_kind_defaults_to_other() {
        let d: Document =
            serde_json::from_str(r#"{"id":"d-1","title":"Brand guide","uploaded_at":"2024-01-01T10:00:00Z"}"#)
                .unwrap();
        assert_eq!(d.kind, DocumentKind::Other);
        assert!(d.matches("guide"));
    }
}
