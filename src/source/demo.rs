//! Seeded sample data for `--demo`
//!
//! Records are generated deterministically from small word lists so every
//! run (and every test) sees the same rows.

use std::time::Duration;

use crate::entity::{
    Client, Document, DocumentKind, Invoice, InvoiceStatus, Partner, Project, ProjectStatus, Record,
};

use super::MemorySource;

const COMPANIES: &[&str] = &[
    "Dupont & Fils",
    "Acme Studio",
    "Nordlys",
    "Dupuis Conseil",
    "Beta Foods",
    "Helios Energy",
    "Kairos Travel",
    "Maison Dupré",
    "Orchard Labs",
    "Quartz Media",
    "Riverbank Bikes",
    "Soleil Café",
];

const CITIES: &[&str] = &["Lyon", "Paris", "Oslo", "Brest", "Nantes", "Lisbon", "Ghent"];

const PEOPLE: &[&str] = &[
    "Ada Moreau",
    "Bruno Silva",
    "Chiara Rossi",
    "Dmitri Ivanov",
    "Elif Kaya",
    "Farah Haddad",
    "Gustav Lind",
    "Hana Sato",
];

const SPECIALTIES: &[&str] = &["Illustration", "Copywriting", "Motion design", "Photography", "Backend"];

const PROJECT_WORDS: &[&str] = &["Rebrand", "Website", "Launch campaign", "Packaging", "App redesign"];

/// Latency applied to demo sources so loading states are visible
pub const DEMO_LATENCY: Duration = Duration::from_millis(250);

/// Record types with generated sample data
pub trait DemoData: Record {
    fn demo_records() -> Vec<Self>;
}

/// A memory source seeded with the demo records of `T`
pub fn demo_source<T: DemoData>() -> MemorySource<T> {
    MemorySource::new(T::demo_records())
}

fn pick<'a>(list: &[&'a str], i: usize) -> &'a str {
    list[i % list.len()]
}

/// `2024-MM-DD` spread over the year
fn date(i: usize) -> String {
    format!("2024-{:02}-{:02}", i % 12 + 1, (i * 7) % 28 + 1)
}

impl DemoData for Client {
    fn demo_records() -> Vec<Self> {
        (0..48)
            .map(|i| {
                let company = pick(COMPANIES, i);
                let name = if i < COMPANIES.len() {
                    company.to_string()
                } else {
                    format!("{company} {}", i / COMPANIES.len() + 1)
                };
                let slug: String = company
                    .chars()
                    .filter(char::is_ascii_alphanumeric)
                    .collect::<String>()
                    .to_lowercase();
                Client {
                    id: format!("c-{:03}", i + 1),
                    name,
                    email: (i % 5 != 4).then(|| format!("hello@{slug}.example")),
                    phone: (i % 3 == 0).then(|| format!("+33 1 55 {:02} {:02} {:02}", i, i * 3 % 100, i * 7 % 100)),
                    city: (i % 6 != 5).then(|| pick(CITIES, i).to_string()),
                    vat_number: (i % 2 == 0).then(|| format!("FR{:011}", 40_000_000_000u64 + i as u64 * 7919)),
                    created_at: date(i),
                }
            })
            .collect()
    }
}

impl DemoData for Project {
    fn demo_records() -> Vec<Self> {
        (0..36)
            .map(|i| Project {
                id: format!("p-{:03}", i + 1),
                name: format!("{} {}", pick(PROJECT_WORDS, i), 2023 + (i % 3)),
                client_name: (i % 7 != 6).then(|| pick(COMPANIES, i * 5).to_string()),
                status: ProjectStatus::ALL[i % ProjectStatus::ALL.len()],
                budget_cents: (i % 4 != 3).then(|| 500_000 + (i as i64) * 125_000),
                currency: "EUR".to_string(),
                due_date: (i % 2 == 0).then(|| date(i + 3)),
                created_at: date(i),
            })
            .collect()
    }
}

impl DemoData for Partner {
    fn demo_records() -> Vec<Self> {
        (0..17)
            .map(|i| {
                let name = pick(PEOPLE, i);
                let first = name.split_whitespace().next().unwrap_or(name).to_lowercase();
                Partner {
                    id: format!("pa-{:03}", i + 1),
                    name: if i < PEOPLE.len() {
                        name.to_string()
                    } else {
                        format!("{name} Jr.")
                    },
                    company: (i % 3 == 1).then(|| format!("{} Studio", name.split_whitespace().last().unwrap_or(name))),
                    email: Some(format!("{first}{i}@mail.example")),
                    specialty: Some(pick(SPECIALTIES, i).to_string()),
                    day_rate_cents: (i % 4 != 0).then(|| 35_000 + (i as i64) * 2_500),
                    created_at: date(i + 2),
                }
            })
            .collect()
    }
}

impl DemoData for Invoice {
    fn demo_records() -> Vec<Self> {
        (0..95)
            .map(|i| {
                let status = match i % 10 {
                    0 | 1 => InvoiceStatus::Draft,
                    2..=4 => InvoiceStatus::Sent,
                    5 => InvoiceStatus::Overdue,
                    9 => InvoiceStatus::Cancelled,
                    _ => InvoiceStatus::Paid,
                };
                Invoice {
                    id: format!("i-{:03}", i + 1),
                    number: format!("2024-{:04}", i + 1),
                    client_name: Some(pick(COMPANIES, i * 3).to_string()),
                    status,
                    amount_cents: 45_000 + ((i as i64 * 37_813) % 900_000),
                    currency: if i % 8 == 7 { "USD" } else { "EUR" }.to_string(),
                    issued_on: date(i),
                    due_on: (status != InvoiceStatus::Draft).then(|| date(i + 1)),
                }
            })
            .collect()
    }
}

impl DemoData for Document {
    fn demo_records() -> Vec<Self> {
        (0..23)
            .map(|i| {
                let kind = DocumentKind::ALL[i % DocumentKind::ALL.len()];
                Document {
                    id: format!("d-{:03}", i + 1),
                    title: format!("{} - {}", pick(COMPANIES, i * 2), kind),
                    kind,
                    project_name: (i % 3 != 2).then(|| format!("{} {}", pick(PROJECT_WORDS, i), 2024)),
                    size_bytes: 12_000 + (i as u64 * 48_271) % 9_000_000,
                    uploaded_at: format!("{}T{:02}:{:02}:00Z", date(i), 8 + i % 10, (i * 13) % 60),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn assert_unique_ids<T: Record>(records: &[T]) {
        let ids: HashSet<&str> = records.iter().map(|r| r.id()).collect();
        assert_eq!(ids.len(), records.len());
    }

    #[test]
    fn test_demo_ids_are_unique() {
        assert_unique_ids(&Client::demo_records());
        assert_unique_ids(&Project::demo_records());
        assert_unique_ids(&Partner::demo_records());
        assert_unique_ids(&Invoice::demo_records());
        assert_unique_ids(&Document::demo_records());
    }

    #[test]
    fn test_demo_data_is_deterministic() {
        assert_eq!(Invoice::demo_records(), Invoice::demo_records());
        assert_eq!(Invoice::demo_records().len(), 95);
    }

    #[test]
    fn test_demo_clients_contain_dup_matches() {
        let matches = Client::demo_records()
            .into_iter()
            .filter(|c| c.matches("dup"))
            .count();
        assert!(matches >= 3);
    }
}
