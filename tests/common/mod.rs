#![allow(dead_code)]

use std::process::{Command, Output};
use std::sync::Arc;

use backoffice::entity::Client;
use backoffice::list::{CoordinatorOptions, ListContract, QueryCoordinator, RowActions};
use backoffice::source::MemorySource;
use tempfile::TempDir;

/// Runs the backoffice binary with its settings directory in a temp dir
pub struct BackofficeTest {
    pub temp_dir: TempDir,
}

impl BackofficeTest {
    pub fn new() -> Self {
        BackofficeTest {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_backoffice"))
            .args(args)
            .current_dir(self.temp_dir.path())
            .env("BACKOFFICE_ROOT", self.temp_dir.path().join(".backoffice"))
            .env_remove("BACKOFFICE_ENDPOINT")
            .env_remove("BACKOFFICE_API_KEY")
            .env_remove("BACKOFFICE_LOG")
            .output()
            .expect("Failed to execute backoffice command")
    }

    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        if !output.status.success() {
            panic!(
                "Command {:?} failed with status {:?}\nstdout: {}\nstderr: {}",
                args,
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    pub fn run_failure(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            !output.status.success(),
            "Expected command {:?} to fail, but it succeeded",
            args
        );
        String::from_utf8_lossy(&output.stderr).to_string()
    }
}

/// A client with the given id and name, everything optional left empty
pub fn client(id: &str, name: &str) -> Client {
    Client {
        id: id.to_string(),
        name: name.to_string(),
        email: None,
        phone: None,
        city: None,
        vat_number: None,
        created_at: "2024-01-01".to_string(),
    }
}

/// 95 clients, three of which contain "dup"
pub fn client_fixture() -> Vec<Client> {
    let mut clients: Vec<Client> = (1..=92)
        .map(|i| client(&format!("c-{i:03}"), &format!("Client {i:03}")))
        .collect();
    clients.push(client("c-093", "Dupont & Fils"));
    clients.push(client("c-094", "Dupuis Conseil"));
    clients.push(client("c-095", "Atelier Dupré"));
    clients
}

pub fn memory_source(clients: Vec<Client>) -> Arc<MemorySource<Client>> {
    Arc::new(MemorySource::new(clients))
}

pub fn contract(options: CoordinatorOptions) -> ListContract<Client> {
    ListContract::new(
        QueryCoordinator::new(options).expect("valid options"),
        RowActions::new(),
    )
}
