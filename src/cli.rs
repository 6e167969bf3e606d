use clap::{Args, Parser, Subcommand};

use crate::entity::EntityKind;

#[derive(Parser)]
#[command(name = "backoffice")]
#[command(about = "Terminal administration console")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Shared output flags
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print one page of an entity list
    Ls {
        /// clients, projects, partners, invoices or documents
        #[arg(value_parser = parse_entity)]
        entity: EntityKind,

        /// Free-text search term
        #[arg(short, long)]
        search: Option<String>,

        /// Page number, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Rows per page; must be one of the configured page sizes
        #[arg(long)]
        size: Option<u32>,

        /// Sortable column key
        #[arg(long)]
        sort: Option<String>,

        /// Sort descending
        #[arg(long)]
        desc: bool,

        /// Use the seeded in-memory data instead of the remote store
        #[arg(long)]
        demo: bool,

        #[command(flatten)]
        output: OutputOptions,
    },

    /// Browse an entity interactively
    #[command(visible_alias = "b")]
    Browse {
        #[arg(value_parser = parse_entity)]
        entity: EntityKind,

        /// Use the seeded in-memory data instead of the remote store
        #[arg(long)]
        demo: bool,
    },

    /// Show or change settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Display current configuration
    Show {
        #[command(flatten)]
        output: OutputOptions,
    },
    /// Print a single value
    Get {
        key: String,
        #[command(flatten)]
        output: OutputOptions,
    },
    /// Set a configuration value
    Set {
        key: String,
        value: String,
        #[command(flatten)]
        output: OutputOptions,
    },
}

fn parse_entity(s: &str) -> Result<EntityKind, String> {
    s.parse().map_err(|_| {
        let valid: Vec<_> = EntityKind::ALL.iter().map(|k| k.as_str()).collect();
        format!("must be one of: {}", valid.join(", "))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ls_flags() {
        let cli = Cli::try_parse_from([
            "backoffice", "ls", "Clients", "--search", "dup", "--size", "50", "--desc", "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Ls {
                entity,
                search,
                page,
                size,
                desc,
                output,
                ..
            } => {
                assert_eq!(entity, EntityKind::Clients);
                assert_eq!(search.as_deref(), Some("dup"));
                assert_eq!(page, 1);
                assert_eq!(size, Some(50));
                assert!(desc);
                assert!(output.json);
            }
            _ => panic!("expected ls"),
        }
    }

    #[test]
    fn test_unknown_entity_is_rejected() {
        assert!(Cli::try_parse_from(["backoffice", "ls", "tickets"]).is_err());
    }
}
