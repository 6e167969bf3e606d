use clap::Parser;
use std::process::ExitCode;

use backoffice::cli::{Cli, Commands, ConfigAction};
use backoffice::commands::{
    LsOptions, cmd_browse, cmd_config_get, cmd_config_set, cmd_config_show, cmd_ls,
};

/// Log to stderr only when `BACKOFFICE_LOG` is set, so nothing is drawn over the TUI
fn init_logging() {
    let Ok(filter) = std::env::var("BACKOFFICE_LOG") else {
        return;
    };
    let filter = tracing_subscriber::EnvFilter::try_new(&filter)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("backoffice=debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Ls {
            entity,
            search,
            page,
            size,
            sort,
            desc,
            demo,
            output,
        } => {
            cmd_ls(
                entity,
                LsOptions {
                    search,
                    page,
                    size,
                    sort,
                    desc,
                    demo,
                },
                output,
            )
            .await
        }
        Commands::Browse { entity, demo } => cmd_browse(entity, demo).await,
        Commands::Config { action } => match action {
            ConfigAction::Show { output } => cmd_config_show(output),
            ConfigAction::Get { key, output } => cmd_config_get(&key, output),
            ConfigAction::Set { key, value, output } => cmd_config_set(&key, &value, output),
        },
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
