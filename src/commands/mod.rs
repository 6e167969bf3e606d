//! Console subcommands
//!
//! - `ls`: one page of an entity list, as a table or JSON
//! - `browse`: the interactive entity browser
//! - `config`: show, get and set settings

mod browse;
mod config;
mod ls;

pub use browse::cmd_browse;
pub use config::{cmd_config_get, cmd_config_set, cmd_config_show, mask_sensitive_value};
pub use ls::{LsOptions, cmd_ls, render_table, resolve_query};

use serde_json::Value;

use crate::cli::OutputOptions;
use crate::error::Result;

/// Output of a command in both machine and human form
pub struct CommandOutput {
    json: Value,
    text: Option<String>,
}

impl CommandOutput {
    pub fn new(json: Value) -> Self {
        Self { json, text: None }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Print JSON with `--json`, otherwise the text (falling back to JSON)
    pub fn print(self, output: OutputOptions) -> Result<()> {
        match self.text {
            Some(text) if !output.json => {
                println!("{text}");
                Ok(())
            }
            _ => print_json(&self.json),
        }
    }
}

/// Pretty-print a JSON value to stdout
pub fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
