//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use vet_console_core::ResourceKind;

#[derive(Debug, Parser)]
#[command(name = "vet-console", version, about = "Veterinary clinic records console")]
pub struct Cli {
    /// YAML config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Backend base URL, overriding config and environment
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Raise log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List records, optionally filtered and sorted
    List {
        #[arg(value_parser = parse_resource)]
        resource: ResourceKind,
        /// Filter as key=value; repeatable
        #[arg(short, long = "filter", value_name = "KEY=VALUE", value_parser = parse_assignment)]
        filters: Vec<(String, String)>,
        /// Sort column, optionally suffixed with :asc or :desc
        #[arg(short, long, value_name = "COLUMN[:DIR]")]
        sort: Option<String>,
        /// Print rows as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the form fields, filters and sort columns of a resource
    Fields {
        #[arg(value_parser = parse_resource)]
        resource: ResourceKind,
    },
    /// Create a record
    Create {
        #[arg(value_parser = parse_resource)]
        resource: ResourceKind,
        /// Form value as field=value; repeatable
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
        values: Vec<(String, String)>,
    },
    /// Update fields of an existing record
    Update {
        #[arg(value_parser = parse_resource)]
        resource: ResourceKind,
        document_id: String,
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
        values: Vec<(String, String)>,
    },
    /// Delete a record after confirmation
    Delete {
        #[arg(value_parser = parse_resource)]
        resource: ResourceKind,
        document_id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Print the navigation menu
    Nav {
        /// Current route key or path
        #[arg(default_value = "home")]
        current: String,
    },
}

fn parse_resource(s: &str) -> Result<ResourceKind, String> {
    s.parse()
}

fn parse_assignment(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in '{}'", s));
    }
    Ok((key.to_string(), value.to_string()))
}
