use crate::api::{CredentialTable, ServerConfig};
use crate::io::ExportFormat;
use crate::types::RecordId;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Ids queried by `compare` when none are given
pub const DEFAULT_COMPARE_IDS: std::ops::RangeInclusive<RecordId> = 1..=20;

/// Parse, index and serve mobile-money SMS transactions
#[derive(Parser, Debug)]
#[command(name = "momo-ledger")]
#[command(about = "Parse, index and serve mobile-money SMS transactions", long_about = None)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load the SMS source and serve the transactions REST API
    Serve(ServeArgs),
    /// Load the SMS source and export the parsed records
    Parse(ParseArgs),
    /// Compare two lookup strategies over the loaded records
    Compare(CompareArgs),
}

/// Options for `serve`
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// SMS backup XML file to load at startup
    #[arg(long, env = "MOMO_SOURCE", value_name = "XML")]
    pub source: PathBuf,

    /// Address to bind
    #[arg(long, env = "MOMO_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind
    #[arg(long, env = "MOMO_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Allowed credential, repeatable (replaces the built-in table)
    #[arg(long = "user", value_name = "NAME:PASSWORD", value_parser = parse_credential)]
    pub users: Vec<(String, String)>,
}

/// Options for `parse`
#[derive(Args, Debug)]
pub struct ParseArgs {
    /// SMS backup XML file
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    pub format: ExportFormat,

    /// Output file (stdout when omitted)
    #[arg(long, short, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Options for `compare`
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// SMS backup XML file
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Comma-separated ids to query (default: 1-20)
    #[arg(long, value_delimiter = ',', value_name = "IDS")]
    pub ids: Vec<RecordId>,

    /// Strategy measured as the baseline
    #[arg(long, value_enum, default_value = "scan")]
    pub baseline: LookupType,

    /// Strategy measured against the baseline
    #[arg(long, value_enum, default_value = "indexed")]
    pub candidate: LookupType,

    /// Print the full report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Available lookup strategies
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LookupType {
    Scan,
    Indexed,
}

impl ServeArgs {
    /// Bind address for the HTTP server
    pub fn to_server_config(&self) -> ServerConfig {
        ServerConfig {
            host: self.host.clone(),
            port: self.port,
        }
    }

    /// Credential table from `--user` entries, or the built-in table
    pub fn to_credential_table(&self) -> CredentialTable {
        if self.users.is_empty() {
            CredentialTable::default()
        } else {
            CredentialTable::new(self.users.iter().cloned())
        }
    }
}

impl CompareArgs {
    /// Ids to query, falling back to [`DEFAULT_COMPARE_IDS`]
    pub fn query_ids(&self) -> Vec<RecordId> {
        if self.ids.is_empty() {
            DEFAULT_COMPARE_IDS.collect()
        } else {
            self.ids.clone()
        }
    }
}

fn parse_credential(raw: &str) -> Result<(String, String), String> {
    match raw.split_once(':') {
        Some((name, password)) if !name.is_empty() => {
            Ok((name.to_string(), password.to_string()))
        }
        _ => Err(format!("expected NAME:PASSWORD, got '{}'", raw)),
    }
}
