//! MoMo Ledger CLI
//!
//! Command-line interface for loading mobile-money SMS backups, exporting the
//! parsed transactions, comparing lookup strategies, and serving the REST API.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- serve --source modified_sms_v2.xml --port 8000
//! cargo run -- parse modified_sms_v2.xml > transactions.json
//! cargo run -- parse modified_sms_v2.xml --format csv --output transactions.csv
//! cargo run -- compare modified_sms_v2.xml --ids 1,5,10,500
//! ```
//!
//! Logs go to stderr; set `RUST_LOG` to change the level (default `info`).
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (source not found, malformed source, bind failure, etc.)

use momo_ledger::api::{self, AppState};
use momo_ledger::cli::{self, Command, CompareArgs, ParseArgs, ServeArgs};
use momo_ledger::io::{load_store, write_records};
use momo_ledger::strategy::{compare_lookups, create_lookup};
use momo_ledger::types::LedgerError;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = cli::parse_args();

    let result = match args.command {
        Command::Serve(serve_args) => run_serve(serve_args).await,
        Command::Parse(parse_args) => run_parse(parse_args),
        Command::Compare(compare_args) => run_compare(compare_args),
    };

    if let Err(e) = result {
        error!("{}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run_serve(args: ServeArgs) -> Result<(), LedgerError> {
    let store = load_store(&args.source)?;
    let state = AppState::new(store, args.to_credential_table());
    api::serve(&args.to_server_config(), state).await
}

fn run_parse(args: ParseArgs) -> Result<(), LedgerError> {
    let store = load_store(&args.source)?;
    let records = store.all();

    match &args.output {
        Some(path) => {
            let mut output = BufWriter::new(File::create(path)?);
            write_records(&records, args.format, &mut output)?;
            output.flush()?;
        }
        None => {
            let mut output = io::stdout().lock();
            write_records(&records, args.format, &mut output)?;
        }
    }
    Ok(())
}

fn run_compare(args: CompareArgs) -> Result<(), LedgerError> {
    let store = load_store(&args.source)?;
    let baseline = create_lookup(args.baseline);
    let candidate = create_lookup(args.candidate);
    let ids = args.query_ids();

    let report = compare_lookups(&store, baseline.as_ref(), candidate.as_ref(), &ids);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report);
    }
    Ok(())
}
