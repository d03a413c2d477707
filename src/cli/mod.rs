// CLI module
// Command-line interface and argument parsing

mod args;

pub use args::{
    CliArgs, Command, CompareArgs, LookupType, ParseArgs, ServeArgs, DEFAULT_COMPARE_IDS,
};

use clap::Parser;

/// Parse command-line arguments using clap
///
/// If parsing fails (e.g., invalid arguments, missing required arguments, or
/// --help flag), clap will display an error message or help text and exit
/// the process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
