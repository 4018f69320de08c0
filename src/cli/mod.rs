//! Command-line interface: argument parsing and report formatting.

mod args;
mod output;

pub use args::Args;
pub use output::{print_json, print_quiet, print_report, print_summary};
