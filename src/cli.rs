// CLI Layer
// ユーザー入力の受付とコマンドルーティング

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// 出力フォーマット
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output (default)
    #[default]
    Text,
    /// Structured JSON output
    Json,
}

/// schema-assoc - Weak association inference for database schemas
///
/// Finds foreign-key-like relationships that are implied by naming
/// conventions but never declared as constraints.
#[derive(Parser, Debug)]
#[command(name = "schema-assoc")]
#[command(author = "Stratum Contributors")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Infer undeclared foreign key relationships from schema naming conventions")]
#[command(long_about = "schema-assoc - Weak association inference for database schemas

Reads YAML schema definitions and reports column pairs that look like
foreign keys (for example BOOKS.AUTHOR_ID -> AUTHORS.ID) but are not
declared as FOREIGN_KEY constraints.

Matching uses:
  • Table names, with common table name prefixes removed
  • Column names, with a trailing ID removed
  • Primary keys and single-column unique keys as the referenced side")]
#[command(propagate_version = true)]
#[command(after_help = "EXAMPLES:
  schema-assoc analyze schema/
  schema-assoc analyze schema/library.yaml --format json
  schema-assoc --config .schema-assoc.yaml analyze schema/")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Output format (text or json)
    #[arg(long, global = true, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Find weak associations in a schema
    ///
    /// Loads a schema file, or every .yaml/.yml file in a directory,
    /// and lists the inferred associations grouped by foreign key name.
    ///
    /// EXAMPLES:
    ///   # Analyze a schema directory
    ///   schema-assoc analyze schema/
    ///
    ///   # Machine-readable output
    ///   schema-assoc analyze schema/ --format json
    Analyze {
        /// Schema file or directory
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },
}
