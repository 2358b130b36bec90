//! ddlforge CLI
//!
//! Command-line tool that turns JSON schema edit requests into DDL.

use std::io;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use ddlforge::prelude::*;
use ddlforge_sql::{DeparseContext, PostgresDialect};

/// Structured schema edits to DDL.
#[derive(Parser)]
#[command(name = "ddlforge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Target SQL dialect.
    #[arg(
        short,
        long,
        value_enum,
        env = "DDLFORGE_DIALECT",
        default_value_t = DialectName::Postgres
    )]
    dialect: DialectName,

    /// Spaces of indentation for lines inside CREATE TABLE.
    #[arg(long, env = "DDLFORGE_INDENT", default_value_t = 4)]
    indent: usize,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum DialectName {
    /// PostgreSQL.
    Postgres,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the DDL for a request.
    Deparse {
        /// JSON request file ("-" or absent reads stdin).
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Print the canonical spelling of a column type.
    ResolveType {
        /// Type text, e.g. "character varying(20)[]".
        #[arg(required = true, num_args = 1..)]
        raw_type: Vec<String>,
    },

    /// Check a request without rendering it.
    Validate {
        /// JSON request file ("-" or absent reads stdin).
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only DDL
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let editor = match cli.dialect {
        DialectName::Postgres => SchemaEditor::with_context(
            PostgresDialect::new(),
            DeparseContext::with_indent_width(cli.indent),
        ),
    };

    match cli.command {
        Commands::Deparse { input } => {
            let request = read_request(input.as_deref())?;
            request.validate()?;

            let sql = editor.deparse(&request)?;
            if sql.is_empty() {
                info!("Request produced no statements.");
            } else {
                println!("{sql}");
            }
        }

        Commands::ResolveType { raw_type } => {
            let raw_type = raw_type.join(" ");
            let data_type = editor.resolve_type(&raw_type)?;
            debug!(raw_type = %raw_type, data_type = ?data_type, "Resolved type");
            println!("{}", editor.dialect().data_type(&data_type)?);
        }

        Commands::Validate { input } => {
            let request = read_request(input.as_deref())?;
            request.validate()?;
            info!(
                create = request.create_tables.len(),
                rename = request.rename_tables.len(),
                alter = request.alter_tables.len(),
                drop = request.drop_tables.len(),
                "Request is valid."
            );
        }
    }

    Ok(())
}

fn read_request(input: Option<&Path>) -> ddlforge::Result<Request> {
    match input {
        Some(path) if path != Path::new("-") => {
            debug!(path = %path.display(), "Reading request");
            Request::from_path(path)
        }
        _ => {
            debug!("Reading request from stdin");
            Request::from_reader(io::stdin().lock())
        }
    }
}
