//! CLI entry point for tablegen

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tablegen_codegen::codegen::TemplateKind;
use tablegen_codegen::config::CodegenConfig;
use tablegen_codegen::GenerationRequest;

#[derive(Parser)]
#[command(name = "tablegen")]
#[command(about = "Generate Java entity, DAO and MyBatis mapper files from a database table")]
#[command(version)]
struct Cli {
    /// Path to configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Project root to write into (overrides config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory of templates overriding the built-in ones
    #[arg(short, long)]
    templates: Option<PathBuf>,

    /// Dry run - show what would be generated without writing files
    #[arg(long)]
    dry_run: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate entity, DAO and mapper files for a table
    Generate {
        /// Table to generate from
        #[arg(long)]
        table: String,

        /// Target package (overrides config)
        #[arg(long)]
        package: Option<String>,

        /// Table-name prefix to strip (overrides config)
        #[arg(long)]
        prefix: Option<String>,

        /// Only generate these files (entity, dao, mapper)
        #[arg(long, value_delimiter = ',')]
        only: Vec<TemplateKind>,
    },
    /// Inspect a table (show introspected columns for debugging)
    Inspect {
        /// Table to inspect
        #[arg(long)]
        table: String,

        /// Print the table descriptor as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (before logging, so we can use config.log_level)
    let mut config = CodegenConfig::load(cli.config.as_deref())?;

    // Initialize logging
    // Priority: RUST_LOG env var > config.log_level > default (debug for dev, info for release)
    let default_level = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };
    let log_level = config.log_level.as_deref().unwrap_or(default_level);

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .init();

    // Apply CLI overrides
    if let Some(output) = cli.output {
        config.output_dir = output;
    }
    if let Some(templates) = cli.templates {
        config.template_dir = Some(templates);
    }
    if cli.dry_run {
        config.dry_run = true;
    }

    match cli.command {
        Commands::Generate {
            table,
            package,
            prefix,
            only,
        } => {
            let mut request = GenerationRequest::from_config(table, &config);
            if let Some(package) = package {
                request.package = package;
            }
            if let Some(prefix) = prefix {
                request.table_prefix = prefix;
            }
            request.kinds = only;
            generate(&config, &request)
        }
        Commands::Inspect { table, json } => {
            let request = GenerationRequest::from_config(table, &config);
            inspect_table(&config, &request, json)
        }
    }
}

fn generate(config: &CodegenConfig, request: &GenerationRequest) -> Result<()> {
    info!("Generating code from table: {}", request.table_name);
    let report = tablegen_codegen::generate(config, request)?;

    if config.dry_run {
        println!("Dry run mode - would generate:");
        for path in &report.skipped {
            println!("  {}", path.display());
        }
    } else {
        for path in &report.written {
            println!("  {}", path.display());
        }
    }

    if !report.is_complete() {
        for failure in &report.failures {
            eprintln!(
                "  failed {} ({}): {}",
                failure.kind,
                failure.path.display(),
                failure.error
            );
        }
        bail!(
            "{} of the requested files could not be generated",
            report.failures.len()
        );
    }

    info!("Code generation completed successfully");
    Ok(())
}

fn inspect_table(config: &CodegenConfig, request: &GenerationRequest, json: bool) -> Result<()> {
    let table = tablegen_codegen::inspect(config, request)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }

    println!("Table: {}.{}", table.table_schema(), table.table_name());
    if !table.table_comment().is_empty() {
        println!("  Comment: {}", table.table_comment());
    }
    println!("  Class: {}", table.class_name());
    println!("  Columns:");
    for col in table.columns() {
        let length = match (col.column_length, col.column_scale) {
            (Some(length), Some(scale)) => format!("({},{})", length, scale),
            (Some(length), None) => format!("({})", length),
            _ => String::new(),
        };
        println!(
            "    - {} {}{} -> {} {}",
            col.column_name, col.column_type, length, col.short_field_type, col.field_name
        );
        if !col.column_comment.is_empty() {
            println!("      {}", col.column_comment);
        }
    }
    if !table.imports().is_empty() {
        println!("  Imports: {:?}", table.imports());
    }

    Ok(())
}
