use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use graph_entities::{EntityRegistry, GraphEntitiesError, ProjectConfig, Strictness};

#[derive(Parser)]
#[command(name = "graph-entities", version)]
#[command(about = "Describe and validate knowledge-graph entity schemas", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to a configuration file (defaults to ./graph-entities.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered entity types
    List,

    /// Describe an entity type's fields and extraction guidance
    Describe {
        /// Entity type to describe
        #[arg(default_value = "Tool")]
        entity: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Validate JSON records against an entity type
    Validate {
        /// File holding a JSON object or array of objects ("-" for stdin)
        input: String,

        /// Entity type to validate against
        #[arg(long, default_value = "Tool")]
        entity: String,

        /// Non-emptiness policy (overrides config and environment)
        #[arg(long, value_enum)]
        strictness: Option<Strictness>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    /// Markdown
    Text,
    /// Field descriptors as JSON
    Json,
    /// JSON Schema
    JsonSchema,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolve the strictness to use.
/// CLI argument takes highest precedence, then env and config file, then default.
fn resolve_strictness(cli: Option<Strictness>, config: &ProjectConfig) -> Strictness {
    cli.unwrap_or(config.validation.strictness)
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("failed to read input: {}", input))
    }
}

fn describe(registry: &EntityRegistry, entity: &str, format: Format) -> Result<()> {
    let description = registry.describe(entity)?;
    match format {
        Format::Text => print!("{}", description),
        Format::Json => println!("{}", serde_json::to_string_pretty(&description)?),
        Format::JsonSchema => println!(
            "{}",
            serde_json::to_string_pretty(&description.json_schema())?
        ),
    }
    Ok(())
}

/// Validate every record, printing normalized records to stdout and issues to
/// stderr. Returns the number of records that failed.
fn validate(
    registry: &EntityRegistry,
    entity: &str,
    input: &str,
    strictness: Strictness,
) -> Result<usize> {
    registry.describe(entity)?;

    let text = read_input(input)?;
    let document: Value = serde_json::from_str(&text)
        .map_err(GraphEntitiesError::from)
        .with_context(|| format!("failed to parse input: {}", input))?;

    let records = match document {
        Value::Array(records) => records,
        record => vec![record],
    };
    debug!(entity, count = records.len(), %strictness, "validating records");

    let mut failed = 0;
    for (index, record) in records.iter().enumerate() {
        match registry.validate(entity, record, strictness) {
            Ok(normalized) => println!("{}", normalized),
            Err(GraphEntitiesError::Validation(e)) => {
                eprintln!("record {}: {}", index, e);
                failed += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }

    info!(entity, total = records.len(), failed, "validation finished");
    Ok(failed)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config =
        ProjectConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    let registry = EntityRegistry::builtin();

    match cli.command {
        Commands::List => {
            for name in registry.names() {
                println!("{}", name);
            }
        }
        Commands::Describe { entity, format } => {
            describe(&registry, &entity, format)?;
        }
        Commands::Validate {
            input,
            entity,
            strictness,
        } => {
            let strictness = resolve_strictness(strictness, &config);
            let failed = validate(&registry, &entity, &input, strictness)?;
            if failed > 0 {
                error!(failed, "some records failed validation");
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
