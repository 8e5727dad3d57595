//! Command-line interface for synthgen
//!
//! # Usage Examples
//!
//! ## Inspect a schema
//! ```bash
//! synthgen introspect --schema person.schema.json --dialect json
//! synthgen introspect --schema person.xsd --dialect xml --output-format yaml
//! ```
//!
//! ## Generate records
//! ```bash
//! # From a field configuration with custom types
//! synthgen generate --config-file fields.yaml --count 100 --seed 42
//!
//! # Straight from a schema, as CSV
//! synthgen generate --schema person.xsd --dialect xml --count 10 --format csv --output people.csv
//! ```
//!
//! ## Try out expressions
//! ```bash
//! synthgen test-type --expression "'user-' + random.digits(4)"
//! synthgen test-type --name sku --config-file fields.yaml
//! synthgen functions
//! ```

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use synth_core::{DataType, GenerationConfig, GenerationRequest, SchemaDialect};
use synthgen::{write_output, Engine, EngineConfig, OutputFormat};
use tracing_subscriber::EnvFilter;

/// Record count used when neither the command line nor the config sets one.
const DEFAULT_COUNT: i64 = 10;

#[derive(Parser)]
#[command(name = "synthgen")]
#[command(about = "Generate synthetic records from JSON Schema or XSD documents")]
#[command(long_about = None)]
struct Cli {
    /// Engine configuration file (TOML)
    #[arg(long, global = true, env = "SYNTHGEN_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the elements extracted from a schema document
    Introspect {
        /// Schema document
        #[arg(long, value_name = "PATH")]
        schema: PathBuf,

        /// Schema dialect
        #[arg(long, value_enum)]
        dialect: Dialect,

        /// Output encoding
        #[arg(long, value_enum, default_value = "json")]
        output_format: IntrospectFormat,
    },

    /// Generate records
    Generate {
        /// Field configuration (YAML or JSON) with optional custom types
        #[arg(long, value_name = "PATH", conflicts_with = "schema")]
        config_file: Option<PathBuf>,

        /// Schema document to take the fields from
        #[arg(long, value_name = "PATH", requires = "dialect")]
        schema: Option<PathBuf>,

        /// Schema dialect (with --schema)
        #[arg(long, value_enum)]
        dialect: Option<Dialect>,

        /// Number of records (overrides the config file)
        #[arg(long)]
        count: Option<i64>,

        /// Seed (overrides the config file); a random one is used if absent
        #[arg(long)]
        seed: Option<u64>,

        /// Output format (defaults to the engine config's default_format)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Evaluate an expression or a custom type once and print the result
    TestType {
        /// Expression to evaluate
        #[arg(long, conflicts_with = "name")]
        expression: Option<String>,

        /// Custom type to evaluate (with --config-file)
        #[arg(long, requires = "config_file")]
        name: Option<String>,

        /// Field configuration holding the custom type
        #[arg(long, value_name = "PATH")]
        config_file: Option<PathBuf>,
    },

    /// List the expression function library and the builtin data types
    Functions,
}

#[derive(Clone, Copy, ValueEnum)]
enum Dialect {
    Json,
    Xml,
}

impl From<Dialect> for SchemaDialect {
    fn from(dialect: Dialect) -> Self {
        match dialect {
            Dialect::Json => SchemaDialect::Json,
            Dialect::Xml => SchemaDialect::Xml,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum IntrospectFormat {
    Json,
    Yaml,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; logs go to stderr so stdout carries only output
    let filter = if cli.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("Failed to load engine config from {path:?}"))?,
        None => EngineConfig::default(),
    };
    let engine = Engine::new(config);

    match cli.command {
        Commands::Introspect {
            schema,
            dialect,
            output_format,
        } => {
            let document = read_document(&schema)?;
            let elements = engine.introspect(&document, dialect.into())?;
            let mut stdout = io::stdout().lock();
            match output_format {
                IntrospectFormat::Json => {
                    serde_json::to_writer_pretty(&mut stdout, &elements)?;
                    writeln!(stdout)?;
                }
                IntrospectFormat::Yaml => {
                    write!(stdout, "{}", serde_yaml::to_string(&elements)?)?;
                }
            }
        }

        Commands::Generate {
            config_file,
            schema,
            dialect,
            count,
            seed,
            format,
            output,
        } => {
            let request = match (config_file, schema, dialect) {
                (Some(path), _, _) => {
                    let config = load_generation_config(&path)?;
                    engine.register_config(&config)?;
                    config.to_request(Some(count.or(config.count).unwrap_or(DEFAULT_COUNT)), seed)
                }
                (None, Some(path), Some(dialect)) => {
                    let document = read_document(&path)?;
                    let elements = engine.introspect(&document, dialect.into())?;
                    let fields = elements
                        .iter()
                        .map(synth_core::FieldDefinition::from_element)
                        .collect();
                    GenerationRequest::new(fields, count.unwrap_or(DEFAULT_COUNT), seed)
                }
                _ => bail!("generate needs either --config-file or --schema with --dialect"),
            };

            let generated = engine.generate(&request)?;
            let fields: Vec<&str> = request
                .field_definitions
                .iter()
                .map(|f| f.name.as_str())
                .collect();
            let format = format.unwrap_or(engine.config().default_format);

            match output {
                Some(path) => {
                    let file = File::create(&path)
                        .with_context(|| format!("Failed to create output file {path:?}"))?;
                    write_output(&generated, &fields, format, BufWriter::new(file))?;
                    eprintln!(
                        "Wrote {} records to {} (seed {})",
                        generated.records.len(),
                        path.display(),
                        generated.seed_used
                    );
                }
                None => write_output(&generated, &fields, format, io::stdout().lock())?,
            }
        }

        Commands::TestType {
            expression,
            name,
            config_file,
        } => {
            let result = match (expression, name) {
                (Some(expression), _) => engine.self_test_expression(&expression),
                (None, Some(name)) => {
                    let path = config_file.context("--name requires --config-file")?;
                    let config = load_generation_config(&path)?;
                    let definition = config
                        .get_custom_type(&name)
                        .with_context(|| format!("Custom type '{name}' not found in {path:?}"))?;
                    engine.registry().register_definition(definition)?;
                    engine.self_test(&name)
                }
                (None, None) => bail!("test-type needs --expression or --name"),
            };
            println!("{}", serde_json::to_string_pretty(&result)?);
            if !result.success {
                bail!("self-test failed");
            }
        }

        Commands::Functions => {
            println!(
                "Function library v{}",
                synth_expr::FUNCTION_LIBRARY_VERSION
            );
            for function in engine.functions() {
                println!("  {:<36} {}", function.signature, function.description);
            }
            println!();
            println!("Builtin data types");
            for data_type in DataType::ALL {
                println!("  {:<36} {}", data_type.as_str(), data_type.description());
            }
        }
    }

    Ok(())
}

fn read_document(path: &Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("Failed to read schema file {path:?}"))
}

fn load_generation_config(path: &Path) -> anyhow::Result<GenerationConfig> {
    GenerationConfig::from_file(path)
        .with_context(|| format!("Failed to load field configuration from {path:?}"))
}
