//! Waterline Schemas CLI
//!
//! Collects model definition files and turns a collected model list into a
//! schema document.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use waterline_schemas::{
    collect_models, load_models, transform, write_json, write_models, Checksum, OutputFormat,
    SchemaConfig, SchemaFlavor,
};

#[derive(Parser)]
#[command(name = "waterline-schemas")]
#[command(about = "Generate JSON Schema documents from Waterline model definitions")]
struct Cli {
    /// Config file to load (optional)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Write compact JSON instead of pretty-printed
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect model files from a directory into a single JSON file
    Collect {
        /// Path to directory with model files
        source: Option<PathBuf>,

        /// Filename for output
        output: Option<PathBuf>,

        /// Exclude models whose identity matches this pattern (repeatable)
        #[arg(short, long)]
        exclude: Vec<String>,
    },

    /// Transform a model list into a draft-04 JSON Schema document
    Generate(GenerateArgs),

    /// Transform a model list into a Swagger-flavored schema document
    JsonSchema(GenerateArgs),
}

#[derive(Args)]
struct GenerateArgs {
    /// Path to JSON file with model definitions, generated via collect
    source: Option<PathBuf>,

    /// Filename for output
    output: Option<PathBuf>,

    /// Add <prefix> to all element ids
    #[arg(long)]
    uri_prefix: Option<String>,

    /// Document id
    #[arg(long)]
    id: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = SchemaConfig::load_from(cli.config.as_deref())?;
    if cli.compact {
        config.output.format = OutputFormat::Compact;
    }

    match cli.command {
        Commands::Collect { source, output, exclude } => {
            if let Some(source) = source {
                config.collect.source = source;
            }
            if let Some(output) = output {
                config.collect.output = output;
            }
            config.collect.exclude.extend(exclude);
            collect(&config)
        }
        Commands::Generate(args) => generate(config, args, SchemaFlavor::Definitions),
        Commands::JsonSchema(args) => generate(config, args, SchemaFlavor::Swagger),
    }
}

fn collect(config: &SchemaConfig) -> anyhow::Result<()> {
    let filter = config.model_filter()?;

    println!("📂 Collecting models from {:?}", config.collect.source);
    let models = collect_models(&config.collect.source, |model| filter.allows(model))?;

    write_models(&config.collect.output, &models, config.output.format)?;
    println!("✅ Wrote {} models to {:?}", models.len(), config.collect.output);
    Ok(())
}

fn generate(
    mut config: SchemaConfig,
    args: GenerateArgs,
    flavor: SchemaFlavor,
) -> anyhow::Result<()> {
    let source = args.source.unwrap_or_else(|| config.generate.source.clone());
    let output = args.output.unwrap_or_else(|| match flavor {
        SchemaFlavor::Definitions => config.generate.output.clone(),
        SchemaFlavor::Swagger => config.json_schema.output.clone(),
    });

    if args.uri_prefix.is_some() {
        config.generate.uri_prefix = args.uri_prefix;
    }
    if args.id.is_some() {
        config.generate.id = args.id;
    }
    let options = config.transform_options(flavor);

    println!("📦 Loading models from {:?}", source);
    let models = load_models(&source)
        .with_context(|| format!("Error running script for {}", source.display()))?;

    let document = transform(&models, &options);
    write_json(&output, &document, config.output.format)?;

    let checksum = Checksum::of_document(&document)?;
    info!(flavor = ?flavor, models = models.len(), %checksum, "Generated schema document");

    println!("✅ Wrote {} definitions to {:?}", document.definitions.len(), output);
    Ok(())
}
