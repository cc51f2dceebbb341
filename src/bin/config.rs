//! Schema Config CLI
//!
//! View and manage generator configuration.

use clap::{Parser, Subcommand};
use waterline_schemas::SchemaConfig;

#[derive(Parser)]
#[command(name = "schema-config")]
#[command(about = "View and manage waterline-schemas configuration")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show current configuration
    Show {
        /// Config file to load (optional)
        #[arg(short, long)]
        config: Option<String>,

        /// Output as TOML
        #[arg(long)]
        toml: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Initialize a new config file
    Init {
        /// Output path
        #[arg(short, long, default_value = "waterline-schemas.toml")]
        output: String,
    },

    /// Validate configuration
    Validate {
        /// Config file to validate
        #[arg(short, long)]
        config: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Show { config, toml, json } => {
            let cfg = SchemaConfig::load_from(config.as_deref())?;

            if json {
                println!("{}", serde_json::to_string_pretty(&cfg)?);
            } else if toml {
                println!("{}", ::toml::to_string_pretty(&cfg)?);
            } else {
                println!("📋 Waterline Schemas Configuration\n");
                println!("Collect:");
                println!("  Source: {:?}", cfg.collect.source);
                println!("  Output: {:?}", cfg.collect.output);
                if !cfg.collect.exclude.is_empty() {
                    println!("  Exclude:");
                    for pattern in &cfg.collect.exclude {
                        println!("    - {}", pattern);
                    }
                }

                println!("\nGenerate:");
                println!("  Source: {:?}", cfg.generate.source);
                println!("  Output: {:?}", cfg.generate.output);
                println!("  Id: {:?}", cfg.generate.id);
                println!("  URI prefix: {:?}", cfg.generate.uri_prefix);

                println!("\nJSON Schema:");
                println!("  Output: {:?}", cfg.json_schema.output);

                println!("\nOutput:");
                println!("  Format: {:?}", cfg.output.format);
            }
        }

        Commands::Init { output } => {
            let cfg = SchemaConfig::default();
            cfg.save(&output)?;
            println!("✅ Created config file: {}", output);
        }

        Commands::Validate { config } => {
            let cfg = match SchemaConfig::load_from(config.as_deref()) {
                Ok(cfg) => cfg,
                Err(e) => {
                    eprintln!("❌ Configuration error: {}", e);
                    std::process::exit(1);
                }
            };

            if let Err(e) = cfg.model_filter() {
                eprintln!("❌ Configuration error: {}", e);
                std::process::exit(1);
            }

            println!("✅ Configuration is valid");
            println!("   Models: {:?}", cfg.collect.source);
            println!("   Exclusions: {}", cfg.collect.exclude.len());
        }
    }

    Ok(())
}
