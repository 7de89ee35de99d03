mod logging;

use clap::{Parser, Subcommand};
use console::style;
use memberwise_codegen::{self, CodegenError, Config, CONFIG_FILE};
use std::env;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new memberwise.toml config file
    Init,

    /// Expand every annotated struct and report errors without writing output
    Check,

    /// Write the expansion listing once and exit
    Run,

    /// Write the expansion listing and rewrite it on every change
    Watch,

    /// Print the constructors generated for one file
    Expand {
        /// Rust source file to expand
        file: PathBuf,
    },
}

const EXAMPLE_CONFIG: &str = r#"version = "1.0"

[source]
paths = ["src/"]

[output]
path = "target/memberwise-expanded.rs"
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            let config_path = env::current_dir()?.join(CONFIG_FILE);
            if config_path.exists() {
                println!("Config file already exists at {}", config_path.display());
                return Ok(());
            }

            fs::write(&config_path, EXAMPLE_CONFIG)?;
            println!("Created {}", CONFIG_FILE);
            Ok(())
        }
        Commands::Expand { file } => {
            print!("{}", memberwise_codegen::expand_file(&file)?);
            Ok(())
        }
        cmd => match Config::find_and_load(&env::current_dir()?) {
            Ok((config, config_dir)) => {
                env::set_current_dir(&config_dir)?;
                tracing::debug!(
                    config_dir = %config_dir.display(),
                    paths = ?config.source.paths,
                    "config loaded"
                );
                println!("Using configuration from: {}", config_dir.display());

                let result = match cmd {
                    Commands::Check => {
                        println!("Checking annotated structs...");
                        memberwise_codegen::check(&config)
                            .map(|()| println!("All checks passed!"))
                    }
                    Commands::Run => {
                        println!("Generating constructors...");
                        memberwise_codegen::generate(&config).map(|()| println!("Done!"))
                    }
                    Commands::Watch => {
                        println!("Starting watch mode...");
                        memberwise_codegen::watch(&config)
                    }
                    Commands::Init | Commands::Expand { .. } => Ok(()),
                };

                match result {
                    Err(CodegenError::Failed(count)) => {
                        eprintln!(
                            "\n{} {} struct(s) failed to expand",
                            style("✖").red(),
                            count
                        );
                        std::process::exit(1);
                    }
                    other => other.map_err(Into::into),
                }
            }
            Err(CodegenError::ConfigNotFound(_)) => {
                eprintln!(
                    "Error: No {} found in current directory or parent directories",
                    CONFIG_FILE
                );
                eprintln!("Run 'memberwise init' to create a new config file");
                std::process::exit(1);
            }
            Err(e) => Err(e.into()),
        },
    }
}
