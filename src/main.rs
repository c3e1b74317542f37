use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use unitgen::cli;

#[derive(Parser)]
#[command(name = "unitgen", version)]
#[command(about = "Generate PHPUnit test skeletons from class descriptions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the test class of one source class
    Generate {
        /// JSON description of the source class
        class: String,

        /// Path to config file (defaults to ./unitgen.toml when present)
        #[arg(long)]
        config: Option<String>,

        /// Output file path (defaults to stdout)
        #[arg(short = 'o', long)]
        output: Option<String>,

        /// Print a structural outline instead of PHP source
        #[arg(long)]
        outline: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            class,
            config,
            output,
            outline,
        } => {
            cli::generate::run(class, config, output, outline)?;
        }
    }

    Ok(())
}
