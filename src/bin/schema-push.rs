//! Schema push CLI
//!
//! Command-line interface for publishing self-describing JSON Schemas
//! to a schema registry.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use uuid::Uuid;

use schema_push::{run, PushConfig, Visibility};

#[derive(Parser)]
#[command(name = "schema-push")]
#[command(about = "Publish self-describing JSON Schemas to a schema registry")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload every schema under a directory to the registry
    Push {
        /// Directory (or single file) containing schema files
        input: PathBuf,

        /// Registry root URL (e.g. https://registry.example.com)
        #[arg(long)]
        registry: String,

        /// Master API key
        #[arg(long)]
        apikey: Uuid,

        /// Publish schemas as publicly readable
        #[arg(long)]
        public: bool,

        /// Mint a temporary write key before uploading (older registries)
        #[arg(long)]
        legacy: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let code = match cli.command {
        Commands::Push {
            input,
            registry,
            apikey,
            public,
            legacy,
        } => run_push(PushConfig {
            input,
            registry,
            apikey: apikey.to_string(),
            visibility: Visibility::from_public_flag(public),
            legacy,
        }),
    };

    ExitCode::from(code)
}

fn run_push(config: PushConfig) -> u8 {
    let stdout = std::io::stdout();
    match run(&config, &mut stdout.lock()) {
        Ok(total) => total.exit_code(),
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}
