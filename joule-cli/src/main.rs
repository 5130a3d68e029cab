mod handlers;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "joule")]
#[command(version)]
#[command(about = "Smart-meter readings and price plan comparison service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the joule HTTP server
    Serve {
        /// Server bind address (overrides the config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides the config file)
        #[arg(long)]
        port: Option<u16>,

        /// Path to the TOML configuration file
        #[arg(long)]
        config: Option<std::path::PathBuf>,

        /// Start with empty stores instead of seeding demo data
        #[arg(long)]
        no_seed: bool,
    },

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Write a default configuration file
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Print the active configuration
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            host,
            port,
            config,
            no_seed,
        } => handlers::handle_serve(host, port, config, no_seed).await,
        Commands::Config { command } => match command {
            ConfigCommands::Init { force } => handlers::handle_config_init(force),
            ConfigCommands::Show => handlers::handle_config_show(),
        },
    }
}
