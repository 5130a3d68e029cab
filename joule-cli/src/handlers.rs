//! CLI command handlers

use anyhow::{anyhow, Context, Result};
use joule_core::models::Configuration;
use joule_core::seed;
use joule_core::server::JouleServer;
use joule_core::store::{AccountStore, PlanStore, ReadingStore, TariffStore};
use std::path::PathBuf;

fn config_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path),
        None => Configuration::default_config_path()
            .map_err(|e| anyhow!("Could not determine config path: {}", e)),
    }
}

fn load_config(path: &PathBuf) -> Result<Configuration> {
    let config = Configuration::load_from_file(path)
        .map_err(|e| anyhow!("Failed to load configuration from {}: {}", path.display(), e))?;
    config
        .validate()
        .map_err(|errors| anyhow!("Invalid configuration: {}", errors.join("; ")))?;
    Ok(config)
}

/// Handle the 'serve' command
pub async fn handle_serve(
    host: Option<String>,
    port: Option<u16>,
    config: Option<PathBuf>,
    no_seed: bool,
) -> Result<()> {
    let path = config_path(config)?;
    let mut config = load_config(&path)?;
    if let Some(host) = host {
        config.server_host = host;
    }
    if let Some(port) = port {
        config.server_port = port;
    }
    if no_seed {
        config.seed = false;
    }
    config
        .validate()
        .map_err(|errors| anyhow!("Invalid configuration: {}", errors.join("; ")))?;

    joule_core::logging::init_logging(config.log_level.clone())
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    let readings = ReadingStore::new();
    let accounts = AccountStore::new();
    let (plans, tariffs) = if config.seed {
        seed::seed_demo_data(&readings, &accounts, config.readings_per_meter).await;
        (
            PlanStore::new(seed::demo_plans()),
            TariffStore::new(seed::demo_tariffs()),
        )
    } else {
        (PlanStore::default(), TariffStore::default())
    };

    let server = JouleServer::new(
        config.server_host,
        config.server_port,
        readings,
        accounts,
        plans,
        tariffs,
    );
    server.start().await.context("Server failed")
}

/// Handle 'config init'
pub fn handle_config_init(force: bool) -> Result<()> {
    let path = config_path(None)?;
    if path.exists() && !force {
        return Err(anyhow!(
            "Configuration file already exists at {} (use --force to overwrite)",
            path.display()
        ));
    }

    let config = Configuration::default();
    config
        .save_to_file(&path)
        .map_err(|e| anyhow!("Failed to write configuration: {}", e))?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}

/// Handle 'config show'
pub fn handle_config_show() -> Result<()> {
    let path = config_path(None)?;
    let config = load_config(&path)?;
    let rendered = toml::to_string_pretty(&config).context("Failed to render configuration")?;
    println!("# {}", path.display());
    print!("{}", rendered);
    Ok(())
}
