use anyhow::Context;
use clap::Parser;
use gee_gateway::core::ConfigProvider;
use gee_gateway::utils::{logger, validation::Validate};
use gee_gateway::{app, CliConfig, GatewayConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let file_config = match &cli.config {
        Some(path) => Some(
            GatewayConfig::from_file(path)
                .with_context(|| format!("Failed to load config file '{}'", path))?,
        ),
        None => None,
    };

    let verbose = cli.verbose || file_config.as_ref().is_some_and(|c| c.verbose());
    let config: &dyn ConfigProvider = match &file_config {
        Some(file) => file,
        None => &cli,
    };

    if cli.json_logs || config.json_logs() {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::info!("Starting gee-gateway");
    if verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let validated = match &file_config {
        Some(file) => file.validate(),
        None => cli.validate(),
    };
    if let Err(e) = validated {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    app::run(config).await.context("gee-gateway terminated with an error")?;
    Ok(())
}
