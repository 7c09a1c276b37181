pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::{GatewayError, Result};
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

pub const DEFAULT_BIND: &str = "0.0.0.0:8888";
pub const DEFAULT_ENGINE_ENDPOINT: &str = "http://127.0.0.1:8080/";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 60;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "gee-gateway")]
#[command(about = "HTTP gateway translating JSON requests into geospatial engine calls")]
pub struct CliConfig {
    /// Path to a TOML configuration file; replaces the server and engine flags
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, default_value = DEFAULT_BIND)]
    pub bind: String,

    #[arg(long, default_value = DEFAULT_ENGINE_ENDPOINT)]
    pub engine_endpoint: String,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECONDS)]
    pub timeout_seconds: u64,

    /// Extra header sent with every engine request, as "Name: value"
    #[arg(long = "engine-header")]
    pub engine_headers: Vec<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    fn parsed_headers(&self) -> Result<Vec<(String, String)>> {
        self.engine_headers.iter().map(|raw| parse_header(raw)).collect()
    }
}

#[cfg(feature = "cli")]
fn parse_header(raw: &str) -> Result<(String, String)> {
    raw.split_once(':')
        .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
        .ok_or_else(|| GatewayError::InvalidConfigValueError {
            field: "engine-header".to_string(),
            value: raw.to_string(),
            reason: "Expected \"Name: value\"".to_string(),
        })
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn bind_address(&self) -> &str {
        &self.bind
    }

    fn engine_endpoint(&self) -> &str {
        &self.engine_endpoint
    }

    fn request_timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn engine_headers(&self) -> Vec<(String, String)> {
        self.engine_headers
            .iter()
            .filter_map(|raw| match parse_header(raw) {
                Ok(pair) => Some(pair),
                Err(e) => {
                    tracing::warn!("Ignoring engine header: {}", e);
                    None
                }
            })
            .collect()
    }

    fn json_logs(&self) -> bool {
        self.json_logs
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_socket_addr("bind", &self.bind)?;
        validation::validate_url("engine-endpoint", &self.engine_endpoint)?;
        validation::validate_positive_number("timeout-seconds", self.timeout_seconds, 1)?;
        for (name, _) in self.parsed_headers()? {
            validation::validate_non_empty_string("engine-header", &name)?;
        }
        Ok(())
    }
}
