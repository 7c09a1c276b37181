pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::HttpGeoEngine;
pub use config::toml_config::GatewayConfig;
pub use crate::core::{GeoEngine, Reply, RequestTranslator};
pub use utils::error::{EngineError, GatewayError, Result};
