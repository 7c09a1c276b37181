use crate::config::{DEFAULT_BIND, DEFAULT_TIMEOUT_SECONDS};
use crate::core::ConfigProvider;
use crate::utils::error::{GatewayError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub const LOG_FORMATS: [&str; 2] = ["compact", "json"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default)]
    pub server: ServerConfig,
    pub engine: EngineConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub endpoint: String,
    pub timeout_seconds: Option<u64>,
    pub headers: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// "compact" or "json"
    pub format: Option<String>,
    pub verbose: Option<bool>,
}

impl GatewayConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| GatewayError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| GatewayError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn log_format(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.format.as_deref())
            .unwrap_or("compact")
    }

    pub fn verbose(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.verbose).unwrap_or(false)
    }
}

impl ConfigProvider for GatewayConfig {
    fn bind_address(&self) -> &str {
        &self.server.bind
    }

    fn engine_endpoint(&self) -> &str {
        &self.engine.endpoint
    }

    fn request_timeout_seconds(&self) -> u64 {
        self.engine.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    fn engine_headers(&self) -> Vec<(String, String)> {
        self.engine
            .headers
            .as_ref()
            .map(|h| h.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
            .unwrap_or_default()
    }

    fn json_logs(&self) -> bool {
        self.log_format() == "json"
    }
}

impl Validate for GatewayConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_socket_addr("server.bind", &self.server.bind)?;
        validation::validate_url("engine.endpoint", &self.engine.endpoint)?;
        if let Some(timeout) = self.engine.timeout_seconds {
            validation::validate_positive_number("engine.timeout_seconds", timeout, 1)?;
        }
        if let Some(headers) = &self.engine.headers {
            for name in headers.keys() {
                validation::validate_non_empty_string("engine.headers", name)?;
            }
        }
        validation::validate_one_of("logging.format", self.log_format(), &LOG_FORMATS)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[server]
bind = "127.0.0.1:9000"

[engine]
endpoint = "https://engine.example.com/api"
timeout_seconds = 15

[engine.headers]
X-Project = "forest-watch"

[logging]
format = "json"
"#;

        let config = GatewayConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:9000");
        assert_eq!(config.engine_endpoint(), "https://engine.example.com/api");
        assert_eq!(config.request_timeout_seconds(), 15);
        assert_eq!(
            config.engine_headers(),
            vec![("X-Project".to_string(), "forest-watch".to_string())]
        );
        assert!(config.json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_when_sections_omitted() {
        let config = GatewayConfig::from_toml_str(
            r#"
[engine]
endpoint = "http://localhost:8080"
"#,
        )
        .unwrap();

        assert_eq!(config.bind_address(), DEFAULT_BIND);
        assert_eq!(config.request_timeout_seconds(), DEFAULT_TIMEOUT_SECONDS);
        assert!(config.engine_headers().is_empty());
        assert!(!config.json_logs());
        assert!(!config.verbose());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("GEE_GATEWAY_TEST_ENGINE", "https://engine.internal");

        let config = GatewayConfig::from_toml_str(
            r#"
[engine]
endpoint = "${GEE_GATEWAY_TEST_ENGINE}/v1"
"#,
        )
        .unwrap();
        assert_eq!(config.engine.endpoint, "https://engine.internal/v1");

        std::env::remove_var("GEE_GATEWAY_TEST_ENGINE");
    }

    #[test]
    fn test_config_validation() {
        let bad_endpoint = GatewayConfig::from_toml_str(
            r#"
[engine]
endpoint = "invalid-url"
"#,
        )
        .unwrap();
        assert!(bad_endpoint.validate().is_err());

        let bad_format = GatewayConfig::from_toml_str(
            r#"
[engine]
endpoint = "http://localhost:8080"

[logging]
format = "xml"
"#,
        )
        .unwrap();
        assert!(bad_format.validate().is_err());
    }

    #[test]
    fn test_missing_engine_section_is_a_parse_error() {
        let result = GatewayConfig::from_toml_str("[server]\nbind = \"0.0.0.0:1\"\n");
        assert!(matches!(
            result,
            Err(GatewayError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[engine]\nendpoint = \"http://engine.local\"\n")
            .unwrap();

        let config = GatewayConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.engine_endpoint(), "http://engine.local");
    }
}
