use figment::providers::{Format, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use crate::profile::BackendConfig;

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0: backend detail endpoints, gate tuning, logging.
#[derive(Deserialize, Serialize, Debug, JsonSchema)]
pub struct ConfigV1 {
    pub backend: BackendConfig,
    #[serde(default)]
    pub gate: GateConfig,
    pub logging: LoggingConfig,
}

/// Tunables for the auth gate.
#[derive(Deserialize, Serialize, Debug, JsonSchema, Clone)]
pub struct GateConfig {
    /// Seconds during which a stable registered session is not re-verified
    /// against the backend. A heuristic rate limit, not a correctness
    /// guarantee.
    #[serde(default = "default_cooldown_seconds")]
    pub cooldown_seconds: u64,
    /// Where to send a session whose profile setup is pending.
    #[serde(default = "default_pending_setup_redirect")]
    pub pending_setup_redirect: String,
}

fn default_cooldown_seconds() -> u64 {
    30
}

fn default_pending_setup_redirect() -> String {
    "/signup/details".to_string()
}

impl Default for GateConfig {
    fn default() -> Self {
        GateConfig {
            cooldown_seconds: default_cooldown_seconds(),
            pending_setup_redirect: default_pending_setup_redirect(),
        }
    }
}

/// Load config from a YAML file named "config.yaml" in the current directory.
pub fn load_config() -> ConfigV1 {
    let figment = Figment::new().merge(Yaml::file("./config.yaml"));
    let config = match figment.extract::<Config>() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            std::process::exit(1);
        }
    };
    match config {
        Config::ConfigV1(c) => c,
    }
}

/// Print the JSON schema for the configuration to stdout.
pub fn print_schema() {
    let schema = schema_for!(Config);
    println!("{}", serde_json::to_string_pretty(&schema).unwrap());
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::providers::{Format, Yaml};

    /// Test that a minimal YAML config parses and defaults apply.
    #[test]
    fn test_minimal_config_parses_with_defaults() {
        let yaml = r#"
version: "1.0.0"
backend:
  viewer:
    uri: "https://api.example.com/viewer/detail"
    detail_field: "viewerDetail"
  creator:
    uri: "https://api.example.com/creator/detail"
    detail_field: "creatorDetail"
logging:
  level: "info"
  format: "console"
"#;
        let config: Config = Figment::new()
            .merge(Yaml::string(yaml))
            .extract()
            .expect("config should parse");
        let Config::ConfigV1(config) = config;

        assert_eq!(config.gate.cooldown_seconds, 30);
        assert_eq!(config.gate.pending_setup_redirect, "/signup/details");
        assert_eq!(config.backend.viewer.detail_field, "viewerDetail");
    }
}
