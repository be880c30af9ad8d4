//! Configuration I/O - Loading configuration
//!
//! Handles reading configuration from files and environment variables.

use std::path::Path;

use super::types::GatewayConfig;
use crate::error::{Error, Result};

/// Load configuration with layered precedence:
/// 1. Config file if it exists, otherwise defaults
/// 2. Environment variable overrides
pub fn load_config() -> Result<GatewayConfig> {
    let config_path = super::paths::config_path();

    let mut config = if config_path.exists() {
        load_config_from_path(&config_path)?
    } else {
        GatewayConfig::default()
    };

    apply_env_overrides(&mut config);
    config.validate()?;

    Ok(config)
}

/// Load configuration from a specific path
pub fn load_config_from_path(path: &Path) -> Result<GatewayConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
    })?;

    // Detect format by extension
    let config: GatewayConfig = if path.extension().map_or(false, |ext| ext == "json") {
        serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("Invalid JSON config: {}", e)))?
    } else if path.extension().map_or(false, |ext| ext == "toml") {
        toml::from_str(&content).map_err(|e| Error::Config(format!("Invalid TOML config: {}", e)))?
    } else {
        // Try TOML first, then JSON
        toml::from_str(&content)
            .or_else(|_| serde_json::from_str(&content).map_err(|e| Error::Config(e.to_string())))
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?
    };

    Ok(config)
}

/// Apply environment variable overrides to an existing config.
///
/// Env vars have the highest precedence: defaults < file < env.
pub fn apply_env_overrides(config: &mut GatewayConfig) {
    if let Ok(addr) = std::env::var("JANUS_ADDR") {
        if !addr.is_empty() {
            config.addr = addr;
        }
    }
    if let Ok(timeout) = std::env::var("JANUS_TIMEOUT") {
        match humantime_serde::re::humantime::parse_duration(&timeout) {
            Ok(v) => config.sender.timeout = Some(v),
            Err(e) => tracing::warn!("Ignoring invalid JANUS_TIMEOUT {:?}: {}", timeout, e),
        }
    }
    if let Ok(v) = std::env::var("JANUS_ACCEPT_INVALID_CERTS") {
        config.sender.accept_invalid_certs = v == "true" || v == "1";
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;

    #[test]
    fn test_load_toml_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("janus.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "addr = \"https://gateway.example.com/janus\"").unwrap();
        writeln!(file, "[sender]").unwrap();
        writeln!(file, "timeout = \"45s\"").unwrap();

        let config = load_config_from_path(&path).unwrap();
        assert_eq!(config.addr, "https://gateway.example.com/janus");
        assert_eq!(config.sender.timeout, Some(Duration::from_secs(45)));
    }

    #[test]
    fn test_load_json_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("janus.json");
        std::fs::write(
            &path,
            r#"{"addr": "http://10.0.0.2:8088/janus", "sender": {"accept_invalid_certs": true}}"#,
        )
        .unwrap();

        let config = load_config_from_path(&path).unwrap();
        assert_eq!(config.addr, "http://10.0.0.2:8088/janus");
        assert!(config.sender.accept_invalid_certs);
        assert_eq!(config.sender.connect_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_load_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("janus.toml");
        std::fs::write(&path, "addr = [").unwrap();

        let err = load_config_from_path(&path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_missing_config_file() {
        let err = load_config_from_path(Path::new("/nonexistent/janus.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
