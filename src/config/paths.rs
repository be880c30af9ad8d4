//! Configuration paths

use std::path::PathBuf;

/// Get the configuration directory
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("JANUS_CLIENT_CONFIG_DIR") {
        return PathBuf::from(dir);
    }

    // Use XDG config directory or fallback
    dirs::config_dir()
        .map(|d| d.join("janus-client"))
        .unwrap_or_else(|| {
            dirs::home_dir()
                .map(|h| h.join(".config").join("janus-client"))
                .unwrap_or_else(|| PathBuf::from(".janus-client"))
        })
}

/// Get the main configuration file path
pub fn config_path() -> PathBuf {
    if let Ok(path) = std::env::var("JANUS_CLIENT_CONFIG") {
        return PathBuf::from(path);
    }

    config_dir().join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path_is_toml() {
        if std::env::var("JANUS_CLIENT_CONFIG").is_err() {
            assert!(config_path().ends_with("config.toml"));
        }
    }
}
