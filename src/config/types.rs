//! Configuration types

use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::error::{Error, Result};

/// Gateway connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Base address of the gateway HTTP API (e.g. `http://127.0.0.1:8088/janus`)
    #[serde(default = "default_addr")]
    pub addr: String,
    /// HTTP sender options
    #[serde(default)]
    pub sender: SenderOptions,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        GatewayConfig {
            addr: default_addr(),
            sender: SenderOptions::default(),
        }
    }
}

impl GatewayConfig {
    /// Create a configuration for the given address with default sender options
    pub fn new(addr: impl Into<String>) -> Self {
        GatewayConfig {
            addr: addr.into(),
            sender: SenderOptions::default(),
        }
    }

    /// Check that the address is an absolute http(s) URL
    pub fn validate(&self) -> Result<()> {
        if self.addr.is_empty() {
            return Err(Error::Config("gateway addr is required".to_string()));
        }

        let url = Url::parse(&self.addr)?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(Error::Config(format!(
                "Invalid gateway addr scheme: {}. Valid options: http, https",
                scheme
            ))),
        }
    }
}

fn default_addr() -> String {
    "http://127.0.0.1:8088/janus".to_string()
}

/// Options used to build the HTTP sender
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SenderOptions {
    /// Total request timeout. Long polls are held open by the gateway, so
    /// this must exceed the gateway's long-poll hold time when set.
    #[serde(default, with = "humantime_serde")]
    pub timeout: Option<Duration>,
    /// Connection timeout
    #[serde(default = "default_connect_timeout", with = "humantime_serde")]
    pub connect_timeout: Duration,
    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Accept self-signed gateway certificates
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

impl Default for SenderOptions {
    fn default() -> Self {
        SenderOptions {
            timeout: None,
            connect_timeout: default_connect_timeout(),
            user_agent: default_user_agent(),
            accept_invalid_certs: false,
        }
    }
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_user_agent() -> String {
    format!("{}/{}", crate::NAME, crate::VERSION)
}
