//! Gateway transport client
//!
//! Owns the gateway address and the HTTP sender. Every other component
//! talks to the gateway through [`Client::send`].

use reqwest::Method;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::GatewayConfig;
use crate::error::{Error, Result};
use crate::protocol::Envelope;

/// Gateway transport client
///
/// Cloning is cheap and clones share the underlying connection pool, so one
/// client can serve any number of sessions and handles concurrently.
#[derive(Debug, Clone)]
pub struct Client {
    /// HTTP client
    http: reqwest::Client,
    /// Gateway base address, without trailing slash
    addr: String,
}

impl Client {
    /// Create a new client
    pub fn new(config: GatewayConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = reqwest::Client::builder()
            .user_agent(config.sender.user_agent.as_str())
            .connect_timeout(config.sender.connect_timeout)
            .danger_accept_invalid_certs(config.sender.accept_invalid_certs);
        if let Some(timeout) = config.sender.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Client {
            http: builder.build()?,
            addr: config.addr.trim_end_matches('/').to_string(),
        })
    }

    /// Get the gateway base address
    pub fn addr(&self) -> &str {
        &self.addr
    }

    /// Send an envelope to `path` and decode the response envelope
    ///
    /// Returns [`Error::Cancelled`] as soon as `cancel` fires, even while
    /// waiting on the network. A status outside [200, 400) or an undecodable
    /// body is a transport error; an `error` object in the response is a
    /// [`Error::Protocol`] whatever the status.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Envelope>,
        cancel: &CancellationToken,
    ) -> Result<Envelope> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("{} request to {} cancelled", method, path);
                Err(Error::Cancelled)
            }
            result = self.send_request(&method, path, body) => result,
        }
    }

    async fn send_request(
        &self,
        method: &Method,
        path: &str,
        body: Option<&Envelope>,
    ) -> Result<Envelope> {
        let url = format!("{}{}", self.addr, path);

        let mut request = self.http.request(method.clone(), &url);
        if let Some(body) = body {
            debug!("Sending {} request to {}: janus={}", method, path, body.janus);
            request = request.json(body);
        } else {
            debug!("Sending {} request to {}", method, path);
        }

        let response = request.send().await?;
        let status = response.status();

        if status.as_u16() < 200 || status.as_u16() >= 400 {
            return Err(Error::Status {
                method: method.to_string(),
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        let envelope: Envelope = serde_json::from_slice(&bytes)?;

        debug!(
            "Response from {}: janus={}, transaction={:?}",
            path, envelope.janus, envelope.transaction
        );

        envelope.into_result()
    }
}
