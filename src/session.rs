//! Gateway sessions
//!
//! A session is created with [`Client::create_session`] and owns a
//! cancellation token derived from the caller's. Closing the session
//! cancels that token, which stops the session's long poll without
//! touching other sessions sharing the same client.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::sync::atomic::AtomicBool;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::client::Client;
use crate::error::Result;
use crate::protocol::Envelope;

/// Namespace prefix of gateway plugin names
pub const PLUGIN_PREFIX: &str = "janus.plugin.";

/// Gateway-assigned session id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub u64);

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Gateway-assigned plugin handle id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HandleId(pub u64);

impl std::fmt::Display for HandleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Qualify a short plugin name (`streaming`) into the gateway namespace
/// (`janus.plugin.streaming`). Qualified names are kept as they are.
pub fn qualify_plugin_name(plugin: &str) -> String {
    if plugin.starts_with(PLUGIN_PREFIX) {
        plugin.to_string()
    } else {
        format!("{}{}", PLUGIN_PREFIX, plugin)
    }
}

/// A gateway session
#[derive(Debug)]
pub struct Session {
    /// Transport client
    pub(crate) client: Client,
    /// Session id
    id: SessionId,
    /// Token cancelled on close
    pub(crate) cancel: CancellationToken,
    /// Set while a long-poll loop runs
    pub(crate) polling: AtomicBool,
}

impl Client {
    /// Create a new session
    ///
    /// The session's token is a child of `parent`: cancelling `parent`
    /// closes the session too.
    pub async fn create_session(&self, parent: &CancellationToken) -> Result<Session> {
        let response = self
            .send(Method::POST, "", Some(&Envelope::create_session()), parent)
            .await?;
        let id = SessionId(response.data_id()?);

        info!("Created gateway session {}", id);

        Ok(Session {
            client: self.clone(),
            id,
            cancel: parent.child_token(),
            polling: AtomicBool::new(false),
        })
    }
}

impl Session {
    /// Get the session id
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Get the transport client
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Path of this session, relative to the gateway address
    pub(crate) fn path(&self) -> String {
        format!("/{}", self.id)
    }

    /// Attach a plugin and return the new handle id
    ///
    /// `plugin` may be a short name such as `streaming`.
    pub async fn attach_plugin(&self, plugin: &str) -> Result<HandleId> {
        let plugin = qualify_plugin_name(plugin);
        let response = self
            .client
            .send(
                Method::POST,
                &self.path(),
                Some(&Envelope::attach(plugin.as_str())),
                &self.cancel,
            )
            .await?;
        let id = HandleId(response.data_id()?);

        debug!("Attached {} to session {} as handle {}", plugin, self.id, id);
        Ok(id)
    }

    /// Close the session
    ///
    /// Any in-flight or future long poll on this session returns
    /// [`crate::Error::Cancelled`]. Closing twice is a no-op.
    pub fn close(&self) {
        if !self.cancel.is_cancelled() {
            info!("Closing gateway session {}", self.id);
        }
        self.cancel.cancel();
    }

    /// Check whether the session was closed
    pub fn is_closed(&self) -> bool {
        self.cancel.is_cancelled()
    }
}
