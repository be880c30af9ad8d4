//! Plugin handles

use reqwest::Method;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::client::Client;
use crate::error::Result;
use crate::protocol::Envelope;
use crate::session::{qualify_plugin_name, HandleId, Session, SessionId};

/// A handle on a plugin attached to a session
///
/// The handle keeps the transport client, the owning session id and a
/// child of the session's token, so closing the session aborts commands in
/// flight on its handles.
#[derive(Debug, Clone)]
pub struct PluginHandle {
    client: Client,
    session_id: SessionId,
    id: HandleId,
    plugin: String,
    cancel: CancellationToken,
}

impl Session {
    /// Attach a plugin and return a handle on it
    pub async fn plugin_handle(&self, plugin: &str) -> Result<PluginHandle> {
        let id = self.attach_plugin(plugin).await?;

        Ok(PluginHandle {
            client: self.client.clone(),
            session_id: self.id(),
            id,
            plugin: qualify_plugin_name(plugin),
            cancel: self.cancel.child_token(),
        })
    }
}

impl PluginHandle {
    /// Get the handle id
    pub fn id(&self) -> HandleId {
        self.id
    }

    /// Get the owning session id
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Get the qualified plugin name
    pub fn plugin(&self) -> &str {
        &self.plugin
    }

    /// Send an envelope to this handle
    pub async fn send(&self, envelope: &Envelope) -> Result<Envelope> {
        let path = format!("/{}/{}", self.session_id, self.id);
        debug!("Sending {} to {} handle {}", envelope.janus, self.plugin, self.id);

        self.client
            .send(Method::POST, &path, Some(envelope), &self.cancel)
            .await
    }
}
