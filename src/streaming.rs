//! Streaming plugin handle
//!
//! Wraps a [`PluginHandle`] attached to `janus.plugin.streaming` and adds
//! mountpoint management and viewing requests. Mountpoints are never
//! cached: every call is a round trip to the gateway.

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::plugin::PluginHandle;
use crate::protocol::{Candidate, Envelope, Jsep, Mountpoint, StreamingRequest};
use crate::session::{HandleId, Session};

/// Short name of the streaming plugin
pub const STREAMING_PLUGIN: &str = "streaming";

/// Handle on the streaming plugin
#[derive(Debug, Clone)]
pub struct StreamingHandle {
    handle: PluginHandle,
}

impl Session {
    /// Attach the streaming plugin
    pub async fn streaming_handle(&self) -> Result<StreamingHandle> {
        let handle = self.plugin_handle(STREAMING_PLUGIN).await?;
        Ok(StreamingHandle::new(handle))
    }
}

impl StreamingHandle {
    /// Wrap a handle attached to the streaming plugin
    pub fn new(handle: PluginHandle) -> Self {
        StreamingHandle { handle }
    }

    /// Get the handle id
    pub fn id(&self) -> HandleId {
        self.handle.id()
    }

    /// Get the underlying plugin handle
    pub fn handle(&self) -> &PluginHandle {
        &self.handle
    }

    /// Send a request and surface plugin errors from the response
    async fn request(&self, transaction: impl Into<String>, request: StreamingRequest) -> Result<Envelope> {
        let response = self
            .handle
            .send(&Envelope::message(transaction, request))
            .await?;
        response.check_plugin_error()?;
        Ok(response)
    }

    /// Create a mountpoint
    pub async fn create_mountpoint(&self, mountpoint: Mountpoint) -> Result<()> {
        let name = mountpoint.name.clone().unwrap_or_default();
        self.request("create", StreamingRequest::Create(mountpoint)).await?;

        info!("Created mountpoint {:?}", name);
        Ok(())
    }

    /// List mountpoint ids, in gateway order
    pub async fn list_mountpoints(&self) -> Result<Vec<u64>> {
        let response = self
            .handle
            .send(&Envelope::message("list", StreamingRequest::List))
            .await?;
        let payload = response.plugin_payload().ok_or(Error::MissingPluginData)?;
        response.check_plugin_error()?;

        let ids: Vec<u64> = payload
            .mountpoints()?
            .iter()
            .map(|mountpoint| mountpoint.id)
            .collect();

        debug!("Streaming handle {} lists {} mountpoints", self.id(), ids.len());
        Ok(ids)
    }

    /// Destroy a mountpoint
    pub async fn destroy_mountpoint(&self, id: u64) -> Result<()> {
        self.request("destroy", StreamingRequest::Destroy { id }).await?;

        info!("Destroyed mountpoint {}", id);
        Ok(())
    }

    /// Ask to watch a mountpoint
    ///
    /// The transaction is the mountpoint id, so the offer arriving on the
    /// long poll can be matched to the mountpoint.
    pub async fn watch(&self, id: u64) -> Result<()> {
        self.request(
            id.to_string(),
            StreamingRequest::Watch {
                id,
                offer_video: true,
            },
        )
        .await?;
        Ok(())
    }

    /// Start streaming with the answer to the gateway's offer
    pub async fn start(&self, jsep: Jsep) -> Result<()> {
        let envelope = Envelope::message("start", StreamingRequest::Start).with_jsep(jsep);
        let response = self.handle.send(&envelope).await?;
        response.check_plugin_error()
    }

    /// Send one ICE candidate
    pub async fn trickle(&self, candidate: Candidate) -> Result<()> {
        self.handle.send(&Envelope::trickle(candidate)).await?;
        Ok(())
    }
}
