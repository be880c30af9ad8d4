//! # janus-client
//!
//! Client for the HTTP API of the Janus WebRTC gateway.
//!
//! ## Features
//!
//! - **Sessions:** create, attach plugins, close
//! - **Streaming plugin:** create, list and destroy mountpoints; watch, start and trickle
//! - **Long poll:** receive asynchronous gateway events through typed callbacks
//!
//! ## Usage
//!
//! ```rust,no_run
//! use janus_client::{Client, GatewayConfig, Jsep, LongPollHandler};
//! use tokio_util::sync::CancellationToken;
//!
//! struct Viewer;
//!
//! #[async_trait::async_trait]
//! impl LongPollHandler for Viewer {
//!     async fn streaming_preparing(&mut self, transaction: Option<String>, jsep: Jsep) -> anyhow::Result<()> {
//!         println!("offer for mountpoint {:?}: {}", transaction, jsep.sdp);
//!         Ok(())
//!     }
//! }
//!
//! # async fn example() -> janus_client::Result<()> {
//! let client = Client::new(GatewayConfig::new("http://127.0.0.1:8088/janus"))?;
//! let session = client.create_session(&CancellationToken::new()).await?;
//! let streaming = session.streaming_handle().await?;
//!
//! for id in streaming.list_mountpoints().await? {
//!     println!("mountpoint {}", id);
//! }
//! streaming.watch(1).await?;
//!
//! // Runs until the session is closed or an error occurs
//! let _ = session.long_poll(&mut Viewer).await;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod plugin;
pub mod poll;
pub mod protocol;
pub mod session;
pub mod streaming;

#[cfg(test)]
mod test_support;

pub use client::Client;
pub use config::{GatewayConfig, SenderOptions};
pub use error::{Error, Result};
pub use plugin::PluginHandle;
pub use poll::{Event, LongPollHandler, PollState};
pub use protocol::{Candidate, Envelope, Jsep, Mountpoint, MountpointType};
pub use session::{HandleId, Session, SessionId};
pub use streaming::StreamingHandle;

/// Library version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
