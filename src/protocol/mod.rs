//! Gateway wire protocol
//!
//! - **message**: the envelope shared by every request and response
//! - **streaming**: streaming plugin request bodies and mountpoints

mod message;
mod streaming;

pub use message::{
    Body, Candidate, Data, Envelope, GatewayError, Jsep, PluginData, PluginPayload,
    ATTACH, CREATE, MESSAGE, STATUS_PREPARING, TRICKLE,
};
pub use streaming::{Mountpoint, MountpointInfo, MountpointType, StreamingRequest};
