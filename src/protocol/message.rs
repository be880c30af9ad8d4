//! Message envelope
//!
//! Every request to and response from the gateway uses the same envelope.
//! Response-only payloads (`data`, `plugindata`, `error`) are never set on
//! outbound envelopes.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::streaming::{MountpointInfo, StreamingRequest};
use crate::error::{Error, Result};

/// `janus` tag of a session create request
pub const CREATE: &str = "create";
/// `janus` tag of an attach request
pub const ATTACH: &str = "attach";
/// `janus` tag of a plugin message
pub const MESSAGE: &str = "message";
/// `janus` tag of a trickle request
pub const TRICKLE: &str = "trickle";

/// Plugin result status sent while the plugin prepares an offer
pub const STATUS_PREPARING: &str = "preparing";

/// The gateway message envelope
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Envelope purpose (`create`, `attach`, `message`, `success`, `event`...)
    #[serde(default)]
    pub janus: String,
    /// Correlation id echoed back by the gateway
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction: Option<String>,
    /// Plugin name, on attach requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugin: Option<String>,
    /// Plugin command payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Body>,
    /// Session description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsep: Option<Jsep>,
    /// ICE candidate, on trickle requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate: Option<Candidate>,
    /// Freshly allocated id, on create/attach responses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Data>,
    /// Plugin payload, on plugin responses and events
    #[serde(default, rename = "plugindata", skip_serializing_if = "Option::is_none")]
    pub plugin_data: Option<PluginData>,
    /// Gateway error
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<GatewayError>,
}

impl Envelope {
    /// Create an envelope with the given `janus` tag and transaction
    pub fn new(janus: impl Into<String>, transaction: impl Into<String>) -> Self {
        Envelope {
            janus: janus.into(),
            transaction: Some(transaction.into()),
            ..Default::default()
        }
    }

    /// Create a session create request
    pub fn create_session() -> Self {
        Self::new(CREATE, "create-session")
    }

    /// Create an attach request for a fully qualified plugin name
    pub fn attach(plugin: impl Into<String>) -> Self {
        Envelope {
            plugin: Some(plugin.into()),
            ..Self::new(ATTACH, "attach-plugin")
        }
    }

    /// Create a plugin message carrying `body`
    pub fn message(transaction: impl Into<String>, body: impl Into<Body>) -> Self {
        Envelope {
            body: Some(body.into()),
            ..Self::new(MESSAGE, transaction)
        }
    }

    /// Create a trickle request for one candidate
    pub fn trickle(candidate: Candidate) -> Self {
        Envelope {
            candidate: Some(candidate),
            ..Self::new(TRICKLE, "trickle")
        }
    }

    /// Attach a session description
    pub fn with_jsep(mut self, jsep: Jsep) -> Self {
        self.jsep = Some(jsep);
        self
    }

    /// Turn an envelope carrying an `error` into an error
    ///
    /// The `error` field wins over every other payload.
    pub fn into_result(self) -> Result<Self> {
        match self.error {
            Some(err) => Err(Error::Protocol {
                code: err.code,
                reason: err.reason,
            }),
            None => Ok(self),
        }
    }

    /// The id allocated by a create/attach request
    pub fn data_id(&self) -> Result<u64> {
        self.data.as_ref().map(|d| d.id).ok_or(Error::MissingData)
    }

    /// The plugin payload, if any
    pub fn plugin_payload(&self) -> Option<&PluginPayload> {
        self.plugin_data.as_ref().and_then(|p| p.data.as_ref())
    }

    /// Return a plugin error when the plugin payload reports one
    pub fn check_plugin_error(&self) -> Result<()> {
        if let Some(plugin_data) = &self.plugin_data {
            if let Some(payload) = &plugin_data.data {
                if let Some(message) = payload.error.as_deref().filter(|e| !e.is_empty()) {
                    return Err(Error::Plugin {
                        plugin: plugin_data.plugin.clone(),
                        code: payload.error_code.unwrap_or_default(),
                        message: message.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Plugin command body
///
/// A body decodes into [`StreamingRequest`] only when that form encodes
/// back to the exact same JSON; any other body is kept as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Body {
    /// Streaming plugin request
    Streaming(StreamingRequest),
    /// Body of another plugin
    Raw(Value),
}

impl<'de> Deserialize<'de> for Body {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;

        let typed = StreamingRequest::deserialize(&value)
            .ok()
            .filter(|request| serde_json::to_value(request).ok().as_ref() == Some(&value));

        Ok(match typed {
            Some(request) => Body::Streaming(request),
            None => Body::Raw(value),
        })
    }
}

impl From<StreamingRequest> for Body {
    fn from(request: StreamingRequest) -> Self {
        Body::Streaming(request)
    }
}

impl From<Value> for Body {
    fn from(value: Value) -> Self {
        Body::Raw(value)
    }
}

/// Session description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Jsep {
    /// SDP text
    pub sdp: String,
    /// `offer` or `answer`
    #[serde(rename = "type")]
    pub jsep_type: String,
}

impl Jsep {
    /// Create an answer
    pub fn answer(sdp: impl Into<String>) -> Self {
        Jsep {
            sdp: sdp.into(),
            jsep_type: "answer".to_string(),
        }
    }
}

/// ICE candidate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Candidate line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate: Option<String>,
    /// Media stream id
    #[serde(default, rename = "sdpMid", skip_serializing_if = "Option::is_none")]
    pub sdp_mid: Option<String>,
    /// Media line index
    #[serde(default, rename = "sdpMLineIndex", skip_serializing_if = "Option::is_none")]
    pub sdp_mline_index: Option<u32>,
    /// End-of-candidates marker
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub completed: bool,
}

impl Candidate {
    /// Create a candidate
    pub fn new(candidate: impl Into<String>, sdp_mid: impl Into<String>, sdp_mline_index: u32) -> Self {
        Candidate {
            candidate: Some(candidate.into()),
            sdp_mid: Some(sdp_mid.into()),
            sdp_mline_index: Some(sdp_mline_index),
            completed: false,
        }
    }

    /// Create the `{"completed": true}` candidate closing a trickle
    pub fn end_of_candidates() -> Self {
        Candidate {
            completed: true,
            ..Default::default()
        }
    }
}

/// Id allocated by the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Data {
    pub id: u64,
}

/// Gateway error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayError {
    pub code: i64,
    #[serde(default)]
    pub reason: String,
}

/// Plugin envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginData {
    /// Plugin name, e.g. `janus.plugin.streaming`
    #[serde(default)]
    pub plugin: String,
    /// Plugin-specific state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<PluginPayload>,
}

/// Plugin-specific state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PluginPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<i64>,
    /// Plugin result; an object with `status` for the streaming plugin,
    /// a plain string for others
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Streaming plugin event name (`event`, `created`, `destroyed`...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub streaming: Option<String>,
    /// Entries returned by a list request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list: Option<Vec<Value>>,
}

impl PluginPayload {
    /// `result.status`, when the result is an object carrying one
    pub fn status(&self) -> Option<&str> {
        self.result
            .as_ref()
            .and_then(|result| result.get("status"))
            .and_then(Value::as_str)
    }

    /// Decode the list entries as streaming mountpoints
    pub fn mountpoints(&self) -> Result<Vec<MountpointInfo>> {
        self.list
            .iter()
            .flatten()
            .map(|entry| MountpointInfo::deserialize(entry).map_err(Error::from))
            .collect()
    }
}
