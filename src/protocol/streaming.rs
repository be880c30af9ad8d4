//! Streaming plugin request bodies and mountpoint types

use serde::{Deserialize, Serialize};

/// Mountpoint type
///
/// Checked by the gateway, not by this client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MountpointType {
    /// Live file source
    Live,
    /// On-demand file source
    Ondemand,
    /// RTP source
    Rtp,
    /// RTSP source
    Rstp,
}

impl std::str::FromStr for MountpointType {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "live" => Ok(MountpointType::Live),
            "ondemand" => Ok(MountpointType::Ondemand),
            "rtp" => Ok(MountpointType::Rtp),
            "rstp" | "rtsp" => Ok(MountpointType::Rstp),
            _ => Err(crate::error::Error::Config(format!(
                "Invalid mountpoint type: {}. Valid options: live, ondemand, rtp, rstp",
                s
            ))),
        }
    }
}

impl std::fmt::Display for MountpointType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MountpointType::Live => write!(f, "live"),
            MountpointType::Ondemand => write!(f, "ondemand"),
            MountpointType::Rtp => write!(f, "rtp"),
            MountpointType::Rstp => write!(f, "rstp"),
        }
    }
}

/// Streaming mountpoint definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mountpoint {
    /// Mountpoint id, allocated by the gateway when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub mountpoint_type: Option<MountpointType>,
    /// Persist the mountpoint in the plugin configuration file
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub permanent: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub audio: bool,
    #[serde(default, rename = "audioport", skip_serializing_if = "Option::is_none")]
    pub audio_port: Option<u16>,
    #[serde(default, rename = "audiopt", skip_serializing_if = "Option::is_none")]
    pub audio_payload_type: Option<u8>,
    #[serde(default, rename = "audiortpmap", skip_serializing_if = "Option::is_none")]
    pub audio_rtp_map: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub video: bool,
    #[serde(default, rename = "videoport", skip_serializing_if = "Option::is_none")]
    pub video_port: Option<u16>,
    #[serde(default, rename = "videopt", skip_serializing_if = "Option::is_none")]
    pub video_payload_type: Option<u8>,
    #[serde(default, rename = "videortpmap", skip_serializing_if = "Option::is_none")]
    pub video_rtp_map: Option<String>,
    #[serde(default, rename = "videofmtp", skip_serializing_if = "Option::is_none")]
    pub video_fmtp: Option<String>,
}

/// Entry of a mountpoint list response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MountpointInfo {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub mountpoint_type: Option<String>,
}

/// Streaming plugin request, tagged by its `request` field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "request", rename_all = "lowercase")]
pub enum StreamingRequest {
    /// Create a mountpoint
    Create(Mountpoint),
    /// List mountpoints
    List,
    /// Destroy a mountpoint
    Destroy { id: u64 },
    /// Ask the gateway for an offer for a mountpoint
    Watch {
        id: u64,
        #[serde(default)]
        offer_video: bool,
    },
    /// Start streaming once the answer is ready
    Start,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_bodies() {
        assert_eq!(
            serde_json::to_value(StreamingRequest::List).unwrap(),
            json!({"request": "list"})
        );
        assert_eq!(
            serde_json::to_value(StreamingRequest::Destroy { id: 3 }).unwrap(),
            json!({"request": "destroy", "id": 3})
        );
        assert_eq!(
            serde_json::to_value(StreamingRequest::Watch { id: 42, offer_video: true }).unwrap(),
            json!({"request": "watch", "id": 42, "offer_video": true})
        );
        assert_eq!(
            serde_json::to_value(StreamingRequest::Start).unwrap(),
            json!({"request": "start"})
        );
    }

    #[test]
    fn test_create_body_flattens_mountpoint() {
        let request = StreamingRequest::Create(Mountpoint {
            name: Some("cam".to_string()),
            mountpoint_type: Some(MountpointType::Rtp),
            video: true,
            video_port: Some(5004),
            video_payload_type: Some(96),
            video_rtp_map: Some("VP8/90000".to_string()),
            ..Default::default()
        });

        assert_eq!(
            serde_json::to_value(request).unwrap(),
            json!({
                "request": "create",
                "name": "cam",
                "type": "rtp",
                "video": true,
                "videoport": 5004,
                "videopt": 96,
                "videortpmap": "VP8/90000"
            })
        );
    }

    #[test]
    fn test_mountpoint_type_parsing() {
        assert_eq!("live".parse::<MountpointType>().unwrap(), MountpointType::Live);
        assert_eq!("ONDEMAND".parse::<MountpointType>().unwrap(), MountpointType::Ondemand);
        assert_eq!("rtsp".parse::<MountpointType>().unwrap(), MountpointType::Rstp);
        assert!("webrtc".parse::<MountpointType>().is_err());
        assert_eq!(MountpointType::Rtp.to_string(), "rtp");
    }
}
