//! Mock gateway helpers shared by the unit tests

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::{Client, GatewayConfig};

/// Path of the gateway API on the mock server
pub const GATEWAY_PATH: &str = "/janus";

/// Start a mock gateway and a client pointing at it
pub async fn gateway() -> (MockServer, Client) {
    let server = MockServer::start().await;
    let config = GatewayConfig::new(format!("{}{}", server.uri(), GATEWAY_PATH));
    let client = Client::new(config).unwrap();
    (server, client)
}

/// Answer session create requests with `id`
pub async fn mount_session(server: &MockServer, id: u64) {
    Mock::given(method("POST"))
        .and(path(GATEWAY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "janus": "success",
            "transaction": "create-session",
            "data": {"id": id}
        })))
        .mount(server)
        .await;
}

/// Answer attach requests on session `session_id` with `handle_id`
pub async fn mount_attach(server: &MockServer, session_id: u64, handle_id: u64) {
    Mock::given(method("POST"))
        .and(path(format!("{}/{}", GATEWAY_PATH, session_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "janus": "success",
            "session_id": session_id,
            "transaction": "attach-plugin",
            "data": {"id": handle_id}
        })))
        .mount(server)
        .await;
}
