//! Error types for janus-client

use thiserror::Error;

/// Result type alias using janus-client's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for janus-client
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP request error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The gateway answered with a status outside [200, 400)
    #[error("Invalid status code {status} for {method} request to {path}")]
    Status {
        /// Request method
        method: String,
        /// Request path, relative to the gateway address
        path: String,
        /// HTTP status code
        status: u16,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The envelope carried an `error` object
    #[error("Gateway error {code}: {reason}")]
    Protocol {
        /// Gateway error code
        code: i64,
        /// Gateway error reason
        reason: String,
    },

    /// A create/attach response without `data`
    #[error("No data in message")]
    MissingData,

    /// A response without `plugindata.data`
    #[error("No plugin data in message")]
    MissingPluginData,

    /// A `preparing` event without `jsep`
    #[error("No jsep in preparing event")]
    MissingJsep,

    /// The plugin reported an error in its payload
    #[error("Plugin {plugin} error {code}: {message}")]
    Plugin {
        /// Plugin name as reported by the gateway
        plugin: String,
        /// Plugin error code
        code: i64,
        /// Plugin error message
        message: String,
    },

    /// A long-poll handler returned an error
    #[error("Long poll callback failed: {0}")]
    Callback(#[source] anyhow::Error),

    /// The session was closed
    #[error("Session cancelled")]
    Cancelled,

    /// A long-poll loop is already running on this session
    #[error("Session {0} is already long polling")]
    AlreadyPolling(u64),
}

impl Error {
    /// Check if error happened at the transport level
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Http(_) | Error::Status { .. } | Error::Json(_)
        )
    }

    /// Check if error was reported by the gateway itself
    pub fn is_gateway_error(&self) -> bool {
        matches!(self, Error::Protocol { .. } | Error::Plugin { .. })
    }

    /// Check if error is the result of closing the session
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::Config(err.to_string())
    }
}
