use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("invalid websocket endpoint {endpoint}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
    #[error("no tokio runtime available to drive the websocket connection")]
    NoRuntime,
    #[error("websocket connection to {endpoint} is closed")]
    Closed { endpoint: String },
    #[error("failed to encode outbound payload: {0}")]
    Encode(#[from] serde_json::Error),
}
