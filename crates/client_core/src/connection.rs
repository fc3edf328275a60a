//! Client side of the timetable server's websocket.
//!
//! [`ConnectionHandle::open`] returns immediately. The handshake and all
//! frame I/O run on a background task, which reports progress as
//! [`ConnectionEvent`]s. A failed or dropped connection is reported, never
//! retried.

use std::{fmt, sync::Arc};

use futures::{SinkExt, StreamExt};
use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::{broadcast, mpsc, watch};
use tokio_stream::{wrappers::BroadcastStream, Stream};
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::ConnectionError;

/// Address of the local timetable server.
pub const DEFAULT_ENDPOINT: &str = "ws://127.0.0.1:3012";

pub const DEFAULT_EVENT_CAPACITY: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionEvent {
    Open,
    Text(String),
    Binary(Vec<u8>),
    Error(String),
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Open,
    Closed,
}

enum Outbound {
    Frame(Message),
    Close,
}

struct Shared {
    endpoint: Url,
    outbound: mpsc::UnboundedSender<Outbound>,
    events: broadcast::Sender<ConnectionEvent>,
    // Receiver created with the channel; it has seen every event since open.
    first_events: Mutex<Option<broadcast::Receiver<ConnectionEvent>>>,
    state: watch::Receiver<ConnectionState>,
}

/// Cloneable handle to one websocket connection.
///
/// Clones share the same connection. The connection is closed once the last
/// handle is dropped.
#[derive(Clone)]
pub struct ConnectionHandle {
    shared: Arc<Shared>,
}

impl fmt::Debug for ConnectionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionHandle")
            .field("endpoint", &self.shared.endpoint.as_str())
            .field("state", &self.state())
            .finish()
    }
}

impl ConnectionHandle {
    /// Starts connecting to `endpoint` on the current tokio runtime.
    pub fn open(endpoint: &str) -> Result<Self, ConnectionError> {
        Self::open_with_capacity(endpoint, DEFAULT_EVENT_CAPACITY)
    }

    pub fn open_with_capacity(endpoint: &str, capacity: usize) -> Result<Self, ConnectionError> {
        let url = parse_endpoint(endpoint)?;
        let runtime =
            tokio::runtime::Handle::try_current().map_err(|_| ConnectionError::NoRuntime)?;

        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let (events_tx, first_events) = broadcast::channel(capacity.max(1));
        let (state_tx, state_rx) = watch::channel(ConnectionState::Connecting);

        debug!(endpoint = %url, "opening websocket connection");
        runtime.spawn(run_connection(
            url.clone(),
            outbound_rx,
            events_tx.clone(),
            state_tx,
        ));

        Ok(Self {
            shared: Arc::new(Shared {
                endpoint: url,
                outbound: outbound_tx,
                events: events_tx,
                first_events: Mutex::new(Some(first_events)),
                state: state_rx,
            }),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.shared.endpoint
    }

    pub fn state(&self) -> ConnectionState {
        *self.shared.state.borrow()
    }

    /// Waits until the handshake has either succeeded or failed. Returns
    /// `true` if the connection is open.
    pub async fn wait_until_settled(&self) -> bool {
        let mut state = self.shared.state.clone();
        let open = state
            .wait_for(|s| *s != ConnectionState::Connecting)
            .await
            .map(|settled| *settled == ConnectionState::Open)
            .unwrap_or(false);
        open
    }

    /// Subscribes to connection events.
    ///
    /// The first subscriber receives every event since the connection was
    /// opened, so an `Open` or `Error` raised before anyone listened is not
    /// lost. Later subscribers receive events emitted after they subscribe.
    pub fn subscribe_events(&self) -> broadcast::Receiver<ConnectionEvent> {
        match self.shared.first_events.lock().take() {
            Some(receiver) => receiver,
            None => self.shared.events.subscribe(),
        }
    }

    /// Same as [`subscribe_events`](Self::subscribe_events), as a stream.
    /// Events missed by a lagging consumer are skipped.
    pub fn event_stream(&self) -> impl Stream<Item = ConnectionEvent> + Send + 'static {
        let endpoint = self.shared.endpoint.to_string();
        tokio_stream::StreamExt::filter_map(
            BroadcastStream::new(self.subscribe_events()),
            move |item| match item {
                Ok(event) => Some(event),
                Err(err) => {
                    warn!(%endpoint, %err, "connection event stream lagged");
                    None
                }
            },
        )
    }

    /// Queues a text frame. Frames sent while the handshake is in flight are
    /// delivered once the connection opens.
    pub fn send_text(&self, text: impl Into<String>) -> Result<(), ConnectionError> {
        self.send_frame(Message::Text(text.into()))
    }

    pub fn send_binary(&self, bytes: impl Into<Vec<u8>>) -> Result<(), ConnectionError> {
        self.send_frame(Message::Binary(bytes.into()))
    }

    /// Serialises `payload` as JSON and queues it as a text frame.
    pub fn send_json<T>(&self, payload: &T) -> Result<(), ConnectionError>
    where
        T: Serialize + ?Sized,
    {
        let text = serde_json::to_string(payload)?;
        self.send_text(text)
    }

    /// Requests an orderly close.
    pub fn close(&self) {
        let _ = self.shared.outbound.send(Outbound::Close);
    }

    fn send_frame(&self, frame: Message) -> Result<(), ConnectionError> {
        if self.state() == ConnectionState::Closed {
            return Err(self.closed_error());
        }
        self.shared
            .outbound
            .send(Outbound::Frame(frame))
            .map_err(|_| self.closed_error())
    }

    fn closed_error(&self) -> ConnectionError {
        ConnectionError::Closed {
            endpoint: self.shared.endpoint.to_string(),
        }
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Url, ConnectionError> {
    let url = Url::parse(endpoint).map_err(|err| ConnectionError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason: err.to_string(),
    })?;
    match url.scheme() {
        "ws" | "wss" => Ok(url),
        other => Err(ConnectionError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: format!("unsupported scheme {other}, expected ws or wss"),
        }),
    }
}

async fn run_connection(
    endpoint: Url,
    mut outbound: mpsc::UnboundedReceiver<Outbound>,
    events: broadcast::Sender<ConnectionEvent>,
    state: watch::Sender<ConnectionState>,
) {
    let ws_stream = match connect_async(endpoint.as_str()).await {
        Ok((ws_stream, _)) => ws_stream,
        Err(err) => {
            warn!(%endpoint, %err, "failed to connect websocket");
            let _ = events.send(ConnectionEvent::Error(format!(
                "failed to connect websocket: {err}"
            )));
            state.send_replace(ConnectionState::Closed);
            let _ = events.send(ConnectionEvent::Closed);
            return;
        }
    };

    info!(%endpoint, "websocket connected");
    state.send_replace(ConnectionState::Open);
    let _ = events.send(ConnectionEvent::Open);

    let (mut ws_writer, mut ws_reader) = ws_stream.split();
    loop {
        tokio::select! {
            incoming = ws_reader.next() => match incoming {
                Some(Ok(Message::Text(text))) => {
                    let _ = events.send(ConnectionEvent::Text(text));
                }
                Some(Ok(Message::Binary(bytes))) => {
                    let _ = events.send(ConnectionEvent::Binary(bytes));
                }
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(err)) => {
                    warn!(%endpoint, %err, "websocket receive failed");
                    let _ = events.send(ConnectionEvent::Error(format!(
                        "websocket receive failed: {err}"
                    )));
                    break;
                }
            },
            command = outbound.recv() => match command {
                Some(Outbound::Frame(frame)) => {
                    if let Err(err) = ws_writer.send(frame).await {
                        warn!(%endpoint, %err, "websocket send failed");
                        let _ = events.send(ConnectionEvent::Error(format!(
                            "websocket send failed: {err}"
                        )));
                        break;
                    }
                }
                Some(Outbound::Close) | None => {
                    debug!(%endpoint, "closing websocket");
                    let _ = ws_writer.send(Message::Close(None)).await;
                    let _ = ws_writer.close().await;
                    break;
                }
            },
        }
    }

    info!(%endpoint, "websocket closed");
    state.send_replace(ConnectionState::Closed);
    let _ = events.send(ConnectionEvent::Closed);
}

#[cfg(test)]
#[path = "tests/connection_tests.rs"]
mod tests;
