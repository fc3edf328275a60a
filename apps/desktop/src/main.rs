use anyhow::{Context, Result};
use clap::Parser;
use client_core::{ConnectionEvent, ConnectionHandle, StateRegistry, DEFAULT_ENDPOINT};
use futures::StreamExt;
use tracing::{info, warn};

mod config;

use config::load_settings;

/// Opens the timetable client state and logs store and connection activity.
#[derive(Parser, Debug)]
struct Args {
    /// tracing filter, overrides desktop.toml and APP__LOG_FILTER
    #[arg(long)]
    log_filter: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = load_settings()?;
    if let Some(filter) = args.log_filter {
        settings.log_filter = filter;
    }
    tracing_subscriber::fmt()
        .with_env_filter(settings.log_filter.as_str())
        .init();

    let socket = ConnectionHandle::open_with_capacity(DEFAULT_ENDPOINT, settings.event_capacity)
        .context("failed to open timetable server connection")?;
    let registry = StateRegistry::with_connection(socket);
    info!(endpoint = %registry.socket.endpoint(), "state registry ready");

    // The stores are filled by the UI code that consumes the socket; this
    // binary only observes them, so nothing here fires until that code runs.
    let subscriptions = registry.watch_lengths(|store, len| {
        info!(%store, len, "store replaced");
    });

    let events = registry.socket.event_stream();
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(events, shutdown);

    loop {
        tokio::select! {
            event = events.next() => match event {
                Some(ConnectionEvent::Open) => info!("connected"),
                Some(ConnectionEvent::Text(text)) => info!(bytes = text.len(), "text frame"),
                Some(ConnectionEvent::Binary(bytes)) => info!(bytes = bytes.len(), "binary frame"),
                Some(ConnectionEvent::Error(message)) => warn!(%message, "connection error"),
                Some(ConnectionEvent::Closed) | None => {
                    info!("connection closed");
                    break;
                }
            },
            signal = &mut shutdown => {
                signal.context("failed to listen for ctrl-c")?;
                info!("shutting down");
                registry.socket.close();
                break;
            }
        }
    }

    registry.unwatch(subscriptions);
    Ok(())
}
