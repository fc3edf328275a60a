//! Client-side state for the timetable app: observable stores for the edit
//! tables and the computed timetable, plus the server websocket.

pub mod connection;
pub mod error;
pub mod observable;
pub mod registry;

pub use connection::{
    ConnectionEvent, ConnectionHandle, ConnectionState, DEFAULT_ENDPOINT, DEFAULT_EVENT_CAPACITY,
};
pub use error::ConnectionError;
pub use observable::{Observable, SubscriptionId};
pub use registry::{RegistrySubscriptions, StateRegistry, StoreName};
