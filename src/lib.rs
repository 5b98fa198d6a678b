//! Adapter that gives an in-memory mock Redis client the capability surface
//! of the production client: normalized `ping`/`end`, dummy `info`/`exec`,
//! host/port resolution, event-listener registration, a closing latch, and
//! MOVED-redirect classification.

pub mod adapter;
pub mod config;
pub mod error;
pub mod events;
pub mod mock;
pub mod redirect;

pub use adapter::{
    AdaptedClient, BaseClient, Capability, CommandArg, CommandOutcome, ReplyCallback, Value,
};
pub use config::{ClientOptions, DEFAULT_HOST, DEFAULT_PORT};
pub use error::{AdapterError, ReplyError};
pub use events::{ClientEvent, EventListener};
pub use mock::MockClient;
pub use redirect::{is_moved_error, resolve_host_and_port_from_moved_error, Adapter, MOVED_CODE};

/// Creates a mock client and normalizes it to the production capability
/// surface.
pub fn create_client(options: Option<ClientOptions>) -> AdaptedClient<MockClient> {
    tracing::debug!("creating adapted mock client");
    AdaptedClient::new(MockClient::new(), options)
}
