//! MOVED redirect classification and parsing
//!
//! Redis Cluster answers a request for a relocated key with an error of the
//! form `MOVED <slot> <host>:<port>`. This module decides whether a reply
//! error is such a redirect and, if so, extracts the relocation target.

use crate::config::{DEFAULT_HOST, DEFAULT_PORT};
use crate::error::{AdapterError, ReplyError};

/// Machine-readable marker a redirect error carries.
pub const MOVED_CODE: &str = "MOVED";

/// True if the error indicates the key was moved to another node.
///
/// Some transport layers surface the condition as an error code, others only
/// in the message text, so both are checked (code first).
pub fn is_moved_error(error: &ReplyError) -> bool {
    error.code.as_deref() == Some(MOVED_CODE)
        || error.message.starts_with("MOVED ")
}

/// Extracts the relocation target from a MOVED reply error.
///
/// The message follows the fixed wire format `MOVED <slot> <host>:<port>`, so
/// the target is everything after the final space, split on its first colon.
/// The port is returned as a string; callers coerce it. Fails with
/// [`AdapterError::NotMovedError`] when handed anything that does not satisfy
/// [`is_moved_error`].
pub fn resolve_host_and_port_from_moved_error(
    error: &ReplyError,
) -> Result<(String, String), AdapterError> {
    if !is_moved_error(error) {
        return Err(AdapterError::NotMovedError(error.to_string()));
    }
    let target = error.message.rsplit(' ').next().unwrap_or(&error.message);
    match target.split_once(':') {
        Some((host, port)) => Ok((host.to_string(), port.to_string())),
        None => Err(AdapterError::MalformedMovedTarget(error.message.clone())),
    }
}

/// Handle returned by `AdaptedClient::adapter`, so the redirect helpers and
/// defaults are reachable from a client value.
#[derive(Debug, Clone, Copy, Default)]
pub struct Adapter;

impl Adapter {
    pub fn is_moved_error(&self, error: &ReplyError) -> bool {
        is_moved_error(error)
    }

    pub fn resolve_host_and_port_from_moved_error(
        &self,
        error: &ReplyError,
    ) -> Result<(String, String), AdapterError> {
        resolve_host_and_port_from_moved_error(error)
    }

    pub fn default_host(&self) -> &'static str {
        DEFAULT_HOST
    }

    pub fn default_port(&self) -> u16 {
        DEFAULT_PORT
    }
}
