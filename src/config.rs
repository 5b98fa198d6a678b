use serde::{Deserialize, Serialize};

/// Host used when client options carry none.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Well-known Redis port, used when client options carry none.
pub const DEFAULT_PORT: u16 = 6379;

/// Connection options a client is constructed with.
///
/// Immutable after construction; the client keeps them only for later
/// inspection. Missing fields fall back to the crate defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientOptions {
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl ClientOptions {
    pub fn new() -> Self {
        ClientOptions::default()
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Resolves `(host, port)` with per-field fallback to the defaults.
    pub fn resolve_host_and_port(&self) -> (String, u16) {
        (
            self.host.clone().unwrap_or_else(|| DEFAULT_HOST.to_string()),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_options_resolve_to_defaults() {
        let (host, port) = ClientOptions::new().resolve_host_and_port();
        assert_eq!(host, DEFAULT_HOST);
        assert_eq!(port, DEFAULT_PORT);
    }

    #[test]
    fn test_partial_options_fall_back_per_field() {
        let opts = ClientOptions::new().with_host("10.0.0.1");
        assert_eq!(opts.resolve_host_and_port(), ("10.0.0.1".to_string(), DEFAULT_PORT));

        let opts = ClientOptions::new().with_port(7000);
        assert_eq!(opts.resolve_host_and_port(), (DEFAULT_HOST.to_string(), 7000));
    }
}
