use crate::adapter::registry::{Capability, CapabilityRegistry};
use crate::config::{ClientOptions, DEFAULT_HOST, DEFAULT_PORT};
use crate::error::ReplyError;
use crate::events::{ClientEvent, EventEmitter, EventListener};
use crate::redirect::Adapter;
use std::fmt;

/// A reply value produced by a client command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Nil,
    Status(String),
    Bulk(String),
    Int(i64),
}

/// Completion callback for a client command.
///
/// The node-style `(err, data)` pair as a typed result: success with no data
/// is `Ok(None)`.
pub type ReplyCallback = Box<dyn FnMut(Result<Option<Value>, ReplyError>)>;

/// One positional argument of a variadic client command.
///
/// Tagged variants replace the original's runtime `typeof` sniffing.
pub enum CommandArg {
    Str(String),
    Int(i64),
    Callback(ReplyCallback),
}

impl fmt::Debug for CommandArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandArg::Str(s) => f.debug_tuple("Str").field(s).finish(),
            CommandArg::Int(i) => f.debug_tuple("Int").field(i).finish(),
            CommandArg::Callback(_) => f.write_str("Callback(..)"),
        }
    }
}

/// Outcome of asking the base client to run a command it may not support.
///
/// `Unsupported` hands the arguments back so the normalizer's dummy can still
/// fire a trailing callback.
pub enum CommandOutcome {
    Handled(Option<Value>),
    Unsupported(Vec<CommandArg>),
}

/// The seam over the underlying mock transport.
///
/// Only `ping`, `end` and the event emitter are required; everything else
/// defaults to `Unsupported`, which the adapter treats as a capability to
/// fill in rather than an error.
pub trait BaseClient {
    fn ping(&mut self, args: Vec<CommandArg>) -> Option<Value>;

    fn end(&mut self, flush: bool) -> Option<Value>;

    fn emitter(&mut self) -> &mut EventEmitter;

    fn info(&mut self, args: Vec<CommandArg>) -> CommandOutcome {
        CommandOutcome::Unsupported(args)
    }

    fn exec(&mut self, args: Vec<CommandArg>) -> CommandOutcome {
        CommandOutcome::Unsupported(args)
    }

    fn command(&mut self, name: &str, args: Vec<CommandArg>) -> CommandOutcome {
        let _ = name;
        CommandOutcome::Unsupported(args)
    }
}

/// A base client normalized to the production client's capability surface.
///
/// Normalization happens exactly once, at construction. `AdaptedClient`
/// deliberately does not implement [`BaseClient`], so wrapping an already
/// adapted client is unrepresentable and `ping` can never double-strip its
/// arguments.
pub struct AdaptedClient<C: BaseClient> {
    base: C,
    options: Option<ClientOptions>,
    manually_closing: bool,
    registry: CapabilityRegistry,
}

impl<C: BaseClient> AdaptedClient<C> {
    pub fn new(base: C, options: Option<ClientOptions>) -> Self {
        tracing::debug!(?options, "adapting client");
        AdaptedClient {
            base,
            options,
            manually_closing: false,
            registry: CapabilityRegistry::new(),
        }
    }

    /// Pings the server; the reply arrives through `callback`.
    ///
    /// Forwards exactly `[callback]` to the base client.
    pub fn ping(&mut self, callback: ReplyCallback) -> Option<Value> {
        self.base.ping(vec![CommandArg::Callback(callback)])
    }

    /// Ping with an echo payload, which the mock does not support.
    ///
    /// The payload is dropped, along with the trailing argument slot of
    /// `rest` (the caller's callback position), and the remainder is
    /// forwarded to the base client. This preserves the production wrapper's
    /// observable forwarding: `("PONG", cb)` forwards nothing,
    /// `("PONG", extra, cb)` forwards `[extra]`.
    pub fn ping_with_payload(&mut self, payload: &str, mut rest: Vec<CommandArg>) -> Option<Value> {
        tracing::debug!("mock ping has no echo support; dropping payload {:?}", payload);
        rest.pop();
        self.base.ping(rest)
    }

    /// INFO. When the base client lacks it, reports success with no data
    /// through a trailing callback.
    pub fn info(&mut self, args: Vec<CommandArg>) -> Option<Value> {
        match self.base.info(args) {
            CommandOutcome::Handled(value) => value,
            CommandOutcome::Unsupported(args) => reply_empty_success(args),
        }
    }

    /// EXEC. Same dummy contract as [`AdaptedClient::info`].
    pub fn exec(&mut self, args: Vec<CommandArg>) -> Option<Value> {
        match self.base.exec(args) {
            CommandOutcome::Handled(value) => value,
            CommandOutcome::Unsupported(args) => reply_empty_success(args),
        }
    }

    /// Ends the connection and latches the manually-closing flag.
    pub fn end(&mut self, flush: bool) -> Option<Value> {
        let result = self.base.end(flush);
        self.manually_closing = true;
        tracing::debug!(flush, "client ended; closing flag latched");
        result
    }

    /// True once [`AdaptedClient::end`] has been invoked. Never resets.
    pub fn is_closing(&self) -> bool {
        self.manually_closing
    }

    /// `(host, port)` from the stored options, falling back per field to the
    /// crate defaults.
    pub fn resolve_host_and_port(&self) -> (String, u16) {
        match &self.options {
            Some(options) => options.resolve_host_and_port(),
            None => (DEFAULT_HOST.to_string(), DEFAULT_PORT),
        }
    }

    /// The options this client was constructed with, verbatim.
    pub fn get_options(&self) -> Option<&ClientOptions> {
        self.options.as_ref()
    }

    /// Registers up to seven lifecycle listeners, in the production client's
    /// fixed order. `None` slots are skipped; never fails.
    #[allow(clippy::too_many_arguments)]
    pub fn add_event_listeners(
        &mut self,
        on_connect: Option<EventListener>,
        on_ready: Option<EventListener>,
        on_reconnecting: Option<EventListener>,
        on_error: Option<EventListener>,
        on_client_error: Option<EventListener>,
        on_end: Option<EventListener>,
        on_close: Option<EventListener>,
    ) {
        let slots = [
            (ClientEvent::Connect, on_connect),
            (ClientEvent::Ready, on_ready),
            (ClientEvent::Reconnecting, on_reconnecting),
            (ClientEvent::Error, on_error),
            (ClientEvent::ClientError, on_client_error),
            (ClientEvent::End, on_end),
            (ClientEvent::Close, on_close),
        ];
        for (event, listener) in slots {
            if let Some(listener) = listener {
                self.base.emitter().on(event, listener);
            }
        }
    }

    /// Handle to the adapter module's helpers, so redirect classification is
    /// reachable from a client value.
    pub fn adapter(&self) -> Adapter {
        Adapter
    }

    /// Runs a named command: a registry override first, otherwise whatever
    /// the base client supports. Commands neither overridden nor supported
    /// return `None` without invoking any callback.
    pub fn call(&mut self, name: &str, args: Vec<CommandArg>) -> Option<Value> {
        if let Some(handler) = self.registry.get_mut(name) {
            return handler(args);
        }
        match self.base.command(name, args) {
            CommandOutcome::Handled(value) => value,
            CommandOutcome::Unsupported(_args) => {
                tracing::debug!("command {} not supported by base client", name);
                None
            }
        }
    }

    pub fn get_capability(&mut self, name: &str) -> Option<&mut Capability> {
        self.registry.get_mut(name)
    }

    pub fn set_capability(&mut self, name: impl Into<String>, capability: Capability) {
        self.registry.set(name, capability);
    }

    pub fn delete_capability(&mut self, name: &str) -> Option<Capability> {
        self.registry.delete(name)
    }

    pub fn base(&self) -> &C {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut C {
        &mut self.base
    }
}

/// The dummy-capability contract: if the last argument is a callback, report
/// success with no data through it.
fn reply_empty_success(args: Vec<CommandArg>) -> Option<Value> {
    if let Some(CommandArg::Callback(mut callback)) = args.into_iter().last() {
        callback(Ok(None));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    // Minimal base that records what ping receives.
    struct RecordingClient {
        pinged_with: Rc<RefCell<Vec<usize>>>,
        emitter: EventEmitter,
    }

    impl BaseClient for RecordingClient {
        fn ping(&mut self, args: Vec<CommandArg>) -> Option<Value> {
            self.pinged_with.borrow_mut().push(args.len());
            Some(Value::Status("PONG".into()))
        }

        fn end(&mut self, _flush: bool) -> Option<Value> {
            None
        }

        fn emitter(&mut self) -> &mut EventEmitter {
            &mut self.emitter
        }
    }

    fn recording_client() -> (AdaptedClient<RecordingClient>, Rc<RefCell<Vec<usize>>>) {
        let pinged_with = Rc::new(RefCell::new(Vec::new()));
        let base = RecordingClient {
            pinged_with: Rc::clone(&pinged_with),
            emitter: EventEmitter::new(),
        };
        (AdaptedClient::new(base, None), pinged_with)
    }

    #[test]
    fn test_ping_forwards_only_the_callback() {
        let (mut client, pinged_with) = recording_client();
        client.ping(Box::new(|_| {}));
        assert_eq!(*pinged_with.borrow(), vec![1]);
    }

    #[test]
    fn test_ping_payload_and_callback_both_dropped() {
        let (mut client, pinged_with) = recording_client();
        client.ping_with_payload("PONG", vec![CommandArg::Callback(Box::new(|_| {}))]);
        assert_eq!(*pinged_with.borrow(), vec![0]);
    }

    #[test]
    fn test_ping_payload_extras_survive() {
        let (mut client, pinged_with) = recording_client();
        client.ping_with_payload(
            "PONG",
            vec![
                CommandArg::Str("extra".into()),
                CommandArg::Callback(Box::new(|_| {})),
            ],
        );
        assert_eq!(*pinged_with.borrow(), vec![1]);
    }

    #[test]
    fn test_repeated_pings_never_double_strip() {
        let (mut client, pinged_with) = recording_client();
        for _ in 0..3 {
            client.ping_with_payload(
                "PONG",
                vec![
                    CommandArg::Str("extra".into()),
                    CommandArg::Callback(Box::new(|_| {})),
                ],
            );
        }
        assert_eq!(*pinged_with.borrow(), vec![1, 1, 1]);
    }

    #[test]
    fn test_closing_latch_is_monotone() {
        let (mut client, _) = recording_client();
        assert!(!client.is_closing());
        client.end(true);
        assert!(client.is_closing());
        client.end(false);
        assert!(client.is_closing());
    }

    #[test]
    fn test_dummy_info_reports_success_with_no_data() {
        let (mut client, _) = recording_client();
        let outcome: Rc<RefCell<Option<Result<Option<Value>, ReplyError>>>> =
            Rc::new(RefCell::new(None));

        let sink = Rc::clone(&outcome);
        client.info(vec![CommandArg::Callback(Box::new(move |result| {
            *sink.borrow_mut() = Some(result);
        }))]);

        assert_eq!(*outcome.borrow(), Some(Ok(None)));
    }

    #[test]
    fn test_dummy_exec_without_callback_is_silent() {
        let (mut client, _) = recording_client();
        assert_eq!(client.exec(vec![CommandArg::Str("MULTI".into())]), None);
    }
}
