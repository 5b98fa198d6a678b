//! Single-threaded event emission for client lifecycle notifications

use crate::error::ReplyError;
use std::collections::HashMap;

/// Named events a client emits over its lifetime.
///
/// Wire names match the production client's event names, including the
/// camelCase `clientError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientEvent {
    Connect,
    Ready,
    Reconnecting,
    Error,
    ClientError,
    End,
    Close,
}

impl ClientEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientEvent::Connect => "connect",
            ClientEvent::Ready => "ready",
            ClientEvent::Reconnecting => "reconnecting",
            ClientEvent::Error => "error",
            ClientEvent::ClientError => "clientError",
            ClientEvent::End => "end",
            ClientEvent::Close => "close",
        }
    }
}

/// Listener for a client event. Lifecycle events pass `None`; `Error` and
/// `ClientError` pass the offending reply error.
pub type EventListener = Box<dyn FnMut(Option<&ReplyError>)>;

/// Minimal single-threaded event emitter. Listeners run inline, in
/// registration order.
#[derive(Default)]
pub struct EventEmitter {
    listeners: HashMap<ClientEvent, Vec<EventListener>>,
}

impl EventEmitter {
    pub fn new() -> Self {
        EventEmitter::default()
    }

    pub fn on(&mut self, event: ClientEvent, listener: EventListener) {
        self.listeners.entry(event).or_default().push(listener);
    }

    pub fn emit(&mut self, event: ClientEvent) {
        self.emit_with(event, None);
    }

    pub fn emit_error(&mut self, event: ClientEvent, err: &ReplyError) {
        self.emit_with(event, Some(err));
    }

    fn emit_with(&mut self, event: ClientEvent, err: Option<&ReplyError>) {
        tracing::trace!("emit {}", event.as_str());
        if let Some(listeners) = self.listeners.get_mut(&event) {
            for listener in listeners.iter_mut() {
                listener(err);
            }
        }
    }

    pub fn listener_count(&self, event: ClientEvent) -> usize {
        self.listeners.get(&event).map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_listeners_run_in_registration_order() {
        let order = Rc::new(Cell::new(0u32));
        let mut emitter = EventEmitter::new();

        let first = Rc::clone(&order);
        emitter.on(
            ClientEvent::Ready,
            Box::new(move |_| first.set(first.get() * 10 + 1)),
        );
        let second = Rc::clone(&order);
        emitter.on(
            ClientEvent::Ready,
            Box::new(move |_| second.set(second.get() * 10 + 2)),
        );

        emitter.emit(ClientEvent::Ready);
        assert_eq!(order.get(), 12);
    }

    #[test]
    fn test_emit_without_listeners_is_a_noop() {
        let mut emitter = EventEmitter::new();
        emitter.emit(ClientEvent::Close);
        assert_eq!(emitter.listener_count(ClientEvent::Close), 0);
    }

    #[test]
    fn test_error_listener_receives_the_error() {
        let seen = Rc::new(Cell::new(false));
        let mut emitter = EventEmitter::new();

        let flag = Rc::clone(&seen);
        emitter.on(
            ClientEvent::Error,
            Box::new(move |err| flag.set(err.is_some())),
        );

        let err = ReplyError::new("connection refused");
        emitter.emit_error(ClientEvent::Error, &err);
        assert!(seen.get());
    }
}
