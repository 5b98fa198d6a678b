//! In-memory mock transport

use crate::adapter::{BaseClient, CommandArg, CommandOutcome, ReplyCallback, Value};
use crate::error::ReplyError;
use crate::events::{ClientEvent, EventEmitter};
use std::collections::HashMap;

/// An in-memory stand-in for a real Redis connection.
///
/// Supports `ping`, `get`/`set`/`del` against a process-local map, and `end`.
/// It has no `info` or `exec` and no ping echo payload, which is exactly what
/// the capability normalizer papers over. The connection is usable from
/// construction; `simulate_connect` and `simulate_error` exist so tests can
/// drive lifecycle events that a real transport would emit on its own.
pub struct MockClient {
    store: HashMap<String, String>,
    emitter: EventEmitter,
    connected: bool,
}

impl MockClient {
    pub fn new() -> Self {
        MockClient {
            store: HashMap::new(),
            emitter: EventEmitter::new(),
            connected: true,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Fires `connect` then `ready`, as a freshly established connection would.
    pub fn simulate_connect(&mut self) {
        self.emitter.emit(ClientEvent::Connect);
        self.emitter.emit(ClientEvent::Ready);
    }

    /// Fires `error` with the given reply error.
    pub fn simulate_error(&mut self, err: &ReplyError) {
        self.emitter.emit_error(ClientEvent::Error, err);
    }

    fn reply(callback: Option<ReplyCallback>, result: CommandResult) {
        if let Some(mut cb) = callback {
            cb(result);
        }
    }

    fn closed_reply(args: Vec<CommandArg>) {
        Self::reply(
            trailing_callback(args),
            Err(ReplyError::new("The connection is already closed")),
        );
    }
}

impl Default for MockClient {
    fn default() -> Self {
        MockClient::new()
    }
}

type CommandResult = Result<Option<Value>, ReplyError>;

/// Pulls the trailing callback out of an argument list, discarding the rest.
fn trailing_callback(args: Vec<CommandArg>) -> Option<ReplyCallback> {
    match args.into_iter().last() {
        Some(CommandArg::Callback(cb)) => Some(cb),
        _ => None,
    }
}

/// Splits positional string arguments off the front, keeping any trailing
/// callback.
fn split_args(args: Vec<CommandArg>) -> (Vec<String>, Option<ReplyCallback>) {
    let mut positional = Vec::new();
    let mut callback = None;
    for arg in args {
        match arg {
            CommandArg::Str(s) => positional.push(s),
            CommandArg::Int(i) => positional.push(i.to_string()),
            CommandArg::Callback(cb) => callback = Some(cb),
        }
    }
    (positional, callback)
}

impl BaseClient for MockClient {
    /// Replies `PONG` through any trailing callback. Non-callback arguments
    /// are ignored: the mock supports no echo payload.
    fn ping(&mut self, args: Vec<CommandArg>) -> Option<Value> {
        if !self.connected {
            Self::closed_reply(args);
            return None;
        }
        let pong = Value::Status("PONG".to_string());
        Self::reply(trailing_callback(args), Ok(Some(pong.clone())));
        Some(pong)
    }

    fn end(&mut self, flush: bool) -> Option<Value> {
        tracing::debug!(flush, "mock connection ending");
        self.connected = false;
        self.emitter.emit(ClientEvent::End);
        None
    }

    fn emitter(&mut self) -> &mut EventEmitter {
        &mut self.emitter
    }

    fn command(&mut self, name: &str, args: Vec<CommandArg>) -> CommandOutcome {
        if !self.connected {
            Self::closed_reply(args);
            return CommandOutcome::Handled(None);
        }
        let (positional, callback) = split_args(args);
        match name.to_ascii_lowercase().as_str() {
            "get" => {
                let value = positional
                    .first()
                    .and_then(|key| self.store.get(key))
                    .map(|v| Value::Bulk(v.clone()));
                Self::reply(callback, Ok(value.clone()));
                CommandOutcome::Handled(value)
            }
            "set" => match (positional.first(), positional.get(1)) {
                (Some(key), Some(value)) => {
                    self.store.insert(key.clone(), value.clone());
                    let ok = Value::Status("OK".to_string());
                    Self::reply(callback, Ok(Some(ok.clone())));
                    CommandOutcome::Handled(Some(ok))
                }
                _ => {
                    Self::reply(
                        callback,
                        Err(ReplyError::new("wrong number of arguments for 'set' command")),
                    );
                    CommandOutcome::Handled(None)
                }
            },
            "del" => {
                let removed = positional
                    .iter()
                    .filter(|key| self.store.remove(*key).is_some())
                    .count() as i64;
                let count = Value::Int(removed);
                Self::reply(callback, Ok(Some(count.clone())));
                CommandOutcome::Handled(Some(count))
            }
            _ => {
                // Hand the arguments back so the adapter's dummy
                // capabilities can still fire the callback.
                let mut args: Vec<CommandArg> =
                    positional.into_iter().map(CommandArg::Str).collect();
                if let Some(cb) = callback {
                    args.push(CommandArg::Callback(cb));
                }
                CommandOutcome::Unsupported(args)
            }
        }
    }
}
