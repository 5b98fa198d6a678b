use crate::adapter::client::{CommandArg, Value};
use std::collections::HashMap;

/// A named, overridable command handler.
pub type Capability = Box<dyn FnMut(Vec<CommandArg>) -> Option<Value>>;

/// Per-client registry of named command overrides.
///
/// Replaces the original prototype-mutation escape hatch: patches are scoped
/// to one client instance instead of a class shared by all of them. Consulted
/// by `AdaptedClient::call` before the base client sees the command.
#[derive(Default)]
pub struct CapabilityRegistry {
    handlers: HashMap<String, Capability>,
}

impl CapabilityRegistry {
    pub fn new() -> Self {
        CapabilityRegistry::default()
    }

    /// Installs or replaces a handler. Last write wins.
    pub fn set(&mut self, name: impl Into<String>, capability: Capability) {
        let name = name.into();
        tracing::debug!("capability override installed: {}", name);
        self.handlers.insert(name, capability);
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Capability> {
        self.handlers.get_mut(name)
    }

    pub fn delete(&mut self, name: &str) -> Option<Capability> {
        self.handlers.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }
}
