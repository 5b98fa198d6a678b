//! Client capability normalization

pub mod client;
pub mod registry;

pub use client::{AdaptedClient, BaseClient, CommandArg, CommandOutcome, ReplyCallback, Value};
pub use registry::{Capability, CapabilityRegistry};
