//! Runtime orchestration for the elemental slots duel.
//!
//! This crate wires the deterministic [`combat_core::TurnSequencer`] into a
//! paced background worker, a notifier port and a broadcast event bus.
//! Consumers embed [`Runtime`] to play rounds from a [`SelectionProvider`],
//! subscribe to events, and submit turns through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator, builder and configuration
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod runtime;

mod workers;

pub use api::{
    Notifier, NotifierSet, NullNotifier, RandomReels, Result, RuntimeError, RuntimeHandle,
    ScriptedSelection, SelectionProvider, TurnDisposition,
};
pub use events::{Event, EventBus, Topic};
pub use runtime::{PacingConfig, Runtime, RuntimeBuilder, RuntimeConfig};
pub use workers::RoundSummary;
