//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! other layers can stay focused on orchestration and workers.

pub mod errors;
pub mod handle;
pub mod notifier;
pub mod providers;

pub use errors::{Result, RuntimeError, TurnDisposition};
pub use handle::RuntimeHandle;
pub use notifier::{Notifier, NotifierSet, NullNotifier};
pub use providers::{RandomReels, ScriptedSelection, SelectionProvider};
