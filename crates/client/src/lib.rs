//! Terminal client for the slot arena.
//!
//! # Architecture
//!
//! ```text
//! slot-arena (composition root)
//!   ├─→ Runtime (sequencer worker, event bus)
//!   ├─→ ConsoleNotifier (narration + vitals on stdout)
//!   ├─→ Transcript (optional JSON-lines copy of every event)
//!   └─→ SelectionProvider (stdin prompt or random reels)
//! ```
//!
//! The presentation layer only ever sees the runtime through the
//! [`Notifier`](runtime::Notifier) port and the event bus.

pub mod config;
pub mod console;
pub mod input;
pub mod logging;
pub mod transcript;

pub use config::ClientConfig;
pub use console::ConsoleNotifier;
pub use input::StdinSelection;
