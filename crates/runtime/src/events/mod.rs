//! Topic-based event bus for runtime events.
//!
//! Every notification the sequencer emits is also published here, so any
//! number of observers can follow a match without implementing
//! [`Notifier`](crate::api::Notifier).

mod bus;
mod types;

pub use bus::{EventBus, Topic};
pub use types::Event;
