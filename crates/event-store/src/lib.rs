//! Event persistence for the customer workspace.
//!
//! Events travel as [`EventEnvelope`]s: a JSON payload plus the stream
//! coordinates (aggregate id, type, version) needed to append and replay it.

pub mod error;
pub mod event;
pub mod memory;
pub mod store;

pub use common::AggregateId;
pub use error::{EventStoreError, Result};
pub use event::{EventEnvelope, EventEnvelopeBuilder, EventId, Version};
pub use memory::InMemoryEventStore;
pub use store::{AppendOptions, EventStore, EventStoreExt};
