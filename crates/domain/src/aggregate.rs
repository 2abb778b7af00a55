//! Core aggregate and domain event traits.

use common::AggregateId;
use event_store::Version;
use serde::{Serialize, de::DeserializeOwned};

/// Trait for domain events.
///
/// Domain events represent facts that have happened in the domain.
/// They are immutable and named in past tense.
pub trait DomainEvent: Serialize + DeserializeOwned + Send + Sync + Clone {
    /// Returns the event type name stored alongside the payload.
    fn event_type(&self) -> &'static str;
}

/// Trait for aggregates in an event-sourced system.
///
/// An aggregate never stores its state directly. It is created from the
/// first event of its history, mutated only by applying events, and keeps
/// the events produced by its latest command until the caller takes them.
pub trait Aggregate: Send + Sync + Sized {
    /// The type of events this aggregate produces and consumes.
    type Event: DomainEvent;

    /// Errors for misuse of the aggregate. Business outcomes are events.
    type Error: std::error::Error + Send + Sync;

    /// Returns the aggregate type name.
    fn aggregate_type() -> &'static str;

    /// Returns the identity of the event stream this aggregate lives in.
    fn id(&self) -> AggregateId;

    /// Number of events this aggregate's state is derived from.
    fn version(&self) -> Version;

    fn set_version(&mut self, version: Version);

    /// Builds the aggregate from the first event of a history.
    ///
    /// Returns `None` if `event` cannot start a history.
    fn genesis(event: &Self::Event) -> Option<Self>;

    /// Applies an event to the aggregate, updating its state.
    ///
    /// Events are facts, so this must be deterministic and must not fail.
    fn apply(&mut self, event: Self::Event);

    /// Events produced by the most recent command.
    fn recorded_events(&self) -> &[Self::Event];

    /// Hands the recorded events to the caller, leaving the buffer empty.
    fn take_recorded_events(&mut self) -> Vec<Self::Event>;
}
