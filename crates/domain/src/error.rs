//! Domain error types.

use event_store::EventStoreError;
use thiserror::Error;

use crate::customer::CustomerError;

/// Errors that can occur during domain operations.
///
/// Business outcomes such as a wrong confirmation hash are recorded as
/// events and never show up here.
#[derive(Debug, Error)]
pub enum DomainError {
    /// An error occurred in the event store.
    #[error("Event store error: {0}")]
    EventStore(#[from] EventStoreError),

    /// A customer command or value was rejected before reaching the aggregate.
    #[error("Customer error: {0}")]
    Customer(#[from] CustomerError),

    /// The stored history cannot be replayed.
    #[error("History error: {0}")]
    History(#[from] HistoryError),

    /// No events exist for the addressed aggregate.
    #[error("Aggregate not found: {aggregate_type} with id {aggregate_id}")]
    AggregateNotFound {
        aggregate_type: &'static str,
        aggregate_id: String,
    },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Reasons a sequence of events cannot be turned into an aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("{aggregate_type} history is empty")]
    Empty { aggregate_type: &'static str },

    #[error("{aggregate_type} history must start with its creation event, found {found}")]
    MissingGenesis {
        aggregate_type: &'static str,
        found: &'static str,
    },
}
