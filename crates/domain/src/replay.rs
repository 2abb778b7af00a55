//! Rebuilding aggregates from their event history.
//!
//! Replay is a left fold: the first event creates the aggregate through
//! [`Aggregate::genesis`], every following event goes through
//! [`Aggregate::apply`]. Nothing is recorded while replaying.

use event_store::{EventEnvelope, Version};

use crate::aggregate::{Aggregate, DomainEvent};
use crate::error::{DomainError, HistoryError};

/// Folds `events`, in order, into a fresh aggregate.
///
/// The resulting version equals the number of events replayed.
pub fn reconstitute<A: Aggregate>(
    events: impl IntoIterator<Item = A::Event>,
) -> Result<A, HistoryError> {
    let mut events = events.into_iter();

    let first = events.next().ok_or(HistoryError::Empty {
        aggregate_type: A::aggregate_type(),
    })?;
    let mut aggregate = A::genesis(&first).ok_or_else(|| HistoryError::MissingGenesis {
        aggregate_type: A::aggregate_type(),
        found: first.event_type(),
    })?;
    aggregate.set_version(Version::first());

    for event in events {
        aggregate.apply(event);
        aggregate.set_version(aggregate.version().next());
    }

    tracing::debug!(
        aggregate_type = A::aggregate_type(),
        aggregate_id = %aggregate.id(),
        version = %aggregate.version(),
        "reconstituted aggregate"
    );

    Ok(aggregate)
}

/// Decodes stored envelopes and replays them.
///
/// The aggregate takes the version of the last envelope.
pub fn reconstitute_from_envelopes<A: Aggregate>(
    envelopes: &[EventEnvelope],
) -> Result<A, DomainError> {
    let events = envelopes
        .iter()
        .map(EventEnvelope::decode::<A::Event>)
        .collect::<Result<Vec<_>, _>>()?;

    let mut aggregate = reconstitute::<A>(events)?;
    if let Some(last) = envelopes.last() {
        aggregate.set_version(last.version);
    }

    Ok(aggregate)
}
