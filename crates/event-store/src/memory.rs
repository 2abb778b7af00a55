use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    AggregateId, EventEnvelope, EventStoreError, Result, Version,
    store::{AppendOptions, EventStore, validate_events_for_append},
};

/// Event store that keeps every stream in process memory.
///
/// Clones share the same underlying streams.
#[derive(Clone, Default)]
pub struct InMemoryEventStore {
    streams: Arc<RwLock<HashMap<AggregateId, Vec<EventEnvelope>>>>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of events across all streams.
    pub async fn event_count(&self) -> usize {
        self.streams.read().await.values().map(Vec::len).sum()
    }
}

fn stream_version(stream: &[EventEnvelope]) -> Version {
    stream
        .last()
        .map(|event| event.version)
        .unwrap_or_else(Version::initial)
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn append(&self, events: Vec<EventEnvelope>, options: AppendOptions) -> Result<Version> {
        validate_events_for_append(&events)?;

        let aggregate_id = events[0].aggregate_id;
        let first_new_version = events[0].version;

        let mut streams = self.streams.write().await;
        let current_version = streams
            .get(&aggregate_id)
            .map(|stream| stream_version(stream))
            .unwrap_or_else(Version::initial);

        if let Some(expected) = options.expected_version
            && expected != current_version
        {
            return Err(EventStoreError::ConcurrencyConflict {
                aggregate_id,
                expected,
                actual: current_version,
            });
        }

        // Equivalent of the unique (aggregate_id, version) constraint.
        if first_new_version != current_version.next() {
            return Err(EventStoreError::ConcurrencyConflict {
                aggregate_id,
                expected: options.expected_version.unwrap_or(current_version),
                actual: current_version,
            });
        }

        let appended = events.len();
        let stream = streams.entry(aggregate_id).or_default();
        stream.extend(events);
        let new_version = stream_version(stream);

        metrics::counter!("event_store_events_appended_total").increment(appended as u64);
        tracing::debug!(%aggregate_id, appended, %new_version, "appended events");

        Ok(new_version)
    }

    async fn get_events_for_aggregate(
        &self,
        aggregate_id: AggregateId,
    ) -> Result<Vec<EventEnvelope>> {
        let streams = self.streams.read().await;
        Ok(streams.get(&aggregate_id).cloned().unwrap_or_default())
    }

    async fn get_aggregate_version(&self, aggregate_id: AggregateId) -> Result<Option<Version>> {
        let streams = self.streams.read().await;
        Ok(streams
            .get(&aggregate_id)
            .filter(|stream| !stream.is_empty())
            .map(|stream| stream_version(stream)))
    }
}
