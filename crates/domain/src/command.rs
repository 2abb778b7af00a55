//! Command handling infrastructure.

use std::marker::PhantomData;

use common::AggregateId;
use event_store::{AppendOptions, EventEnvelope, EventStore, EventStoreError, Version};

use crate::aggregate::{Aggregate, DomainEvent};
use crate::error::DomainError;
use crate::replay::reconstitute_from_envelopes;

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult<A: Aggregate> {
    /// The aggregate after the command ran.
    pub aggregate: A,

    /// The events the command recorded and the store accepted.
    /// Empty when the command decided nothing should happen.
    pub events: Vec<A::Event>,

    /// The stream version after the command.
    pub new_version: Version,
}

/// Trait for commands that can be executed against an aggregate.
pub trait Command: Send + Sync {
    /// The type of aggregate this command targets.
    type Aggregate: Aggregate;

    /// Returns the ID of the aggregate this command targets.
    fn aggregate_id(&self) -> AggregateId;
}

/// Runs one command per unit of work against an event store.
///
/// Each execution replays the aggregate's stream, lets the command decide,
/// and appends whatever the aggregate recorded. The append expects the
/// stream to still be at the loaded version, so a concurrent writer makes
/// it fail instead of silently interleaving.
pub struct CommandHandler<S, A>
where
    S: EventStore,
    A: Aggregate,
{
    store: S,
    _phantom: PhantomData<A>,
}

impl<S, A> CommandHandler<S, A>
where
    S: EventStore,
    A: Aggregate,
{
    /// Creates a new command handler with the given event store.
    pub fn new(store: S) -> Self {
        Self {
            store,
            _phantom: PhantomData,
        }
    }

    /// Returns a reference to the underlying event store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Replays an aggregate from the store.
    ///
    /// Returns `None` if the aggregate has no events.
    pub async fn load(&self, aggregate_id: AggregateId) -> Result<Option<A>, DomainError> {
        let envelopes = self.store.get_events_for_aggregate(aggregate_id).await?;
        if envelopes.is_empty() {
            return Ok(None);
        }

        reconstitute_from_envelopes(&envelopes).map(Some)
    }

    /// Persists a freshly created aggregate.
    ///
    /// The aggregate's stream must not exist yet.
    pub async fn create(&self, mut aggregate: A) -> Result<CommandResult<A>, DomainError> {
        let events = aggregate.take_recorded_events();
        let aggregate_id = aggregate.id();
        self.commit(aggregate, aggregate_id, Version::initial(), events)
            .await
    }

    /// Loads an existing aggregate, runs `command_fn` on it, and appends
    /// the recorded events.
    pub async fn execute<F>(
        &self,
        aggregate_id: AggregateId,
        command_fn: F,
    ) -> Result<CommandResult<A>, DomainError>
    where
        F: FnOnce(&mut A) -> Result<(), A::Error>,
        DomainError: From<A::Error>,
    {
        let mut aggregate =
            self.load(aggregate_id)
                .await?
                .ok_or_else(|| DomainError::AggregateNotFound {
                    aggregate_type: A::aggregate_type(),
                    aggregate_id: aggregate_id.to_string(),
                })?;
        let loaded_version = aggregate.version();

        command_fn(&mut aggregate)?;

        let events = aggregate.take_recorded_events();
        self.commit(aggregate, aggregate_id, loaded_version, events)
            .await
    }

    async fn commit(
        &self,
        mut aggregate: A,
        aggregate_id: AggregateId,
        loaded_version: Version,
        events: Vec<A::Event>,
    ) -> Result<CommandResult<A>, DomainError> {
        if events.is_empty() {
            aggregate.set_version(loaded_version);
            return Ok(CommandResult {
                aggregate,
                events,
                new_version: loaded_version,
            });
        }

        let envelopes = self.build_envelopes(aggregate_id, loaded_version, &events)?;
        let options = if loaded_version == Version::initial() {
            AppendOptions::expect_new()
        } else {
            AppendOptions::expect_version(loaded_version)
        };

        let new_version = self.store.append(envelopes, options).await?;
        aggregate.set_version(new_version);

        for event in &events {
            metrics::counter!(
                "domain_events_recorded_total",
                "aggregate_type" => A::aggregate_type(),
                "event_type" => event.event_type()
            )
            .increment(1);
        }

        Ok(CommandResult {
            aggregate,
            events,
            new_version,
        })
    }

    fn build_envelopes(
        &self,
        aggregate_id: AggregateId,
        loaded_version: Version,
        events: &[A::Event],
    ) -> Result<Vec<EventEnvelope>, DomainError> {
        let mut version = loaded_version;

        events
            .iter()
            .map(|event| -> Result<EventEnvelope, DomainError> {
                version = version.next();
                EventEnvelope::builder()
                    .aggregate_id(aggregate_id)
                    .aggregate_type(A::aggregate_type())
                    .event_type(event.event_type())
                    .version(version)
                    .payload(event)?
                    .build()
                    .ok_or_else(|| {
                        EventStoreError::InvalidAppend("incomplete event envelope".to_string())
                            .into()
                    })
            })
            .collect()
    }
}
