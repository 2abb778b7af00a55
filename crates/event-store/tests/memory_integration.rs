use std::sync::Arc;

use common::AggregateId;
use event_store::{
    AppendOptions, EventEnvelope, EventStore, EventStoreError, EventStoreExt, InMemoryEventStore,
    Version,
};

fn create_test_event(
    aggregate_id: AggregateId,
    version: Version,
    event_type: &str,
) -> EventEnvelope {
    EventEnvelope::builder()
        .aggregate_id(aggregate_id)
        .aggregate_type("TestAggregate")
        .event_type(event_type)
        .version(version)
        .payload(&serde_json::json!({ "test": true }))
        .unwrap()
        .build()
        .unwrap()
}

#[tokio::test]
async fn append_multiple_events_atomically() {
    let store = InMemoryEventStore::new();
    let aggregate_id = AggregateId::new();

    let events = vec![
        create_test_event(aggregate_id, Version::new(1), "Event1"),
        create_test_event(aggregate_id, Version::new(2), "Event2"),
        create_test_event(aggregate_id, Version::new(3), "Event3"),
    ];

    let result = store.append(events, AppendOptions::expect_new()).await;
    assert_eq!(result.unwrap(), Version::new(3));

    let stored = store.get_events_for_aggregate(aggregate_id).await.unwrap();
    let versions: Vec<_> = stored.iter().map(|e| e.version).collect();
    assert_eq!(versions, [Version::new(1), Version::new(2), Version::new(3)]);
}

#[tokio::test]
async fn rejected_batch_leaves_stream_untouched() {
    let store = InMemoryEventStore::new();
    let aggregate_id = AggregateId::new();
    store
        .append(
            vec![create_test_event(aggregate_id, Version::first(), "Event1")],
            AppendOptions::expect_new(),
        )
        .await
        .unwrap();

    // Versions 2 and 4: a gap inside the batch.
    let gapped = vec![
        create_test_event(aggregate_id, Version::new(2), "Event2"),
        create_test_event(aggregate_id, Version::new(4), "Event4"),
    ];
    let result = store
        .append(gapped, AppendOptions::expect_version(Version::first()))
        .await;

    assert!(matches!(result, Err(EventStoreError::InvalidAppend(_))));
    assert_eq!(
        store.get_aggregate_version(aggregate_id).await.unwrap(),
        Some(Version::first())
    );
}

#[tokio::test]
async fn optimistic_concurrency_conflict() {
    let store = InMemoryEventStore::new();
    let aggregate_id = AggregateId::new();

    let event1 = create_test_event(aggregate_id, Version::first(), "Event1");
    store
        .append(vec![event1], AppendOptions::expect_new())
        .await
        .unwrap();

    // Try to append with wrong expected version
    let event2 = create_test_event(aggregate_id, Version::new(2), "Event2");
    let result = store
        .append(vec![event2], AppendOptions::expect_version(Version::initial()))
        .await;

    match result {
        Err(EventStoreError::ConcurrencyConflict {
            expected, actual, ..
        }) => {
            assert_eq!(expected, Version::initial());
            assert_eq!(actual, Version::first());
        }
        other => panic!("expected a concurrency conflict, got {other:?}"),
    }
}

#[tokio::test]
async fn racing_writers_at_the_same_version_let_exactly_one_through() {
    let store = Arc::new(InMemoryEventStore::new());
    let aggregate_id = AggregateId::new();
    store
        .append(
            vec![create_test_event(aggregate_id, Version::first(), "Event1")],
            AppendOptions::expect_new(),
        )
        .await
        .unwrap();

    let writers: Vec<_> = (0..8)
        .map(|n| {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                let event = create_test_event(aggregate_id, Version::new(2), &format!("Writer{n}"));
                store
                    .append(vec![event], AppendOptions::expect_version(Version::first()))
                    .await
            })
        })
        .collect();

    let mut succeeded = 0;
    for writer in writers {
        match writer.await.unwrap() {
            Ok(version) => {
                assert_eq!(version, Version::new(2));
                succeeded += 1;
            }
            Err(err) => assert!(matches!(err, EventStoreError::ConcurrencyConflict { .. })),
        }
    }

    assert_eq!(succeeded, 1);
    assert_eq!(store.event_count().await, 2);
}

#[tokio::test]
async fn aggregate_exists_extension() {
    let store = InMemoryEventStore::new();
    let aggregate_id = AggregateId::new();

    assert!(!store.aggregate_exists(aggregate_id).await.unwrap());

    let event = create_test_event(aggregate_id, Version::first(), "Created");
    store
        .append(vec![event], AppendOptions::new())
        .await
        .unwrap();

    assert!(store.aggregate_exists(aggregate_id).await.unwrap());
}

#[tokio::test]
async fn envelope_fields_preserved() {
    let store = InMemoryEventStore::new();
    let aggregate_id = AggregateId::new();

    let event = create_test_event(aggregate_id, Version::first(), "TestEvent");
    let event_id = event.event_id;
    let timestamp = event.timestamp;
    store
        .append(vec![event], AppendOptions::new())
        .await
        .unwrap();

    let events = store.get_events_for_aggregate(aggregate_id).await.unwrap();
    assert_eq!(events.len(), 1);

    let retrieved = &events[0];
    assert_eq!(retrieved.event_id, event_id);
    assert_eq!(retrieved.timestamp, timestamp);
    assert_eq!(retrieved.aggregate_type, "TestAggregate");
    assert_eq!(retrieved.payload, serde_json::json!({ "test": true }));
}
