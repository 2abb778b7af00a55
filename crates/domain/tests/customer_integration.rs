//! Integration tests for the Customer aggregate.
//!
//! These tests drive the customer through `CustomerService`, so every step
//! is a full load, command, append cycle against the in-memory store.

use domain::{
    Aggregate, ChangeCustomerEmailAddress, ConfirmCustomerEmailAddress, ConfirmationHash,
    Customer, CustomerError, CustomerEvent, CustomerId, CustomerService, DomainError,
    DomainEvent, HistoryError, RegisterCustomer, reconstitute_from_envelopes,
};
use event_store::{
    AppendOptions, EventEnvelope, EventStore, EventStoreError, InMemoryEventStore, Version,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

fn create_service() -> (CustomerService<InMemoryEventStore>, InMemoryEventStore) {
    init_tracing();
    let store = InMemoryEventStore::new();
    (CustomerService::new(store.clone()), store)
}

fn event_types(events: &[CustomerEvent]) -> Vec<&'static str> {
    events.iter().map(DomainEvent::event_type).collect()
}

async fn register_john(
    service: &CustomerService<InMemoryEventStore>,
) -> (CustomerId, ConfirmationHash) {
    let cmd = RegisterCustomer::build("john@doe.com", "John", "Doe").unwrap();
    let customer_id = cmd.customer_id;
    let hash = cmd.confirmation_hash.clone();

    let result = service.register(cmd).await.unwrap();
    assert_eq!(event_types(&result.events), ["CustomerRegistered"]);
    assert_eq!(result.new_version, Version::first());

    (customer_id, hash)
}

mod confirmation {
    use super::*;

    #[tokio::test]
    async fn wrong_hash_then_right_hash_then_repeat() {
        let (service, store) = create_service();
        let (customer_id, hash) = register_john(&service).await;

        let result = service
            .confirm_email_address(ConfirmCustomerEmailAddress::new(
                customer_id,
                ConfirmationHash::generate(),
            ))
            .await
            .unwrap();
        assert_eq!(
            event_types(&result.events),
            ["CustomerEmailAddressConfirmationFailed"]
        );
        assert!(!result.aggregate.is_email_address_confirmed());

        let result = service
            .confirm_email_address(ConfirmCustomerEmailAddress::new(customer_id, hash.clone()))
            .await
            .unwrap();
        assert_eq!(event_types(&result.events), ["CustomerEmailAddressConfirmed"]);
        assert!(result.aggregate.is_email_address_confirmed());

        let result = service
            .confirm_email_address(ConfirmCustomerEmailAddress::new(customer_id, hash))
            .await
            .unwrap();
        assert!(result.events.is_empty());
        assert_eq!(result.new_version, Version::new(3));
        assert_eq!(store.event_count().await, 3);
    }

    #[tokio::test]
    async fn confirmation_built_from_raw_strings() {
        let (service, _) = create_service();
        let (customer_id, hash) = register_john(&service).await;

        let cmd =
            ConfirmCustomerEmailAddress::build(&customer_id.to_string(), hash.as_str()).unwrap();
        let result = service.confirm_email_address(cmd).await.unwrap();

        assert_eq!(event_types(&result.events), ["CustomerEmailAddressConfirmed"]);
    }

    #[tokio::test]
    async fn unknown_customer_is_not_found() {
        let (service, _) = create_service();

        let result = service
            .confirm_email_address(ConfirmCustomerEmailAddress::new(
                CustomerId::generate(),
                ConfirmationHash::generate(),
            ))
            .await;

        assert!(matches!(
            result,
            Err(DomainError::AggregateNotFound {
                aggregate_type: "Customer",
                ..
            })
        ));
    }
}

mod email_change {
    use super::*;

    #[tokio::test]
    async fn change_supersedes_the_original_hash() {
        let (service, _) = create_service();
        let (customer_id, original_hash) = register_john(&service).await;

        let result = service
            .change_email_address(
                ChangeCustomerEmailAddress::build(&customer_id.to_string(), "john+changed@doe.com")
                    .unwrap(),
            )
            .await
            .unwrap();
        let new_hash = match result.events.as_slice() {
            [CustomerEvent::CustomerEmailAddressChanged(data)] => {
                assert_eq!(data.email_address.as_str(), "john+changed@doe.com");
                assert_ne!(data.confirmation_hash, original_hash);
                data.confirmation_hash.clone()
            }
            other => panic!("expected a single CustomerEmailAddressChanged, got {other:?}"),
        };

        let result = service
            .confirm_email_address(ConfirmCustomerEmailAddress::new(customer_id, original_hash))
            .await
            .unwrap();
        assert_eq!(
            event_types(&result.events),
            ["CustomerEmailAddressConfirmationFailed"]
        );

        let result = service
            .confirm_email_address(ConfirmCustomerEmailAddress::new(customer_id, new_hash))
            .await
            .unwrap();
        assert_eq!(event_types(&result.events), ["CustomerEmailAddressConfirmed"]);
    }

    #[tokio::test]
    async fn change_after_confirmation_unconfirms() {
        let (service, _) = create_service();
        let (customer_id, hash) = register_john(&service).await;
        service
            .confirm_email_address(ConfirmCustomerEmailAddress::new(customer_id, hash))
            .await
            .unwrap();

        let result = service
            .change_email_address(
                ChangeCustomerEmailAddress::build(&customer_id.to_string(), "john+changed@doe.com")
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(!result.aggregate.is_email_address_confirmed());
        assert_eq!(result.new_version, Version::new(3));
    }

    #[tokio::test]
    async fn unchanged_address_appends_nothing() {
        let (service, store) = create_service();
        let (customer_id, _) = register_john(&service).await;

        let result = service
            .change_email_address(
                ChangeCustomerEmailAddress::build(&customer_id.to_string(), "John@Doe.com")
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(result.events.is_empty());
        assert_eq!(store.event_count().await, 1);
    }

    #[tokio::test]
    async fn invalid_new_address_never_reaches_the_aggregate() {
        let customer_id = CustomerId::generate().to_string();
        let result = ChangeCustomerEmailAddress::build(&customer_id, "john at doe");

        assert!(matches!(
            result,
            Err(CustomerError::InvalidEmailFormat { .. })
        ));
    }
}

mod persistence {
    use super::*;

    #[tokio::test]
    async fn stored_history_replays_to_the_live_state() {
        let (service, store) = create_service();
        let (customer_id, hash) = register_john(&service).await;
        service
            .confirm_email_address(ConfirmCustomerEmailAddress::new(customer_id, hash))
            .await
            .unwrap();
        let live = service
            .change_email_address(
                ChangeCustomerEmailAddress::build(&customer_id.to_string(), "john+changed@doe.com")
                    .unwrap(),
            )
            .await
            .unwrap()
            .aggregate;

        let loaded = service.get_customer(customer_id).await.unwrap().unwrap();
        assert_eq!(loaded, live);

        let envelopes = store
            .get_events_for_aggregate(customer_id.into())
            .await
            .unwrap();
        let types: Vec<_> = envelopes.iter().map(|e| e.event_type.as_str()).collect();
        assert_eq!(
            types,
            [
                "CustomerRegistered",
                "CustomerEmailAddressConfirmed",
                "CustomerEmailAddressChanged"
            ]
        );
        assert!(envelopes.iter().all(|e| e.aggregate_type == "Customer"));
    }

    #[tokio::test]
    async fn get_customer_returns_none_when_unknown() {
        let (service, _) = create_service();
        assert!(
            service
                .get_customer(CustomerId::generate())
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn registering_the_same_id_twice_conflicts() {
        let (service, _) = create_service();
        let cmd = RegisterCustomer::build("john@doe.com", "John", "Doe").unwrap();
        service.register(cmd.clone()).await.unwrap();

        let result = service.register(cmd).await;

        assert!(matches!(
            result,
            Err(DomainError::EventStore(
                EventStoreError::ConcurrencyConflict { .. }
            ))
        ));
    }

    #[tokio::test]
    async fn service_reloads_before_each_command() {
        let (service, store) = create_service();
        let (customer_id, hash) = register_john(&service).await;

        // Another writer appends behind this process's back.
        let sneaky = CustomerEvent::email_address_confirmation_failed(customer_id);
        let envelope = EventEnvelope::builder()
            .event_type(sneaky.event_type())
            .aggregate_id(customer_id.into())
            .aggregate_type(Customer::aggregate_type())
            .version(Version::new(2))
            .payload(&sneaky)
            .unwrap()
            .build()
            .unwrap();
        store
            .append(vec![envelope], AppendOptions::expect_version(Version::first()))
            .await
            .unwrap();

        // The service reloads per command, so it sees version 2 and succeeds.
        let result = service
            .confirm_email_address(ConfirmCustomerEmailAddress::new(customer_id, hash))
            .await
            .unwrap();
        assert_eq!(result.new_version, Version::new(3));
    }

    #[tokio::test]
    async fn history_without_registration_is_rejected() {
        init_tracing();
        let customer_id = CustomerId::generate();
        let event = CustomerEvent::email_address_confirmed(customer_id);
        let envelope = EventEnvelope::builder()
            .event_type(event.event_type())
            .aggregate_id(customer_id.into())
            .aggregate_type("Customer")
            .version(Version::first())
            .payload(&event)
            .unwrap()
            .build()
            .unwrap();

        let result = reconstitute_from_envelopes::<Customer>(&[envelope]);

        assert!(matches!(
            result,
            Err(DomainError::History(HistoryError::MissingGenesis {
                found: "CustomerEmailAddressConfirmed",
                ..
            }))
        ));
    }
}
