//! The two walkthroughs the demo binary runs.

use domain::{
    ChangeCustomerEmailAddress, CommandResult, ConfirmCustomerEmailAddress, ConfirmationHash,
    Customer, CustomerEvent, CustomerService, DomainEvent, RegisterCustomer,
};
use event_store::EventStore;

use crate::DemoError;

/// Checks that a step recorded exactly `expected`, logging what it recorded.
fn expect_events(
    step: &'static str,
    result: &CommandResult<Customer>,
    expected: &[&'static str],
) -> Result<(), DemoError> {
    let actual: Vec<&'static str> = result.events.iter().map(DomainEvent::event_type).collect();

    for event_type in &actual {
        tracing::info!(step, event_type, version = %result.new_version, "event recorded");
    }
    if actual.is_empty() {
        tracing::info!(step, version = %result.new_version, "nothing recorded");
    }

    if actual != expected {
        return Err(DemoError::UnexpectedOutcome {
            step,
            expected: expected.to_vec(),
            actual,
        });
    }
    Ok(())
}

/// Register, confirm with a wrong hash, confirm with the right hash, confirm again.
#[tracing::instrument(skip(service))]
pub async fn run_confirmation<S: EventStore>(
    service: &CustomerService<S>,
) -> Result<Customer, DemoError> {
    let register = RegisterCustomer::build("john@doe.com", "John", "Doe")?;
    let customer_id = register.customer_id;
    let hash = register.confirmation_hash.clone();

    let result = service.register(register).await?;
    expect_events("register", &result, &["CustomerRegistered"])?;

    let result = service
        .confirm_email_address(ConfirmCustomerEmailAddress::new(
            customer_id,
            ConfirmationHash::generate(),
        ))
        .await?;
    expect_events(
        "confirm with wrong hash",
        &result,
        &["CustomerEmailAddressConfirmationFailed"],
    )?;

    let result = service
        .confirm_email_address(ConfirmCustomerEmailAddress::new(customer_id, hash.clone()))
        .await?;
    expect_events(
        "confirm with right hash",
        &result,
        &["CustomerEmailAddressConfirmed"],
    )?;

    let result = service
        .confirm_email_address(ConfirmCustomerEmailAddress::new(customer_id, hash))
        .await?;
    expect_events("confirm again", &result, &[])?;

    Ok(result.aggregate)
}

/// Register, change the address, confirm with the old hash, then with the new one.
#[tracing::instrument(skip(service))]
pub async fn run_change_then_confirm<S: EventStore>(
    service: &CustomerService<S>,
) -> Result<Customer, DemoError> {
    let register = RegisterCustomer::build("jane@doe.com", "Jane", "Doe")?;
    let customer_id = register.customer_id;
    let original_hash = register.confirmation_hash.clone();

    let result = service.register(register).await?;
    expect_events("register", &result, &["CustomerRegistered"])?;

    let change =
        ChangeCustomerEmailAddress::build(&customer_id.to_string(), "jane+changed@doe.com")?;
    let result = service.change_email_address(change).await?;
    expect_events("change email", &result, &["CustomerEmailAddressChanged"])?;
    let new_hash = result
        .events
        .iter()
        .find_map(|event| match event {
            CustomerEvent::CustomerEmailAddressChanged(data) => {
                Some(data.confirmation_hash.clone())
            }
            _ => None,
        })
        .ok_or(DemoError::MissingConfirmationHash {
            step: "change email",
        })?;

    let result = service
        .confirm_email_address(ConfirmCustomerEmailAddress::new(customer_id, original_hash))
        .await?;
    expect_events(
        "confirm with superseded hash",
        &result,
        &["CustomerEmailAddressConfirmationFailed"],
    )?;

    let result = service
        .confirm_email_address(ConfirmCustomerEmailAddress::new(customer_id, new_hash))
        .await?;
    expect_events(
        "confirm with new hash",
        &result,
        &["CustomerEmailAddressConfirmed"],
    )?;

    Ok(result.aggregate)
}
