//! Customer domain events.

use serde::{Deserialize, Serialize};

use crate::aggregate::DomainEvent;

use super::{ConfirmationHash, CustomerId, EmailAddress, PersonName};

/// Events that can occur on a customer aggregate.
///
/// Each variant is tagged with the customer it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum CustomerEvent {
    /// Customer was registered. Always the first event of a customer's history.
    CustomerRegistered(CustomerRegisteredData),

    /// The pending confirmation hash was presented and matched.
    CustomerEmailAddressConfirmed(CustomerEmailAddressConfirmedData),

    /// A confirmation attempt was rejected.
    CustomerEmailAddressConfirmationFailed(CustomerEmailAddressConfirmationFailedData),

    /// Email address was replaced and a new confirmation is pending.
    CustomerEmailAddressChanged(CustomerEmailAddressChangedData),
}

impl DomainEvent for CustomerEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CustomerEvent::CustomerRegistered(_) => "CustomerRegistered",
            CustomerEvent::CustomerEmailAddressConfirmed(_) => "CustomerEmailAddressConfirmed",
            CustomerEvent::CustomerEmailAddressConfirmationFailed(_) => {
                "CustomerEmailAddressConfirmationFailed"
            }
            CustomerEvent::CustomerEmailAddressChanged(_) => "CustomerEmailAddressChanged",
        }
    }
}

/// Data for CustomerRegistered event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRegisteredData {
    pub customer_id: CustomerId,
    pub email_address: EmailAddress,

    /// Hash that confirms `email_address`.
    pub confirmation_hash: ConfirmationHash,

    pub name: PersonName,
}

/// Data for CustomerEmailAddressConfirmed event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerEmailAddressConfirmedData {
    pub customer_id: CustomerId,
}

/// Data for CustomerEmailAddressConfirmationFailed event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerEmailAddressConfirmationFailedData {
    pub customer_id: CustomerId,
}

/// Data for CustomerEmailAddressChanged event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerEmailAddressChangedData {
    pub customer_id: CustomerId,

    /// The new address.
    pub email_address: EmailAddress,

    /// Hash that confirms the new address. Supersedes every earlier hash.
    pub confirmation_hash: ConfirmationHash,
}

// Convenience constructors for events
impl CustomerEvent {
    pub fn customer_registered(
        customer_id: CustomerId,
        email_address: EmailAddress,
        confirmation_hash: ConfirmationHash,
        name: PersonName,
    ) -> Self {
        CustomerEvent::CustomerRegistered(CustomerRegisteredData {
            customer_id,
            email_address,
            confirmation_hash,
            name,
        })
    }

    pub fn email_address_confirmed(customer_id: CustomerId) -> Self {
        CustomerEvent::CustomerEmailAddressConfirmed(CustomerEmailAddressConfirmedData {
            customer_id,
        })
    }

    pub fn email_address_confirmation_failed(customer_id: CustomerId) -> Self {
        CustomerEvent::CustomerEmailAddressConfirmationFailed(
            CustomerEmailAddressConfirmationFailedData { customer_id },
        )
    }

    pub fn email_address_changed(
        customer_id: CustomerId,
        email_address: EmailAddress,
        confirmation_hash: ConfirmationHash,
    ) -> Self {
        CustomerEvent::CustomerEmailAddressChanged(CustomerEmailAddressChangedData {
            customer_id,
            email_address,
            confirmation_hash,
        })
    }

    /// The customer this event belongs to.
    pub fn customer_id(&self) -> CustomerId {
        match self {
            CustomerEvent::CustomerRegistered(data) => data.customer_id,
            CustomerEvent::CustomerEmailAddressConfirmed(data) => data.customer_id,
            CustomerEvent::CustomerEmailAddressConfirmationFailed(data) => data.customer_id,
            CustomerEvent::CustomerEmailAddressChanged(data) => data.customer_id,
        }
    }
}
