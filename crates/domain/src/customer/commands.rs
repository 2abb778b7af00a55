//! Customer commands.
//!
//! Commands are built from raw inputs with `build`, which validates every
//! field before the aggregate sees the command.

use common::AggregateId;

use crate::command::Command;

use super::{ConfirmationHash, Customer, CustomerError, CustomerId, EmailAddress, PersonName};

/// Command to register a new customer.
///
/// Building it issues the new customer's id and first confirmation hash.
#[derive(Debug, Clone)]
pub struct RegisterCustomer {
    pub customer_id: CustomerId,
    pub email_address: EmailAddress,
    pub confirmation_hash: ConfirmationHash,
    pub name: PersonName,
}

impl RegisterCustomer {
    pub fn build(
        email_address: &str,
        given_name: &str,
        family_name: &str,
    ) -> Result<Self, CustomerError> {
        Ok(Self {
            customer_id: CustomerId::generate(),
            email_address: EmailAddress::build(email_address)?,
            confirmation_hash: ConfirmationHash::generate(),
            name: PersonName::build(given_name, family_name)?,
        })
    }
}

impl Command for RegisterCustomer {
    type Aggregate = Customer;

    fn aggregate_id(&self) -> AggregateId {
        self.customer_id.into()
    }
}

/// Command to confirm a customer's email address with a confirmation hash.
#[derive(Debug, Clone)]
pub struct ConfirmCustomerEmailAddress {
    pub customer_id: CustomerId,
    pub confirmation_hash: ConfirmationHash,
}

impl ConfirmCustomerEmailAddress {
    pub fn new(customer_id: CustomerId, confirmation_hash: ConfirmationHash) -> Self {
        Self {
            customer_id,
            confirmation_hash,
        }
    }

    pub fn build(customer_id: &str, confirmation_hash: &str) -> Result<Self, CustomerError> {
        Ok(Self {
            customer_id: CustomerId::parse(customer_id)?,
            confirmation_hash: ConfirmationHash::parse(confirmation_hash)?,
        })
    }
}

impl Command for ConfirmCustomerEmailAddress {
    type Aggregate = Customer;

    fn aggregate_id(&self) -> AggregateId {
        self.customer_id.into()
    }
}

/// Command to change a customer's email address.
#[derive(Debug, Clone)]
pub struct ChangeCustomerEmailAddress {
    pub customer_id: CustomerId,
    pub email_address: EmailAddress,
}

impl ChangeCustomerEmailAddress {
    pub fn new(customer_id: CustomerId, email_address: EmailAddress) -> Self {
        Self {
            customer_id,
            email_address,
        }
    }

    pub fn build(customer_id: &str, email_address: &str) -> Result<Self, CustomerError> {
        Ok(Self {
            customer_id: CustomerId::parse(customer_id)?,
            email_address: EmailAddress::build(email_address)?,
        })
    }
}

impl Command for ChangeCustomerEmailAddress {
    type Aggregate = Customer;

    fn aggregate_id(&self) -> AggregateId {
        self.customer_id.into()
    }
}
