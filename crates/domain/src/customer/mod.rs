//! Customer aggregate and related types.

mod aggregate;
mod commands;
mod events;
mod service;
mod value_objects;

pub use aggregate::Customer;
pub use commands::*;
pub use events::{
    CustomerEmailAddressChangedData, CustomerEmailAddressConfirmationFailedData,
    CustomerEmailAddressConfirmedData, CustomerEvent, CustomerRegisteredData,
};
pub use service::CustomerService;
pub use value_objects::{ConfirmationHash, CustomerId, EmailAddress, PersonName};

use thiserror::Error;

/// Errors raised while building customer commands and values, or when a
/// command is handed to the wrong customer.
///
/// A wrong confirmation hash or an unchanged email address is not an error:
/// those outcomes are recorded as events or ignored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CustomerError {
    /// A required input was empty.
    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    /// The input is not a syntactically valid email address.
    #[error("Invalid email address format: {input:?}")]
    InvalidEmailFormat { input: String },

    /// The input is not a valid customer id.
    #[error("Invalid customer id: {input:?}")]
    InvalidCustomerId { input: String },

    /// The command addresses a different customer than the one it was given to.
    #[error("Command for customer {command_customer_id} handed to customer {customer_id}")]
    CustomerIdMismatch {
        customer_id: CustomerId,
        command_customer_id: CustomerId,
    },
}
