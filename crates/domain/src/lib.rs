//! Domain layer for the customer event-sourcing system.
//!
//! This crate provides:
//! - `Aggregate` and `DomainEvent` traits for event-sourced entities
//! - the replayer that rebuilds an aggregate from its history
//! - `CommandHandler` for the load, decide, append cycle
//! - the `Customer` aggregate with email confirmation rules

pub mod aggregate;
pub mod command;
pub mod customer;
pub mod error;
pub mod replay;

pub use aggregate::{Aggregate, DomainEvent};
pub use command::{Command, CommandHandler, CommandResult};
pub use customer::{
    ChangeCustomerEmailAddress, ConfirmCustomerEmailAddress, ConfirmationHash, Customer,
    CustomerError, CustomerEvent, CustomerId, CustomerService, EmailAddress, PersonName,
    RegisterCustomer,
};
pub use error::{DomainError, HistoryError};
pub use replay::{reconstitute, reconstitute_from_envelopes};
