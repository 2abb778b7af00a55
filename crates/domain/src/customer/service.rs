//! Customer service providing one unit of work per command.

use event_store::EventStore;

use crate::command::{CommandHandler, CommandResult};
use crate::error::DomainError;

use super::{
    ChangeCustomerEmailAddress, ConfirmCustomerEmailAddress, Customer, CustomerId,
    RegisterCustomer,
};

/// Service for managing customers.
///
/// Every call replays the customer from the store, runs a single command
/// and appends what it recorded. Callers must not run two commands for the
/// same customer concurrently; if they do, the second append fails with a
/// concurrency conflict.
pub struct CustomerService<S: EventStore> {
    handler: CommandHandler<S, Customer>,
}

impl<S: EventStore> CustomerService<S> {
    /// Creates a new customer service with the given event store.
    pub fn new(store: S) -> Self {
        Self {
            handler: CommandHandler::new(store),
        }
    }

    /// Returns a reference to the underlying command handler.
    pub fn handler(&self) -> &CommandHandler<S, Customer> {
        &self.handler
    }

    /// Registers a new customer.
    #[tracing::instrument(skip(self))]
    pub async fn register(
        &self,
        cmd: RegisterCustomer,
    ) -> Result<CommandResult<Customer>, DomainError> {
        metrics::counter!("customer_commands_total", "command" => "RegisterCustomer").increment(1);

        self.handler.create(Customer::register(cmd)).await
    }

    /// Confirms a customer's email address.
    #[tracing::instrument(skip(self))]
    pub async fn confirm_email_address(
        &self,
        cmd: ConfirmCustomerEmailAddress,
    ) -> Result<CommandResult<Customer>, DomainError> {
        metrics::counter!("customer_commands_total", "command" => "ConfirmCustomerEmailAddress")
            .increment(1);
        let customer_id = cmd.customer_id;

        self.handler
            .execute(customer_id.into(), |customer| {
                customer.confirm_email_address(cmd)
            })
            .await
    }

    /// Changes a customer's email address.
    #[tracing::instrument(skip(self))]
    pub async fn change_email_address(
        &self,
        cmd: ChangeCustomerEmailAddress,
    ) -> Result<CommandResult<Customer>, DomainError> {
        metrics::counter!("customer_commands_total", "command" => "ChangeCustomerEmailAddress")
            .increment(1);
        let customer_id = cmd.customer_id;

        self.handler
            .execute(customer_id.into(), |customer| {
                customer.change_email_address(cmd)
            })
            .await
    }

    /// Loads a customer by ID.
    ///
    /// Returns None if the customer doesn't exist.
    #[tracing::instrument(skip(self))]
    pub async fn get_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Option<Customer>, DomainError> {
        self.handler.load(customer_id.into()).await
    }
}
