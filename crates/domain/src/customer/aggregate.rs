//! Customer aggregate implementation.

use common::AggregateId;
use event_store::Version;

use crate::aggregate::Aggregate;
use crate::error::HistoryError;
use crate::replay;

use super::{
    ChangeCustomerEmailAddress, ConfirmCustomerEmailAddress, ConfirmationHash, CustomerError,
    CustomerEvent, CustomerId, EmailAddress, PersonName, RegisterCustomer,
    events::{CustomerEmailAddressChangedData, CustomerRegisteredData},
};

/// Customer aggregate root.
///
/// State is derived entirely from events. Exactly one confirmation hash is
/// live at any time: the one issued with the latest registration or email
/// change. The email address counts as confirmed only after that hash was
/// presented, and changing the address resets confirmation.
///
/// Commands never fail on business grounds. A wrong hash is recorded as
/// `CustomerEmailAddressConfirmationFailed`; repeating a confirmation or
/// "changing" to the current address records nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    id: CustomerId,

    /// Number of events the state is derived from.
    version: Version,

    email_address: EmailAddress,

    /// Hash expected to confirm the current email address.
    confirmation_hash: ConfirmationHash,

    is_email_address_confirmed: bool,

    name: PersonName,

    /// Events produced by the latest command, replaced on every command.
    recorded_events: Vec<CustomerEvent>,
}

impl Aggregate for Customer {
    type Event = CustomerEvent;
    type Error = CustomerError;

    fn aggregate_type() -> &'static str {
        "Customer"
    }

    fn id(&self) -> AggregateId {
        self.id.into()
    }

    fn version(&self) -> Version {
        self.version
    }

    fn set_version(&mut self, version: Version) {
        self.version = version;
    }

    fn genesis(event: &Self::Event) -> Option<Self> {
        match event {
            CustomerEvent::CustomerRegistered(data) => Some(Self::from_registration(data.clone())),
            _ => None,
        }
    }

    fn apply(&mut self, event: Self::Event) {
        match event {
            CustomerEvent::CustomerRegistered(data) => self.apply_registered(data),
            CustomerEvent::CustomerEmailAddressConfirmed(_) => {
                self.is_email_address_confirmed = true;
            }
            CustomerEvent::CustomerEmailAddressConfirmationFailed(_) => {
                // Informational only
            }
            CustomerEvent::CustomerEmailAddressChanged(data) => {
                self.apply_email_address_changed(data)
            }
        }
    }

    fn recorded_events(&self) -> &[CustomerEvent] {
        &self.recorded_events
    }

    fn take_recorded_events(&mut self) -> Vec<CustomerEvent> {
        std::mem::take(&mut self.recorded_events)
    }
}

// Creation
impl Customer {
    /// Registers a new customer.
    ///
    /// The returned customer has recorded exactly one `CustomerRegistered`.
    pub fn register(command: RegisterCustomer) -> Self {
        let data = CustomerRegisteredData {
            customer_id: command.customer_id,
            email_address: command.email_address,
            confirmation_hash: command.confirmation_hash,
            name: command.name,
        };

        let mut customer = Self::from_registration(data.clone());
        customer.version = Version::first();
        customer
            .recorded_events
            .push(CustomerEvent::CustomerRegistered(data));

        tracing::debug!(customer_id = %customer.id, "customer registered");
        customer
    }

    /// Rebuilds a customer from its history.
    ///
    /// The history must start with `CustomerRegistered`.
    pub fn reconstitute(
        events: impl IntoIterator<Item = CustomerEvent>,
    ) -> Result<Self, HistoryError> {
        replay::reconstitute(events)
    }
}

// Query methods
impl Customer {
    pub fn customer_id(&self) -> CustomerId {
        self.id
    }

    pub fn email_address(&self) -> &EmailAddress {
        &self.email_address
    }

    pub fn confirmation_hash(&self) -> &ConfirmationHash {
        &self.confirmation_hash
    }

    pub fn is_email_address_confirmed(&self) -> bool {
        self.is_email_address_confirmed
    }

    pub fn name(&self) -> &PersonName {
        &self.name
    }
}

// Command methods (record events)
impl Customer {
    /// Confirms the email address with the presented hash.
    ///
    /// Records nothing if the address is already confirmed, whatever the
    /// hash. Otherwise records `CustomerEmailAddressConfirmationFailed` for a
    /// hash other than the live one and `CustomerEmailAddressConfirmed` for
    /// the live one.
    pub fn confirm_email_address(
        &mut self,
        command: ConfirmCustomerEmailAddress,
    ) -> Result<(), CustomerError> {
        self.start_command(command.customer_id)?;

        if self.is_email_address_confirmed {
            tracing::debug!(customer_id = %self.id, "email address already confirmed");
            return Ok(());
        }

        if command.confirmation_hash != self.confirmation_hash {
            tracing::info!(customer_id = %self.id, "email address confirmation failed");
            self.record_that(CustomerEvent::email_address_confirmation_failed(self.id));
            return Ok(());
        }

        self.record_that(CustomerEvent::email_address_confirmed(self.id));
        Ok(())
    }

    /// Changes the email address.
    ///
    /// Records nothing if the address is unchanged. Otherwise records
    /// `CustomerEmailAddressChanged` with a freshly generated hash, which
    /// makes every previously issued hash stale.
    pub fn change_email_address(
        &mut self,
        command: ChangeCustomerEmailAddress,
    ) -> Result<(), CustomerError> {
        self.start_command(command.customer_id)?;

        if command.email_address == self.email_address {
            tracing::debug!(customer_id = %self.id, "email address unchanged");
            return Ok(());
        }

        self.record_that(CustomerEvent::email_address_changed(
            self.id,
            command.email_address,
            ConfirmationHash::generate(),
        ));
        Ok(())
    }

    fn start_command(&mut self, command_customer_id: CustomerId) -> Result<(), CustomerError> {
        self.recorded_events.clear();

        if command_customer_id != self.id {
            return Err(CustomerError::CustomerIdMismatch {
                customer_id: self.id,
                command_customer_id,
            });
        }
        Ok(())
    }

    fn record_that(&mut self, event: CustomerEvent) {
        self.apply(event.clone());
        self.version = self.version.next();
        self.recorded_events.push(event);
    }
}

// Apply event helpers
impl Customer {
    fn from_registration(data: CustomerRegisteredData) -> Self {
        Self {
            id: data.customer_id,
            version: Version::initial(),
            email_address: data.email_address,
            confirmation_hash: data.confirmation_hash,
            is_email_address_confirmed: false,
            name: data.name,
            recorded_events: Vec::new(),
        }
    }

    fn apply_registered(&mut self, data: CustomerRegisteredData) {
        self.id = data.customer_id;
        self.email_address = data.email_address;
        self.confirmation_hash = data.confirmation_hash;
        self.is_email_address_confirmed = false;
        self.name = data.name;
    }

    fn apply_email_address_changed(&mut self, data: CustomerEmailAddressChangedData) {
        self.email_address = data.email_address;
        self.confirmation_hash = data.confirmation_hash;
        self.is_email_address_confirmed = false;
    }
}
