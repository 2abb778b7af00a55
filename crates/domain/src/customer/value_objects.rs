//! Value objects for the customer domain.

use std::sync::LazyLock;

use common::AggregateId;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::CustomerError;

/// Unique identifier for a customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(Uuid);

impl CustomerId {
    /// Generates a new random customer ID.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses a customer ID from its string form.
    pub fn parse(raw: &str) -> Result<Self, CustomerError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(CustomerError::MissingField {
                field: "customer_id",
            });
        }

        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| CustomerError::InvalidCustomerId {
                input: raw.to_string(),
            })
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<CustomerId> for AggregateId {
    fn from(id: CustomerId) -> Self {
        AggregateId::from_uuid(id.0)
    }
}

impl From<AggregateId> for CustomerId {
    fn from(id: AggregateId) -> Self {
        Self(id.as_uuid())
    }
}

/// Single-use token proving control of an email address.
///
/// A new hash is issued on registration and on every email change; only the
/// latest one can confirm the customer's current address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ConfirmationHash(String);

impl ConfirmationHash {
    /// Generates a fresh random hash (122 random bits, hex encoded).
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Wraps a hash received from outside, e.g. from a confirmation link.
    pub fn parse(raw: &str) -> Result<Self, CustomerError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(CustomerError::MissingField {
                field: "confirmation_hash",
            });
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ConfirmationHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ConfirmationHash {
    type Error = CustomerError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw)
    }
}

impl From<ConfirmationHash> for String {
    fn from(hash: ConfirmationHash) -> Self {
        hash.0
    }
}

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@.]+$").expect("email pattern is a valid regex")
});

/// A syntactically valid email address, stored lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validates and normalizes a raw email address.
    pub fn build(raw: &str) -> Result<Self, CustomerError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CustomerError::MissingField {
                field: "email_address",
            });
        }
        if !EMAIL_PATTERN.is_match(trimmed) {
            return Err(CustomerError::InvalidEmailFormat {
                input: raw.to_string(),
            });
        }

        Ok(Self(trimmed.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = CustomerError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::build(&raw)
    }
}

impl From<EmailAddress> for String {
    fn from(email: EmailAddress) -> Self {
        email.0
    }
}

/// A person's given and family name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PersonName {
    given_name: String,
    family_name: String,
}

impl PersonName {
    /// Builds a name; both parts must be non-blank.
    pub fn build(given_name: &str, family_name: &str) -> Result<Self, CustomerError> {
        let given_name = given_name.trim();
        if given_name.is_empty() {
            return Err(CustomerError::MissingField { field: "given_name" });
        }
        let family_name = family_name.trim();
        if family_name.is_empty() {
            return Err(CustomerError::MissingField {
                field: "family_name",
            });
        }

        Ok(Self {
            given_name: given_name.to_string(),
            family_name: family_name.to_string(),
        })
    }

    pub fn given_name(&self) -> &str {
        &self.given_name
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    /// Returns `"Given Family"`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.given_name, self.family_name)
    }
}

impl std::fmt::Display for PersonName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.given_name, self.family_name)
    }
}
