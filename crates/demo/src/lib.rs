//! Customer email confirmation walkthrough.
//!
//! Drives `CustomerService` through the registration, confirmation and
//! email change flows and checks each step's recorded events.

pub mod config;
pub mod error;
pub mod scenario;

pub use config::{Config, LogFormat};
pub use error::DemoError;
pub use scenario::{run_change_then_confirm, run_confirmation};
