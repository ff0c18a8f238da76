//! Car-show contest registration client
//!
//! Collects contact and vehicle details, validates them, and POSTs the
//! registration as JSON to the contest backend.

pub mod cli;
pub mod client;
pub mod config;
pub mod form;
pub mod models;
pub mod registration_tui;
pub mod validation;

pub use client::{HttpRegistrationClient, RegistrationError, RegistrationSink, SubmitResponse};
pub use config::Config;
pub use form::{submit, FormEvent, FormState, SubmitOutcome};
pub use models::{Field, RegistrationSubmission};
pub use validation::validate_email;
