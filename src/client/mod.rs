//! Registration transport
//!
//! The form controller talks to the backend through [`RegistrationSink`], so
//! submissions can be driven by the reqwest client in production and by a
//! recording mock in tests.

pub mod errors;
pub mod http;

pub use errors::RegistrationError;
pub use http::HttpRegistrationClient;

use async_trait::async_trait;

use crate::models::RegistrationSubmission;

/// What came back from the endpoint. Only the status category is inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitResponse {
    pub status: u16,
}

impl SubmitResponse {
    pub fn new(status: u16) -> Self {
        Self { status }
    }

    /// 2xx statuses count as success
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Destination for validated registrations
#[async_trait]
pub trait RegistrationSink: Send + Sync {
    /// Deliver one submission. `Err` means the request could not be completed.
    async fn send(
        &self,
        submission: &RegistrationSubmission,
    ) -> Result<SubmitResponse, RegistrationError>;
}
