//! Registration transport error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistrationError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid registration endpoint '{0}'")]
    InvalidEndpoint(String),

    #[error("Transport error: {0}")]
    Transport(String),
}
