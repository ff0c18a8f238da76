//! reqwest-backed registration client

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};
use tracing::{debug, info};

use super::{RegistrationError, RegistrationSink, SubmitResponse};
use crate::config::Config;
use crate::models::RegistrationSubmission;

/// POSTs registrations as JSON to a fixed endpoint
#[derive(Debug, Clone)]
pub struct HttpRegistrationClient {
    client: Client,
    endpoint: Url,
}

impl HttpRegistrationClient {
    /// Build a client from configuration
    pub fn new(config: &Config) -> Result<Self, RegistrationError> {
        let endpoint = Url::parse(&config.endpoint)
            .map_err(|_| RegistrationError::InvalidEndpoint(config.endpoint.clone()))?;

        let mut builder = Client::builder().user_agent(&config.http.user_agent);
        if let Some(timeout) = config.http_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint,
        })
    }

    /// Wrap an already configured reqwest client
    pub fn with_client(client: Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl RegistrationSink for HttpRegistrationClient {
    async fn send(
        &self,
        submission: &RegistrationSubmission,
    ) -> Result<SubmitResponse, RegistrationError> {
        debug!("POST {} for {}", self.endpoint, submission.email);

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .json(submission)
            .send()
            .await?;

        let status = response.status();
        info!("Registration endpoint answered {}", status);

        Ok(SubmitResponse::new(status.as_u16()))
    }
}
