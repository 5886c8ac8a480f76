use reqwest::header::{CONTENT_TYPE, ORIGIN, REFERER, USER_AGENT};
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::config::RelayConfig;
use crate::error::{ConfigError, RelayError};
use crate::models::registration::RegistrationSubmission;

/// Client for the external form service
pub struct FormServiceClient {
    client: Client,
    config: RelayConfig,
}

impl FormServiceClient {
    pub fn new(config: RelayConfig) -> Result<Self, ConfigError> {
        let client = Client::builder().build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Post one submission to the form service. Sent exactly once; a
    /// non-2xx status is reported as an upstream failure.
    pub async fn submit(&self, submission: &RegistrationSubmission) -> Result<(), RelayError> {
        let pairs = self.config.mapping.encode(submission);

        info!("Forwarding registration to form service");
        debug!("Form URL: {}, {} fields", self.config.form_url, pairs.len());

        let res = self
            .client
            .post(&self.config.form_url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header(ORIGIN, &self.config.origin)
            .header(REFERER, &self.config.referer)
            .header(USER_AGENT, &self.config.user_agent)
            .form(&pairs)
            .send()
            .await?;

        let status = res.status();
        info!("Form service responded with status: {}", status);

        if !status.is_success() {
            warn!("Form service rejected the submission");
            return Err(RelayError::UpstreamStatus(status));
        }

        Ok(())
    }
}
