use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;

use super::ConfirmationCollaborator;
use crate::models::{ConfirmationAck, ConfirmationRequest};

/// Posts the request as JSON to a remote payment/confirmation endpoint.
pub struct HttpConfirmationGateway {
    url: String,
    token: String,
    client: reqwest::Client,
}

impl HttpConfirmationGateway {
    pub fn new(url: String, token: String, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build confirmation HTTP client")?;
        Ok(Self { url, token, client })
    }
}

#[async_trait]
impl ConfirmationCollaborator for HttpConfirmationGateway {
    async fn submit(&self, request: &ConfirmationRequest) -> anyhow::Result<ConfirmationAck> {
        let mut req = self.client.post(&self.url).json(request);
        if !self.token.is_empty() {
            req = req.bearer_auth(&self.token);
        }

        let resp = req
            .send()
            .await
            .context("failed to reach confirmation service")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("confirmation service error ({status}): {body}");
        }

        let text = resp
            .text()
            .await
            .context("failed to read confirmation response")?;
        if text.trim().is_empty() {
            return Ok(ConfirmationAck::default());
        }
        serde_json::from_str(&text).context("failed to parse confirmation response")
    }
}
