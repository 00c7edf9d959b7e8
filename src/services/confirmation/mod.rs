pub mod http;
pub mod local;

use async_trait::async_trait;

use crate::models::{ConfirmationAck, ConfirmationRequest};

/// Confirms and charges a booking. Any error is treated as retryable by the
/// submission process.
#[async_trait]
pub trait ConfirmationCollaborator: Send + Sync {
    async fn submit(&self, request: &ConfirmationRequest) -> anyhow::Result<ConfirmationAck>;
}
