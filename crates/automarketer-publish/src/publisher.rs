//! The publish interface.

use crate::error::PublishResult;
use crate::types::{PublishReceipt, PublishRequest};
use async_trait::async_trait;
use automarketer_core::Platform;

/// Delivers finished content to an external service.
///
/// Implementations report failure through [`PublishError`](crate::PublishError);
/// they never panic on a transport or API problem.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Service name for logs and receipts.
    fn name(&self) -> &'static str;

    fn supports(&self, platform: &Platform) -> bool;

    async fn publish(&self, request: &PublishRequest) -> PublishResult<PublishReceipt>;
}
