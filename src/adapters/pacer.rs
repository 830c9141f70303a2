use crate::domain::ports::Pacer;
use async_trait::async_trait;
use std::time::Duration;

/// Sleeps on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioPacer;

#[async_trait]
impl Pacer for TokioPacer {
    async fn pause(&self, delay: Duration) {
        if delay.is_zero() {
            return;
        }
        tracing::debug!("Waiting {:?} before the next row", delay);
        tokio::time::sleep(delay).await;
    }
}
