use crate::config::FallbackConfig;
use crate::providers::ChatProvider;
use crate::CookAlongError;
use async_trait::async_trait;
use log::{debug, info, warn};
use std::time::Duration;
use tokio::time::sleep;

/// Retries transport failures of the wrapped provider with linear backoff
pub struct RetryProvider {
    inner: Box<dyn ChatProvider>,
    retry_attempts: u32,
    retry_delay_ms: u64,
}

impl RetryProvider {
    pub fn new(inner: Box<dyn ChatProvider>, config: &FallbackConfig) -> Self {
        RetryProvider {
            inner,
            retry_attempts: config.retry_attempts.max(1),
            retry_delay_ms: config.retry_delay_ms,
        }
    }
}

#[async_trait]
impl ChatProvider for RetryProvider {
    fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }

    async fn complete(&self, prompt: &str) -> Result<String, CookAlongError> {
        let mut attempt = 1;
        loop {
            debug!(
                "Requesting completion from {} (attempt {}/{})",
                self.inner.provider_name(),
                attempt,
                self.retry_attempts
            );

            match self.inner.complete(prompt).await {
                Ok(result) => {
                    if attempt > 1 {
                        info!(
                            "Provider {} succeeded on attempt {}",
                            self.inner.provider_name(),
                            attempt
                        );
                    }
                    return Ok(result);
                }
                Err(e) if attempt < self.retry_attempts && e.is_transport() => {
                    warn!(
                        "Provider {} failed (attempt {}/{}): {}",
                        self.inner.provider_name(),
                        attempt,
                        self.retry_attempts,
                        e
                    );
                    let delay = Duration::from_millis(self.retry_delay_ms * attempt as u64);
                    debug!("Waiting {:?} before retry", delay);
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
