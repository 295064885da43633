use std::sync::Arc;
use tokio::sync::Semaphore;

/// Caps the number of in-flight HTTP requests within a fetch batch.
///
/// Every URL in a batch is submitted at once; permits decide how many are
/// actually on the wire at any moment.
pub struct RateLimiter {
    semaphore: Arc<Semaphore>,
}

impl RateLimiter {
    /// # Arguments
    /// * `max_concurrent` - Maximum number of concurrent requests
    pub fn new(max_concurrent: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(max_concurrent)),
        }
    }

    /// Acquire permission to make a request.
    ///
    /// Returns a guard that releases the permit when dropped.
    pub async fn acquire(&self) -> RateLimitGuard {
        let permit = self.semaphore.clone().acquire_owned().await.unwrap();
        RateLimitGuard { _permit: permit }
    }

    /// Current headroom (for monitoring).
    pub fn available_permits(&self) -> usize {
        self.semaphore.available_permits()
    }
}

/// Guard that holds a permit; released automatically on drop.
pub struct RateLimitGuard {
    _permit: tokio::sync::OwnedSemaphorePermit,
}
