use std::sync::Arc;
use std::time::Duration;

/// Blocking pause used for retry backoff and for pacing between requests.
pub trait Sleeper: Send + Sync {
    fn sleep(&self, duration: Duration);
}

pub type SharedSleeper = Arc<dyn Sleeper>;

#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

pub fn thread_sleeper() -> SharedSleeper {
    Arc::new(ThreadSleeper)
}
