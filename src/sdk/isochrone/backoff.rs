use std::time::Duration;

/// Bounds for retrying a single isochrone request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
    /// Extra wait per attempt index after a 429, to spread out repeated collisions.
    pub rate_limit_step: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 6,
            initial_backoff: Duration::from_secs(1),
            max_backoff: Duration::from_secs(60),
            rate_limit_step: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn backoff(&self) -> Backoff {
        Backoff {
            policy: *self,
            current: self.initial_backoff,
        }
    }
}

/// How one attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptClass {
    Success,
    TransportFailure,
    RateLimited,
    ServerError,
    Fatal,
}

impl AttemptClass {
    pub fn from_status(status: u16) -> Self {
        match status {
            200 => AttemptClass::Success,
            429 => AttemptClass::RateLimited,
            500..=599 => AttemptClass::ServerError,
            _ => AttemptClass::Fatal,
        }
    }
}

/// Per-call backoff state. A fresh one starts at `initial_backoff`.
#[derive(Debug, Clone)]
pub struct Backoff {
    policy: RetryPolicy,
    current: Duration,
}

impl Backoff {
    /// Wait to apply after a retryable failure of attempt `attempt` (zero-based), or
    /// `None` when the outcome is terminal. Advances the doubling state.
    pub fn next_wait(&mut self, attempt: u32, class: AttemptClass) -> Option<Duration> {
        let wait = match class {
            AttemptClass::Success | AttemptClass::Fatal => return None,
            AttemptClass::TransportFailure | AttemptClass::ServerError => self.current,
            AttemptClass::RateLimited => {
                (self.current + self.policy.rate_limit_step * attempt).min(self.policy.max_backoff)
            }
        };
        self.current = (self.current * 2).min(self.policy.max_backoff);
        Some(wait)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    #[test]
    fn classifies_status_codes() {
        assert_eq!(AttemptClass::from_status(200), AttemptClass::Success);
        assert_eq!(AttemptClass::from_status(429), AttemptClass::RateLimited);
        assert_eq!(AttemptClass::from_status(503), AttemptClass::ServerError);
        assert_eq!(AttemptClass::from_status(204), AttemptClass::Fatal);
        assert_eq!(AttemptClass::from_status(401), AttemptClass::Fatal);
    }

    #[test]
    fn rate_limit_adds_linear_term() {
        let mut backoff = RetryPolicy::default().backoff();
        assert_eq!(backoff.next_wait(0, AttemptClass::RateLimited), Some(secs(1.0)));
        assert_eq!(backoff.next_wait(1, AttemptClass::RateLimited), Some(secs(2.5)));
        assert_eq!(backoff.next_wait(2, AttemptClass::ServerError), Some(secs(4.0)));
        assert_eq!(backoff.next_wait(3, AttemptClass::TransportFailure), Some(secs(8.0)));
        assert_eq!(backoff.next_wait(4, AttemptClass::ServerError), Some(secs(16.0)));
    }

    #[test]
    fn waits_never_exceed_cap() {
        let policy = RetryPolicy::default().with_max_attempts(20);
        let mut backoff = policy.backoff();
        let mut previous = Duration::ZERO;
        for attempt in 0..policy.max_attempts {
            let class = if attempt % 2 == 0 {
                AttemptClass::RateLimited
            } else {
                AttemptClass::ServerError
            };
            let wait = backoff.next_wait(attempt, class).unwrap();
            assert!(wait <= policy.max_backoff);
            assert!(wait >= previous);
            previous = wait;
        }
        assert_eq!(previous, policy.max_backoff);
    }

    #[test]
    fn terminal_outcomes_do_not_wait() {
        let mut backoff = RetryPolicy::default().backoff();
        assert_eq!(backoff.next_wait(0, AttemptClass::Success), None);
        assert_eq!(backoff.next_wait(0, AttemptClass::Fatal), None);
        assert_eq!(backoff.next_wait(0, AttemptClass::ServerError), Some(secs(1.0)));
    }
}
