use super::transport::{HttpTransport, RawResponse, Transport};
use crate::sdk::config::{AccessToken, PrecomputeConfig, Profile};
use crate::sdk::error::PrecomputeError;
use crate::sdk::isochrone::backoff::{AttemptClass, RetryPolicy};
use crate::sdk::isochrone::error::FetchError;
use crate::sdk::isochrone::key::format_coordinate;
use crate::sdk::isochrone::service::IsochroneProvider;
use crate::sdk::stops::Coord;
use crate::sdk::util::sleep::{thread_sleeper, SharedSleeper};
use serde_json::Value;

/// Isochrone client for a Mapbox-compatible HTTP endpoint, with retry and backoff.
pub struct RemoteIsochroneProvider<T: Transport = HttpTransport> {
    transport: T,
    token: AccessToken,
    base_url: String,
    policy: RetryPolicy,
    sleeper: SharedSleeper,
}

impl RemoteIsochroneProvider<HttpTransport> {
    pub fn from_config(config: &PrecomputeConfig) -> Result<Self, PrecomputeError> {
        let transport = HttpTransport::new(config.timeout)?;
        Ok(Self::new(
            transport,
            config.token.clone(),
            &config.base_url,
            config.retry,
            thread_sleeper(),
        ))
    }
}

impl<T: Transport> RemoteIsochroneProvider<T> {
    pub fn new(
        transport: T,
        token: AccessToken,
        base_url: &str,
        policy: RetryPolicy,
        sleeper: SharedSleeper,
    ) -> Self {
        Self {
            transport,
            token,
            base_url: base_url.trim_end_matches('/').to_string(),
            policy,
            sleeper,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn url_for(&self, coord: Coord, profile: Profile, minutes: u32) -> String {
        format!(
            "{}/{}/{},{}?contours_minutes={}&polygons=true&access_token={}",
            self.base_url,
            profile,
            format_coordinate(coord.0),
            format_coordinate(coord.1),
            minutes,
            self.token.expose()
        )
    }

    fn redact(&self, text: &str) -> String {
        let token = self.token.expose();
        if token.is_empty() {
            text.to_string()
        } else {
            text.replace(token, "***")
        }
    }

    fn decode(&self, url: &str, body: &str) -> Result<Value, FetchError> {
        serde_json::from_str(body).map_err(|e| {
            log::error!(
                "Failed to parse isochrone response. URL: {}\nError: {}. Body: {}",
                self.redact(url),
                e,
                body
            );
            FetchError::Decode(e)
        })
    }
}

impl<T: Transport> IsochroneProvider for RemoteIsochroneProvider<T> {
    fn fetch(&self, coord: Coord, profile: Profile, minutes: u32) -> Result<Value, FetchError> {
        let url = self.url_for(coord, profile, minutes);
        let mut backoff = self.policy.backoff();

        for attempt in 0..self.policy.max_attempts {
            log::debug!(
                "[PROVIDER] GET {} (attempt {})",
                self.redact(&url),
                attempt + 1
            );

            let class = match self.transport.get(&url) {
                Ok(RawResponse { status, body }) => match AttemptClass::from_status(status) {
                    AttemptClass::Success => return self.decode(&url, &body),
                    AttemptClass::Fatal => {
                        log::error!("Unexpected response {}: {}", status, body);
                        return Err(FetchError::from_status(status, body));
                    }
                    class => {
                        log::debug!("HTTP {} body: {}", status, body);
                        class
                    }
                },
                Err(e) => {
                    log::warn!(
                        "Request exception (attempt {}): {}",
                        attempt + 1,
                        self.redact(&e.to_string())
                    );
                    AttemptClass::TransportFailure
                }
            };

            if let Some(wait) = backoff.next_wait(attempt, class) {
                match class {
                    AttemptClass::RateLimited => log::warn!(
                        "Rate limited (429). Backing off {:.1}s (attempt {})",
                        wait.as_secs_f64(),
                        attempt + 1
                    ),
                    AttemptClass::ServerError => log::warn!(
                        "Server error. Waiting {:.1}s (attempt {})",
                        wait.as_secs_f64(),
                        attempt + 1
                    ),
                    _ => log::debug!("Retrying in {:.1}s", wait.as_secs_f64()),
                }
                self.sleeper.sleep(wait);
            }
        }

        log::warn!("Max retries reached for URL: {}", self.redact(&url));
        Err(FetchError::RetriesExhausted {
            attempts: self.policy.max_attempts,
        })
    }
}
