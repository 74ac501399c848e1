use super::error::PrecomputeError;
use super::isochrone::backoff::RetryPolicy;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const TOKEN_ENV_VAR: &str = "MAPBOX_ACCESS_TOKEN";
pub const DEFAULT_BASE_URL: &str = "https://api.mapbox.com/isochrone/v1/mapbox";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Travel mode understood by the isochrone service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Profile {
    Walking,
    Cycling,
    Driving,
}

impl Profile {
    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Walking => "walking",
            Profile::Cycling => "cycling",
            Profile::Driving => "driving",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Service credential. Never printed in full.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// Picks the command-line token first, then the environment value. Blank values count as absent.
pub fn resolve_token(
    flag: Option<String>,
    env_value: Option<String>,
) -> Result<AccessToken, PrecomputeError> {
    flag.into_iter()
        .chain(env_value)
        .map(|t| t.trim().to_string())
        .find(|t| !t.is_empty())
        .map(AccessToken)
        .ok_or(PrecomputeError::MissingToken)
}

#[derive(Debug, Clone)]
pub struct PrecomputeConfig {
    pub token: AccessToken,
    pub stops_dir: PathBuf,
    pub out_dir: PathBuf,
    pub profile: Profile,
    pub minutes: u32,
    /// Pause after every fresh fetch. Cache hits are not delayed.
    pub delay: Duration,
    pub force: bool,
    /// Requests are always sequential; the flag is only acknowledged.
    pub sequential: bool,
    pub base_url: String,
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl PrecomputeConfig {
    pub fn new(
        token: AccessToken,
        stops_dir: impl Into<PathBuf>,
        out_dir: impl Into<PathBuf>,
        profile: Profile,
        minutes: u32,
    ) -> Self {
        Self {
            token,
            stops_dir: stops_dir.into(),
            out_dir: out_dir.into(),
            profile,
            minutes,
            delay: Duration::from_millis(350),
            force: false,
            sequential: false,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
        }
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.out_dir.join("cache")
    }

    pub fn output_path(&self) -> PathBuf {
        output_path(&self.out_dir, self.profile, self.minutes)
    }
}

pub fn output_path(out_dir: &Path, profile: Profile, minutes: u32) -> PathBuf {
    out_dir.join(format!("isochrones_{}_{}.geojson", profile, minutes))
}
