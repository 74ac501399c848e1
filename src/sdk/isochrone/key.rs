use crate::sdk::config::Profile;
use crate::sdk::stops::Coord;
use std::fmt;

/// Filesystem-safe identifier of one isochrone request.
///
/// Built as `{lon}_{lat}_{profile}_{minutes}` with `.` mapped to `_` and `-` to `m`.
/// Every coordinate is rendered with exactly one decimal point, so each one expands
/// to two `_`-separated parts and distinct requests cannot produce the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn new(coord: Coord, profile: Profile, minutes: u32) -> Self {
        let raw = format!(
            "{}_{}_{}_{}",
            format_coordinate(coord.0),
            format_coordinate(coord.1),
            profile,
            minutes
        );
        CacheKey(raw.replace('.', "_").replace('-', "m"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn file_name(&self) -> String {
        format!("{}.json", self.0)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shortest round-trip decimal, with `.0` appended to integral values (`47` -> `47.0`).
pub fn format_coordinate(value: f64) -> String {
    let text = value.to_string();
    if value.is_finite() && !text.contains('.') {
        format!("{}.0", text)
    } else {
        text
    }
}
