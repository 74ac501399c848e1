use super::error::FetchError;
use crate::sdk::config::Profile;
use crate::sdk::stops::Coord;
use serde_json::Value;

pub trait IsochroneProvider {
    /// Fetches the raw isochrone response for one origin.
    fn fetch(&self, coord: Coord, profile: Profile, minutes: u32) -> Result<Value, FetchError>;
}
