use super::aggregate::{select_feature, IsochroneCollection};
use super::config::PrecomputeConfig;
use super::error::PrecomputeError;
use super::isochrone::cache::is_empty_payload;
use super::isochrone::{CacheKey, IsochroneProvider, ResponseStore};
use super::stops::{load_stops, StopDescriptor};
use super::util::sleep::Sleeper;
use indicatif::ProgressBar;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

/// Counters for one run. `skipped` covers fetch failures and unusable responses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub stops: usize,
    pub fetched: usize,
    pub cache_hits: usize,
    pub skipped: usize,
    pub written: usize,
    pub output: PathBuf,
}

/// Loads stops, resolves one isochrone per stop through `cache` and `provider`,
/// and writes the combined collection to `config.output_path()`.
pub fn run<P, S>(
    config: &PrecomputeConfig,
    provider: &P,
    cache: &S,
    sleeper: &dyn Sleeper,
) -> Result<RunSummary, PrecomputeError>
where
    P: IsochroneProvider + ?Sized,
    S: ResponseStore + ?Sized,
{
    run_with_progress(config, provider, cache, sleeper, &ProgressBar::hidden())
}

/// Same as [`run`], advancing `progress` by one per stop. Its length is set once the stops are loaded.
pub fn run_with_progress<P, S>(
    config: &PrecomputeConfig,
    provider: &P,
    cache: &S,
    sleeper: &dyn Sleeper,
    progress: &ProgressBar,
) -> Result<RunSummary, PrecomputeError>
where
    P: IsochroneProvider + ?Sized,
    S: ResponseStore + ?Sized,
{
    if config.sequential {
        log::info!("Sequential mode requested; stops are always fetched one at a time");
    }

    let stops = load_stops(&config.stops_dir)?;
    log::info!("Found {} stops", stops.len());

    let mut summary = RunSummary {
        stops: stops.len(),
        output: config.output_path(),
        ..RunSummary::default()
    };
    let mut combined = IsochroneCollection::new();

    progress.set_length(stops.len() as u64);
    for stop in &stops {
        if let Some(response) = resolve(config, provider, cache, sleeper, stop, &mut summary) {
            match select_feature(response) {
                Some(feature) => combined.push(stop, feature),
                None => {
                    log::warn!("No feature in isochrone response for {},{}", stop.lon, stop.lat);
                    summary.skipped += 1;
                }
            }
        }
        progress.inc(1);
    }
    progress.finish();

    if combined.is_empty() {
        log::warn!("No isochrones resolved; writing an empty collection");
    }

    fs::create_dir_all(&config.out_dir).map_err(|e| PrecomputeError::io(&config.out_dir, e))?;
    combined.write_to(&summary.output)?;
    summary.written = combined.len();
    log::info!(
        "Wrote {} isochrones to {}",
        summary.written,
        summary.output.display()
    );
    Ok(summary)
}

/// Cached response for `stop`, or a fresh one which is then stored. `None` means skip.
fn resolve<P, S>(
    config: &PrecomputeConfig,
    provider: &P,
    cache: &S,
    sleeper: &dyn Sleeper,
    stop: &StopDescriptor,
    summary: &mut RunSummary,
) -> Option<Value>
where
    P: IsochroneProvider + ?Sized,
    S: ResponseStore + ?Sized,
{
    let key = CacheKey::new(stop.coord(), config.profile, config.minutes);

    if !config.force {
        if let Some(cached) = cache.get(&key) {
            log::debug!("[CACHE HIT] {}", key);
            summary.cache_hits += 1;
            return Some(cached);
        }
    }

    let response = match provider.fetch(stop.coord(), config.profile, config.minutes) {
        Ok(response) if !is_empty_payload(&response) => response,
        Ok(_) => {
            log::warn!("Empty isochrone response, skipping stop {},{}", stop.lon, stop.lat);
            summary.skipped += 1;
            return None;
        }
        Err(e) => {
            log::warn!(
                "Skipping stop {},{} due to fetch errors: {}",
                stop.lon,
                stop.lat,
                e
            );
            summary.skipped += 1;
            return None;
        }
    };

    if let Err(e) = cache.put(&key, &response) {
        log::warn!("Could not write cache entry {}: {}", key, e);
    }
    summary.fetched += 1;
    sleeper.sleep(config.delay);
    Some(response)
}
