use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use isochrone_precompute::sdk::{
    config::{resolve_token, PrecomputeConfig, Profile, DEFAULT_BASE_URL, TOKEN_ENV_VAR},
    isochrone::{FsResponseCache, RemoteIsochroneProvider, RetryPolicy},
    pipeline,
    util::{
        log::{init_logging, DEFAULT_FILTER},
        sleep::ThreadSleeper,
    },
};
use std::{env, error::Error, path::PathBuf, time::Duration};

/// Precompute travel-time isochrones for a set of stops and save them as one GeoJSON
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Access token (falls back to the MAPBOX_ACCESS_TOKEN environment variable)
    #[arg(long)]
    token: Option<String>,

    /// Directory containing stop GeoJSON files
    #[arg(long, default_value = "assets/data/stops")]
    stops_dir: PathBuf,

    /// Output directory for the combined isochrones and the cache
    #[arg(long, default_value = "assets/isochrones")]
    out_dir: PathBuf,

    /// Travel profile
    #[arg(long, value_enum, default_value_t = Profile::Walking)]
    profile: Profile,

    /// Contour minutes
    #[arg(long, default_value_t = 10)]
    minutes: u32,

    /// Delay between fresh requests, in seconds
    #[arg(long, default_value_t = 0.35)]
    delay: f64,

    /// Force fully sequential requests (requests are never concurrent)
    #[arg(long)]
    sequential: bool,

    /// Refetch every stop even when a cached response exists
    #[arg(long)]
    force: bool,

    /// Isochrone API base URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Per-request timeout, in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Maximum attempts per stop
    #[arg(long, default_value_t = 6)]
    max_attempts: u32,
}

fn main() -> Result<(), Box<dyn Error>> {
    init_logging(DEFAULT_FILTER);
    dotenvy::dotenv().ok();

    // --- 1. Argument Parsing with Clap ---
    let cli = Cli::parse();

    // --- 2. Configuration ---
    let token = resolve_token(cli.token, env::var(TOKEN_ENV_VAR).ok()).map_err(|e| {
        log::error!("{}", e);
        e
    })?;

    let mut config = PrecomputeConfig::new(token, cli.stops_dir, cli.out_dir, cli.profile, cli.minutes);
    config.delay = Duration::try_from_secs_f64(cli.delay.max(0.0))?;
    config.sequential = cli.sequential;
    config.force = cli.force;
    config.base_url = cli.base_url;
    config.timeout = Duration::from_secs(cli.timeout);
    config.retry = RetryPolicy::default().with_max_attempts(cli.max_attempts);
    log::info!(
        "Precomputing {} min {} isochrones from {}",
        config.minutes,
        config.profile,
        config.stops_dir.display()
    );

    // --- 3. Dependency Initialization ---
    let cache = FsResponseCache::open(config.cache_dir())?;
    let provider = RemoteIsochroneProvider::from_config(&config)?;

    let progress = ProgressBar::new(0);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{prefix}: {percent:>3}% [{bar:40}] {pos}/{len} [{elapsed_precise}<{eta_precise}]")?
            .progress_chars("=> "),
    );
    progress.set_prefix("Stops");

    // --- 4. Fetch, cache and merge ---
    let summary = pipeline::run_with_progress(&config, &provider, &cache, &ThreadSleeper, &progress)
        .map_err(|e| {
            log::error!("{}", e);
            e
        })?;

    // --- 5. Report ---
    log::info!(
        "Done: {} stops, {} fetched, {} from cache, {} skipped, {} written to {}",
        summary.stops,
        summary.fetched,
        summary.cache_hits,
        summary.skipped,
        summary.written,
        summary.output.display()
    );
    Ok(())
}
