// Rank birds and hotspots near a coordinate from saved upstream payloads
//
// Usage: OBSERVATIONS_PATH=obs.json ORIGIN_LAT=40.0 ORIGIN_LNG=-75.0 cargo run --bin rank_nearby
//
// Observations may be JSON (upstream payload) or CSV (export with the same
// column names). HOTSPOTS_PATH is optional.

use anyhow::{Context, Result};
use bird_scorer_rust::data::load_hotspots_json;
use bird_scorer_rust::{
    rank_birds, rank_hotspots, Coordinate, ExpansionDecision, LikelihoodScorer, ObservationBatch,
    RankingConfig, SearchSession,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring unparsable {}='{}'", name, raw);
            default
        }),
        Err(_) => default,
    }
}

fn load_observations(path: &Path) -> Result<ObservationBatch> {
    let is_csv = path
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("csv"));
    if is_csv {
        ObservationBatch::load_csv(path)
    } else {
        ObservationBatch::load_json(path)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bird_scorer_rust=info,rank_nearby=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match std::env::var("CONFIG_PATH") {
        Ok(path) => RankingConfig::load(Path::new(&path))?,
        Err(_) => RankingConfig::default(),
    };

    let observations_path: PathBuf = std::env::var("OBSERVATIONS_PATH")
        .context("OBSERVATIONS_PATH must point to an observations JSON or CSV file")?
        .into();
    let hotspots_path = std::env::var("HOTSPOTS_PATH").ok().map(PathBuf::from);
    let origin = Coordinate::new(env_or("ORIGIN_LAT", f64::NAN), env_or("ORIGIN_LNG", f64::NAN));
    let valid_only = env_or("VALID_ONLY", false);

    let mut session = SearchSession::new(origin, &config.search);
    session.birds.sort = env_or("BIRD_SORT", session.birds.sort);
    session.hotspots.sort = env_or("HOTSPOT_SORT", session.hotspots.sort);
    session.birds.limit = env_or("RESULT_LIMIT", session.birds.limit);
    session.hotspots.limit = session.birds.limit;
    session.hotspots.min_species = env_or("MIN_SPECIES", session.hotspots.min_species);

    tracing::info!("Configuration:");
    tracing::info!("  OBSERVATIONS_PATH: {:?}", observations_path);
    tracing::info!("  HOTSPOTS_PATH: {:?}", hotspots_path);
    tracing::info!("  ORIGIN: {}, {}", origin.lat, origin.lng);
    tracing::info!("  RADIUS: {} km", session.radius_km());

    let mut batch = load_observations(&observations_path)?;
    if valid_only {
        batch = batch.valid_only();
    }
    tracing::info!("Loaded {} observation records", batch.len());

    let now = chrono::Local::now().naive_local();
    let scorer = LikelihoodScorer::new(config.scoring.clone())?;
    let scored = scorer.score_batch_parallel(&batch.records, now);
    let ranked = rank_birds(&scored, &session.birds);

    if let ExpansionDecision::ResearchAt(radius_km) = session.on_bird_results(ranked.len()) {
        println!("No birds found; a live search would retry once at {} km.", radius_km);
    }

    println!("\n{}", "=".repeat(70));
    println!("BIRDS ({} species, sorted by {:?} {:?})", ranked.len(), session.birds.sort.key, session.birds.sort.direction);
    println!("{}", "=".repeat(70));
    for species in &ranked {
        println!(
            "{:>3}%  {:<32} {:>3} sightings  last {}",
            species.likelihood,
            species.common_name(),
            species.sighting_count,
            species.latest_observed_at.format("%Y-%m-%d %H:%M")
        );
    }

    if let Some(path) = hotspots_path {
        let hotspots = load_hotspots_json(&path)?;
        let ranked = rank_hotspots(&hotspots, session.origin, &session.hotspots);

        println!("\n{}", "=".repeat(70));
        println!("HOTSPOTS ({} of {})", ranked.len(), hotspots.len());
        println!("{}", "=".repeat(70));
        for entry in &ranked {
            let distance = entry
                .display_distance()
                .map_or_else(|| "   ? mi".to_string(), |d| format!("{:>5.1} mi", d));
            let tier = entry.tier.map_or("Unknown", |t| t.label());
            println!("{:<11} {}  {}", tier, distance, entry.hotspot.name);
        }
    }

    Ok(())
}
