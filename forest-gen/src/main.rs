//! Entry point for the one-shot forest generator.
//!
//! This binary wires up logging, builds the canonical configuration, runs a
//! single generation pass from `forest-core` and writes the artifact to
//! [`OUTPUT_FILE`]. Set `FOREST_SEED` to a u64 to make a run reproducible;
//! unset, the generator seeds from OS entropy. `RUST_LOG` filters the log
//! output as usual.

use anyhow::Context;
use forest_core::config::ForestConfig;
use forest_core::export;
use forest_core::forest::Forest;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::env;
use std::path::Path;
use tracing::info;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

/// Fixed destination of the generated artifact.
const OUTPUT_FILE: &str = "forest.txt";

/// Runs one generation pass and writes the artifact.
///
/// ### Returns
/// - `Ok(())` once the artifact has been written.
/// - `Err` if the configuration is invalid, a point pool runs dry, the seed
///   cannot be parsed, or the output cannot be written.
fn main() -> anyhow::Result<()> {
    setup_logging();

    let cfg = ForestConfig::default();
    let mut rng = seeded_rng()?;

    let forest = Forest::generate(&cfg, &mut rng)?;
    let leaf = forest.random_leaf(&mut rng);
    export::write_file(&forest, leaf.id, Path::new(OUTPUT_FILE))
        .with_context(|| format!("writing {OUTPUT_FILE}"))?;

    info!(marker = leaf.id, path = OUTPUT_FILE, "forest written");
    Ok(())
}

/// Builds the generator RNG: seeded from `FOREST_SEED` when set, from OS
/// entropy otherwise.
fn seeded_rng() -> anyhow::Result<StdRng> {
    match env::var("FOREST_SEED") {
        Ok(raw) => {
            let seed: u64 = raw.parse().context("FOREST_SEED must be a u64")?;
            Ok(StdRng::seed_from_u64(seed))
        }
        Err(_) => Ok(StdRng::from_os_rng()),
    }
}

fn setup_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
