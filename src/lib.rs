pub mod battle;
pub mod catalog;
pub mod damage;
pub mod model;
pub mod moves;
pub mod report;
pub mod setup;
pub mod types;

use crate::battle::simulate_battle;
use crate::catalog::{CachedCatalog, Catalog, CatalogConfig, HttpCatalog, StaticCatalog};
use crate::setup::{load_creature, prepare_matchup, POPULAR_CREATURES};
use anyhow::Context;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
pub struct CliOptions {
    pub p1: String,
    pub p2: String,
    pub move1: Option<String>,
    pub move2: Option<String>,
    pub seed: Option<u64>,
    pub catalog_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
    pub list_moves: bool,
    pub list_popular: bool,
    pub catalog: CatalogConfig,
}

impl Default for CliOptions {
    fn default() -> Self {
        Self {
            p1: POPULAR_CREATURES[0].to_string(),
            p2: POPULAR_CREATURES[1].to_string(),
            move1: None,
            move2: None,
            seed: None,
            catalog_path: None,
            output_path: None,
            list_moves: false,
            list_popular: false,
            catalog: CatalogConfig::default(),
        }
    }
}

/// Filter from `RUST_LOG`-style directives, falling back to `info` when unset or invalid.
pub fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Offline fixture when a path is given, otherwise the HTTP catalog. Either way behind a cache.
pub fn open_catalog(opts: &CliOptions) -> anyhow::Result<CachedCatalog<Box<dyn Catalog>>> {
    let inner: Box<dyn Catalog> = match &opts.catalog_path {
        Some(path) => Box::new(
            StaticCatalog::from_json_file(path).context("Failed to load catalog fixture")?,
        ),
        None => Box::new(
            HttpCatalog::new(opts.catalog.clone()).context("Failed to create HTTP catalog")?,
        ),
    };
    Ok(CachedCatalog::new(inner))
}

pub fn run(opts: CliOptions) -> anyhow::Result<()> {
    if opts.list_popular {
        for name in POPULAR_CREATURES {
            println!("{name}");
        }
        return Ok(());
    }
    let catalog = open_catalog(&opts)?;

    if opts.list_moves {
        for name in [&opts.p1, &opts.p2] {
            let profile = load_creature(&catalog, name)?;
            let damaging = moves::damaging_moves(&catalog, &profile.moves);
            println!("{} ({} damaging):", profile.display_name(), damaging.len());
            for m in damaging {
                println!("  {m}");
            }
        }
        return Ok(());
    }

    let matchup = prepare_matchup(
        &catalog,
        (opts.p1.as_str(), opts.move1.as_deref()),
        (opts.p2.as_str(), opts.move2.as_deref()),
    )?;
    if matchup.is_mirror() {
        println!("Both players chose the same creature: mirror match!\n");
    }
    for contender in [&matchup.a, &matchup.b] {
        print!("{}", report::render_profile(&contender.profile));
        println!("  Move: {}\n", report::render_move(&contender.chosen_move));
    }
    print!(
        "{}",
        report::render_stat_comparison(&matchup.a.profile, &matchup.b.profile)
    );

    let mut rng = match opts.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };
    let result = simulate_battle(
        &catalog,
        matchup.a.as_combatant(),
        matchup.b.as_combatant(),
        &mut rng,
    );

    println!("\n{}\n", report::render_winner(&result));
    print!("{}", report::render_log(result.log()));
    println!();
    print!("{}", report::render_hp_trace(result.hp_trace()));

    if let Some(path) = &opts.output_path {
        report::write_json(&matchup, &result, path)?;
        println!("\nWrote battle report to {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn rust_log_level_overrides_the_default() {
        assert_eq!(log_filter(Some("debug")).max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(log_filter(Some("warn")).max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn missing_or_invalid_directives_default_to_info() {
        assert_eq!(log_filter(None).max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(log_filter(Some("pokemon_combat_sim=bogus")).max_level_hint(), Some(LevelFilter::INFO));
    }
}
