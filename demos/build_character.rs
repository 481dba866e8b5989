//! Character Builder Example
//!
//! Rolls a complete superhero with squadron:
//! - Main statistics rerolled until their total beats 60
//! - A random origin
//! - A handful of powers, one of them granted by a device
//! - The finished record printed as JSON
//!
//! Pass a number to replay the same build, e.g.
//! `cargo run --example build_character -- 1234`. Set `RUST_LOG=debug` to see
//! each power as it resolves.

use clap::Parser;
use squadron::*;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(about = "Roll a superhero and print it as JSON")]
struct Arguments {
    #[arg(help = "Seed for a reproducible build; omitted means a fresh random hero")]
    seed: Option<u64>,
}

// ============================================================================
// Power Selection
// ============================================================================

/// Powers to give the hero, in resolution order. Enhanced Stamina comes
/// before Flight so the flight speed uses the enhanced value.
const POWERS: [&str; 5] = [
    "Enhanced Stamina",
    "Flight",
    "Air Generation",
    "Armour",
    "Gimmick",
];

/// The power the hero gets from equipment rather than innately.
const DEVICE_POWER: &str = "Armour";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let arguments = Arguments::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut roller = match arguments.seed {
        Some(seed) => DiceRoller::seeded(seed),
        None => DiceRoller::from_entropy(),
    };

    let resolver = PowerResolver::from_config(&DataConfig::from_env())?;

    let statistics = roll_main_statistics(&mut roller);
    let origin = roll_origin(&mut roller);
    let mut hero = Character::new(statistics).with_origin(origin);

    // ========================================================================
    // Powers
    // ========================================================================

    hero.seed_device(DEVICE_POWER);
    for name in POWERS {
        resolver.add_power(name, &mut hero, &mut roller)?;
    }

    println!("{}", serde_json::to_string_pretty(&hero)?);
    Ok(())
}
