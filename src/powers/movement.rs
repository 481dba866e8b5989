//! Ways of getting somewhere else: flight, gates, teleportation, time
//! travel and astral projection.

use super::{numbered, yes_no};
use crate::context::{object, PowerContext};
use crate::error::PowerError;
use crate::origin::OriginKind;
use crate::stats::Stat;

/// Base speeds above this earn a random bonus.
const FAST_THRESHOLD: i64 = 150;
const LIGHT_SPEED_THRESHOLD: i64 = 1000;
const HYPERSPACE_THRESHOLD: i64 = 2000;

/// Speed shared by Flight and Heightened Speed.
///
/// Base speed is `(Agility + 2 * Stamina) * 3`. Above 150 a `1d10x100`
/// bonus is added; above 1000 and 2000 the character can reach light speed
/// and hyperspace respectively. A device ignores the character's statistics
/// and rolls its own speed.
pub(super) fn travel_speed(ctx: &mut PowerContext<'_>) {
    let mut speed = ctx
        .stat_times(Stat::Stamina, 2)
        .saturating_add(ctx.stat(Stat::Agility))
        .saturating_mul(3);
    if speed > FAST_THRESHOLD {
        speed = speed.saturating_add(ctx.eval_i64("1d10x100"));
    }
    let light_speed = speed > LIGHT_SPEED_THRESHOLD;
    let hyperspace = speed > HYPERSPACE_THRESHOLD;

    ctx.set("Speed", speed);
    ctx.set("LightSpeed", yes_no(light_speed));
    ctx.set("Hyperspace", yes_no(hyperspace));
    if hyperspace {
        ctx.set("TravelRate", "1 light year per hour in hyperspace");
    } else if light_speed {
        ctx.set("TravelRate", "1 light year per year");
    }

    if ctx.has_device() {
        let device_speed = ctx.eval_i64("4d10x10");
        ctx.set_device("Speed", device_speed);
    }
}

/// Flight at the shared travel speed.
pub fn flight(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    travel_speed(ctx);
    ctx.set("Manoeuvre", ctx.stat_div(Stat::Agility, 2));
    Ok(())
}

/// Astral form; a supernatural origin may carry spells across.
pub fn astral_projection(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    let duration = ctx.stat(Stat::Stamina).saturating_add(10);
    let speed = ctx.stat_sum(&[Stat::Stamina, Stat::Agility]);
    ctx.set("Duration", duration);
    ctx.set("Speed", speed);

    let powers_carry = ctx.chance(5);
    ctx.set("PowersInAstralForm", yes_no(powers_carry));
    if ctx.origin.is(OriginKind::Supernatural) {
        let spells_carry = ctx.chance(85);
        ctx.set("SpellsInAstralForm", yes_no(spells_carry));
    }
    Ok(())
}

/// Target familiarity and the percentile needed to arrive on target.
const GATE_FAMILIARITY: [(&str, i64); 5] = [
    ("Home base", 95),
    ("Well known", 80),
    ("Visited once", 60),
    ("Seen in a picture", 40),
    ("Described only", 20),
];

/// How long a gate stays open, its AP cost and difficulty modifier.
const GATE_DURATION: [(&str, i64, i64); 5] = [
    ("1 turn", 1, 0),
    ("1 minute", 3, -10),
    ("1 hour", 5, -20),
    ("1 day", 8, -30),
    ("Permanent", 12, -50),
];

/// Gate tables for familiarity and duration.
pub fn dimensional_gate(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    let familiarity = GATE_FAMILIARITY
        .iter()
        .map(|(target, needed)| (*target, *needed));
    let duration = GATE_DURATION.iter().map(|(length, ap, modifier)| {
        object([
            ("Duration", serde_json::Value::from(*length)),
            ("APCost", serde_json::Value::from(*ap)),
            ("Modifier", serde_json::Value::from(*modifier)),
        ])
    });
    ctx.set("Familiarity", object(familiarity));
    ctx.set("GateDuration", numbered(duration));
    ctx.set("GateSize", ctx.stat_div(Stat::Stamina, 5).max(1));
    Ok(())
}

/// Teleports up to Intelligence x 10 km.
pub fn teleportation(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    let range = ctx.stat_times(Stat::Intelligence, 10);
    let passengers = ctx.stat_div(Stat::Stamina, 5);
    ctx.set("Range", range);
    ctx.set("RangeUnit", "Kilometres");
    ctx.set("Passengers", passengers);
    ctx.set("MishapChance", 5);
    Ok(())
}

/// Travels Intelligence x 10 years; the return is not certain.
pub fn time_travel(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    let reach = ctx.stat_times(Stat::Intelligence, 10);
    let return_chance = ctx
        .stat_sum(&[Stat::Intelligence, Stat::Luck])
        .saturating_add(50)
        .min(100);
    ctx.set("MaxYears", reach);
    ctx.set("Passengers", ctx.stat_div(Stat::Stamina, 10));
    ctx.set("ReturnChance", return_chance);
    Ok(())
}
