//! Generation and control of elements and natural forces.

use super::yes_no;
use crate::context::{object, PowerContext};
use crate::error::PowerError;
use crate::stats::Stat;
use serde_json::Value;

/// `(Stamina + Agility) * multiplier`, the range of most projected attacks.
fn projected_range(ctx: &PowerContext<'_>, multiplier: i64) -> i64 {
    ctx.stat_sum(&[Stat::Stamina, Stat::Agility])
        .saturating_mul(multiplier)
}

/// A ranged attack sub-effect.
fn attack(ap_cost: i64, range: i64, damage: &str) -> Value {
    object([
        ("APCost", Value::from(ap_cost)),
        ("Range", Value::from(range)),
        ("DamageAP", Value::from(damage)),
    ])
}

/// Blast, Damage, Storm and Oxygen sub-effects; ranges scale with Stamina and Agility.
pub fn air_generation(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    let range = projected_range(ctx, 2);
    let storm_area = ctx.stat_div(Stat::Stamina, 5);
    let stamina = ctx.stat(Stat::Stamina);

    ctx.set("Blast", attack(2, range, "1d6"));
    ctx.set("Damage", attack(3, range, "2d6"));
    ctx.set(
        "Storm",
        object([
            ("APCost", Value::from(5)),
            ("AreaEffect", Value::from(storm_area)),
            ("Penalty", Value::from(20)),
        ]),
    );
    ctx.set(
        "Oxygen",
        object([
            ("APCost", Value::from(1)),
            ("AreaEffect", Value::from(1)),
            ("Duration", Value::from(stamina)),
            ("DurationUnit", Value::from("Turns")),
        ]),
    );
    ctx.set("Range", range);
    Ok(())
}

/// Area of darkness sized by Stamina; the user sees through it.
pub fn darkness_generation(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    let area = ctx.stat_div(Stat::Stamina, 2);
    let duration = ctx.stat(Stat::Stamina);
    ctx.set("AreaEffect", area);
    ctx.set("Duration", duration);
    ctx.set("Range", projected_range(ctx, 1));
    ctx.set("SightPenalty", 50);
    ctx.set("SeesInDarkness", "Yes");
    Ok(())
}

/// Fire blast, a wall of flame and ignition at half range.
pub fn flame_generation(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    let range = projected_range(ctx, 2);
    let wall_height = ctx.stat_div(Stat::Stamina, 3);
    ctx.set("Blast", attack(2, range, "1d8"));
    ctx.set(
        "Wall",
        object([
            ("APCost", Value::from(4)),
            ("Height", Value::from(wall_height)),
            ("DamageAP", Value::from("1d6")),
        ]),
    );
    ctx.set(
        "Ignite",
        object([("APCost", Value::from(1)), ("Range", Value::from(range / 2))]),
    );
    ctx.set("Immune", "Own flame");
    ctx.set("Range", range);
    Ok(())
}

/// Ice blast, wall, slide and a freezing attack.
pub fn ice_generation(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    let range = projected_range(ctx, 2);
    let slide_length = ctx.stat_times(Stat::Stamina, 3);
    let freeze_turns = ctx.stat_div(Stat::Stamina, 4);
    ctx.set("Blast", attack(2, range, "1d6"));
    ctx.set(
        "Wall",
        object([
            ("APCost", Value::from(3)),
            ("Thickness", Value::from(ctx.stat_div(Stat::Stamina, 5))),
        ]),
    );
    ctx.set(
        "Slide",
        object([("APCost", Value::from(2)), ("Length", Value::from(slide_length))]),
    );
    ctx.set(
        "Freeze",
        object([
            ("APCost", Value::from(5)),
            ("Range", Value::from(range / 2)),
            ("Duration", Value::from(freeze_turns)),
            ("DurationUnit", Value::from("Turns")),
        ]),
    );
    ctx.set("Range", range);
    Ok(())
}

/// Light blast, a blinding flash and steady illumination.
pub fn light_generation(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    let range = projected_range(ctx, 3);
    let blind_turns = ctx.roll(1, 4);
    ctx.set("Blast", attack(2, range, "1d6"));
    ctx.set(
        "Flash",
        object([
            ("APCost", Value::from(3)),
            ("AreaEffect", Value::from(ctx.stat_div(Stat::Stamina, 5))),
            ("BlindTurns", Value::from(blind_turns)),
        ]),
    );
    ctx.set(
        "Illumination",
        object([
            ("APCost", Value::from(1)),
            ("AreaEffect", Value::from(ctx.stat(Stat::Stamina))),
        ]),
    );
    ctx.set("Range", range);
    Ok(())
}

/// Lightning bolt that arcs to extra targets by Agility.
pub fn lightning_control(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    let range = projected_range(ctx, 3);
    let arcs = ctx.stat_div(Stat::Agility, 5).max(1);
    ctx.set("Bolt", attack(3, range, "2d6"));
    ctx.set("Arcs", arcs);
    ctx.set("ArcDamageAP", "1d6");
    ctx.set("Grounded", "Metal armour doubles damage taken");
    ctx.set("Range", range);
    Ok(())
}

/// Sonic blast, a stunning scream and a shattering tone.
pub fn sonic_generation(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    let range = projected_range(ctx, 2);
    let stun_turns = ctx.roll(1, 6);
    ctx.set("Blast", attack(2, range, "1d8"));
    ctx.set(
        "Scream",
        object([
            ("APCost", Value::from(4)),
            ("AreaEffect", Value::from(ctx.stat_div(Stat::Stamina, 3))),
            ("StunTurns", Value::from(stun_turns)),
        ]),
    );
    ctx.set(
        "Shatter",
        object([
            ("APCost", Value::from(3)),
            ("Range", Value::from(range / 2)),
            ("Materials", Value::from("Glass, stone, brittle metal")),
        ]),
    );
    ctx.set("Range", range);
    Ok(())
}

/// Water jet and flood, plus water breathing and a swim speed.
pub fn water_generation(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    let range = projected_range(ctx, 2);
    let flood_area = ctx.stat_div(Stat::Stamina, 4);
    ctx.set("Jet", attack(2, range, "1d6"));
    ctx.set(
        "Flood",
        object([
            ("APCost", Value::from(5)),
            ("AreaEffect", Value::from(flood_area)),
            ("Penalty", Value::from(15)),
        ]),
    );
    ctx.set("BreatheWater", "Yes");
    ctx.set("SwimSpeed", ctx.stat_times(Stat::Agility, 2));
    ctx.set("Range", range);
    Ok(())
}

/// Weather over an area of Stamina x 10.
pub fn weather_control(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    const WEATHER: [&str; 6] = ["Rain", "Fog", "Wind", "Snow", "Hail", "Lightning storm"];
    let area = ctx.stat_times(Stat::Stamina, 10);
    let build_up = ctx.roll(1, 6);
    ctx.set("AreaEffect", area);
    ctx.set("Weather", super::numbered(WEATHER));
    ctx.set("BuildUpTurns", build_up);
    ctx.set("Range", area);
    Ok(())
}

/// Adjusts temperature and humidity in steps set by Intelligence.
pub fn environment_control(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    let area = ctx.stat_div(Stat::Stamina, 2);
    let step = ctx.stat_div(Stat::Intelligence, 2).max(1);
    ctx.set("AreaEffect", area);
    ctx.set(
        "Adjust",
        object([
            ("Temperature", format!("{} degrees per AP", step.saturating_mul(5))),
            ("Humidity", format!("{step}% per AP")),
            ("Pressure", "Normal to double".to_string()),
        ]),
    );
    Ok(())
}

/// Raises or lowers gravity by a factor of Stamina / 5.
pub fn gravity_control(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    let range = projected_range(ctx, 1);
    let factor = ctx.stat_div(Stat::Stamina, 5).max(1);
    ctx.set(
        "Increase",
        object([
            ("APCost", Value::from(3)),
            ("Multiplier", Value::from(factor)),
            ("Range", Value::from(range)),
        ]),
    );
    ctx.set(
        "Decrease",
        object([
            ("APCost", Value::from(2)),
            ("Divisor", Value::from(factor)),
            ("Range", Value::from(range)),
        ]),
    );
    ctx.set("SelfLevitation", yes_no(factor >= 3));
    ctx.set("Range", range);
    Ok(())
}

/// Lifts metal up to Stamina x 50 kg.
pub fn magnetic_control(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    let range = projected_range(ctx, 2);
    let lift = ctx.stat_times(Stat::Stamina, 50);
    ctx.set("LiftWeight", lift);
    ctx.set("LiftUnit", "kg");
    ctx.set("Shield", object([("APCost", 3), ("Stops", 10)]));
    ctx.set("Range", range);
    Ok(())
}

/// Entangling plants with a grip of Stamina + 1d10.
pub fn plant_control(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    let area = ctx.stat_div(Stat::Stamina, 2);
    let grip = ctx.stat(Stat::Stamina).saturating_add(ctx.roll(1, 10));
    ctx.set("AreaEffect", area);
    ctx.set(
        "Entangle",
        object([
            ("APCost", Value::from(2)),
            ("Strength", Value::from(grip)),
            ("Range", Value::from(projected_range(ctx, 1))),
        ]),
    );
    ctx.set("GrowthRate", "Hours to seconds");
    ctx.set("Talk", yes_no(ctx.stat(Stat::Intelligence) > 12));
    Ok(())
}
