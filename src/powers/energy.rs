//! Beams, fields and other raw-energy powers.

use super::yes_no;
use crate::context::{object, PowerContext};
use crate::dice::Formula;
use crate::error::PowerError;
use crate::stats::Stat;
use serde_json::Value;

/// `low-100`, with `low` kept inside the percentile range.
fn percentile_band(low: i64) -> String {
    format!("{}-100", low.clamp(1, 100))
}

/// Touch attack; the chance of permanent damage improves with Luck.
pub fn death_touch(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    let luck = ctx.stat(Stat::Luck);
    ctx.set(
        "Effects",
        object([
            (
                "Save",
                object([("Damage", "Half"), ("PermanentDamage", "None")]),
            ),
            (
                "Fail",
                object([
                    ("Damage", "Full".to_string()),
                    ("PermanentDamage", percentile_band(76i64.saturating_sub(luck))),
                ]),
            ),
        ]),
    );
    ctx.set("Range", "HTH");
    ctx.set_device("PermanentDamage", percentile_band(91i64.saturating_sub(luck)));
    Ok(())
}

/// Beam that destroys Stamina / 2 cubic metres per AP.
pub fn disintegration_beam(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    let range = ctx.stat_times(Stat::Agility, 3);
    let volume = ctx.stat_div(Stat::Stamina, 2);
    ctx.set("Range", range);
    ctx.set("VolumePerAP", volume);
    ctx.set("VolumeUnit", "Cubic metres");
    ctx.set("LivingTargets", object([("DamageAP", "2d6")]));
    Ok(())
}

/// Stores absorbed energy. One time in five it also grants a release power, "B".
pub fn energy_absorption(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    let capacity = ctx.stat_times(Stat::Stamina, 2);
    ctx.set("StoreCapacity", capacity);
    ctx.set("Absorbs", "Heat, light, electricity, radiation, kinetic blasts");
    ctx.set_device("OverloadAt", capacity.saturating_mul(2));

    let secondary = ctx.chance(20);
    ctx.set("SecondaryPower", yes_no(secondary));
    if !secondary {
        return Ok(());
    }
    let release_range = ctx
        .stat_sum(&[Stat::Stamina, Stat::Agility])
        .saturating_mul(2);
    let release_capacity = ctx.stat(Stat::Stamina);
    ctx.set(
        "B",
        object([
            ("Name", Value::from("Energy Release")),
            ("APCost", Value::from(2)),
            ("Range", Value::from(release_range)),
            ("StoreCapacity", Value::from(release_capacity)),
            ("DamageAP", Value::from("1d6 per 5 AP stored")),
        ]),
    );
    if ctx.has_device() {
        let overload_turns = ctx.roll(1, 6);
        ctx.set_device(
            "B",
            object([
                ("OverloadAt", release_capacity.saturating_mul(2)),
                ("OverloadTurns", overload_turns),
            ]),
        );
    }
    Ok(())
}

/// A Force Beam variant: what it is and the formulas it replaces.
struct Beam {
    kind: &'static str,
    ap_cost: i64,
    max_ap: i64,
    damage_ap: &'static str,
    range: &'static str,
    device_ap: &'static str,
    device_range: &'static str,
}

static BEAMS: [Beam; 4] = [
    Beam {
        kind: "Laser",
        ap_cost: 2,
        max_ap: 20,
        damage_ap: "1d8",
        range: "Agility*5",
        device_ap: "2d6",
        device_range: "1d10x10",
    },
    Beam {
        kind: "Plasma",
        ap_cost: 3,
        max_ap: 25,
        damage_ap: "2d6",
        range: "Stamina*3",
        device_ap: "3d6",
        device_range: "1d8x10",
    },
    Beam {
        kind: "Magna",
        ap_cost: 2,
        max_ap: 30,
        damage_ap: "1d10",
        range: "Stamina+Agility",
        device_ap: "2d8",
        device_range: "1d6x10",
    },
    Beam {
        kind: "Matter",
        ap_cost: 4,
        max_ap: 20,
        damage_ap: "2d8",
        range: "Stamina*2",
        device_ap: "4d6",
        device_range: "1d4x10",
    },
];

/// Picks a beam variant, which also replaces the device formulas.
pub fn force_beam(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    let beam = ctx.pick(&BEAMS);
    let range = ctx.eval(beam.range);
    ctx.set("BeamType", beam.kind);
    ctx.set("APCost", beam.ap_cost);
    ctx.set("MaxAP", beam.max_ap);
    ctx.set("DamageAP", beam.damage_ap);
    ctx.set("Range", range);
    ctx.device_ap = Formula::parse(beam.device_ap);
    ctx.device_range = Formula::parse(beam.device_range);
    Ok(())
}

/// Field that absorbs Stamina x 2 damage per AP.
pub fn force_field(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    let absorbs = ctx.stat_times(Stat::Stamina, 2);
    let radius = ctx.stat_div(Stat::Stamina, 5).max(1);
    ctx.set("AbsorbPerAP", absorbs);
    ctx.set("Radius", radius);
    ctx.set("Duration", ctx.stat(Stat::Stamina));
    ctx.set("DurationUnit", "Turns");
    Ok(())
}

/// Changes one material into another, Intelligence kg per AP.
pub fn transmutation(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    let mass = ctx.stat(Stat::Intelligence);
    ctx.set("MassPerAP", mass);
    ctx.set("MassUnit", "kg");
    ctx.set(
        "Difficulty",
        object([
            ("Element to element", 0),
            ("Simple compound", -10),
            ("Complex compound", -25),
            ("Living tissue", -50),
        ]),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::powers::Bench;

    #[test]
    fn test_death_touch_bands() {
        let mut bench = Bench::new(&[(Stat::Luck, 6)]);
        bench.detail.seed_device();
        let detail = bench.run(death_touch);
        let fail = &detail.get("Effects").unwrap()["Fail"];
        assert_eq!(fail["PermanentDamage"], "70-100");
        assert_eq!(detail.device().unwrap()["PermanentDamage"], "85-100");
    }

    #[test]
    fn test_death_touch_without_device() {
        let mut bench = Bench::new(&[]);
        let detail = bench.run(death_touch);
        assert_eq!(
            detail.get("Effects").unwrap()["Fail"]["PermanentDamage"],
            "76-100"
        );
        assert!(!detail.has_device());
    }

    #[test]
    fn test_percentile_band_clamps() {
        assert_eq!(percentile_band(-5), "1-100");
        assert_eq!(percentile_band(76), "76-100");
    }

    #[test]
    fn test_force_beam_variant_overrides() {
        for seed in 0..20 {
            let mut bench = Bench::new(&[(Stat::Stamina, 10), (Stat::Agility, 10)]);
            bench.roller = crate::roll::DiceRoller::seeded(seed);
            bench.detail.seed_device();
            let detail = bench.run(force_beam);
            let kind = detail.get_str("BeamType").unwrap();
            let beam = BEAMS.iter().find(|b| b.kind == kind).unwrap();
            assert_eq!(detail.get_i64("APCost"), Some(beam.ap_cost));
            assert!(detail.get_i64("Range").unwrap() >= 20);
            let device_range = detail.device().unwrap()["DeviceRange"].as_i64().unwrap();
            assert_eq!(device_range % 10, 0);
        }
    }

    #[test]
    fn test_energy_absorption_device_checked() {
        for seed in 0..50 {
            let mut bench = Bench::new(&[(Stat::Stamina, 10)]);
            bench.roller = crate::roll::DiceRoller::seeded(seed);
            let detail = bench.run(energy_absorption);
            assert!(!detail.has_device());
            assert_eq!(detail.contains_key("B"), detail.get_str("SecondaryPower") == Some("Yes"));
        }
    }
}
