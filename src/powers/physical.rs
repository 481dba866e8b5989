//! Powers that change the character's body.

use super::{numbered, yes_no};
use crate::context::{object, PowerContext};
use crate::error::PowerError;
use crate::numeric::fraction;
use crate::stats::Stat;

/// Survives hostile environments; the catalog duration is rolled.
pub fn adaption(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    let baseline = ctx.baseline;
    let duration = ctx.evaluate(&baseline.duration);
    ctx.set("Duration", duration);
    ctx.set("Levels", object([("Light", 1), ("Heavy", 5)]));
    ctx.set(
        "Environments",
        numbered(["Underwater", "Vacuum", "Extreme heat", "Extreme cold", "Toxic air"]),
    );
    Ok(())
}

const ARMOUR_EXTRAS: [&str; 8] = [
    "Sealed life support",
    "Radio",
    "Infrared vision",
    "Searchlight",
    "Magnetic boots",
    "Built-in weapon",
    "Parachute",
    "Self repair",
];

/// Damage reduction. A device may come with extra fittings.
pub fn armour(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    ctx.set("DamageReduction", object([("HTH", "1/3"), ("Other", "1/2")]));
    ctx.set(
        "DamageMultiplier",
        object([("HTH", fraction(1, 3)), ("Other", fraction(1, 2))]),
    );

    if ctx.has_device() && ctx.chance(15) {
        let count = ctx.roll(1, 4) + 1;
        let extras: Vec<&str> = (0..count).map(|_| *ctx.pick(&ARMOUR_EXTRAS)).collect();
        ctx.set_device("Extras", numbered(extras));
    }
    Ok(())
}

/// One row of an augmentation table: what was added and what it lets the
/// character do.
type Augmentation = (&'static str, &'static str);

const BODY_AUGMENTATIONS: [Augmentation; 8] = [
    ("Gills", "Breathe underwater"),
    ("Wings", "Glide at running speed"),
    ("Extra arms", "One extra HTH attack per turn"),
    ("Tail", "Prehensile grip and balance"),
    ("Chameleon skin", "Blend into surroundings, -20 to be seen"),
    ("Enlarged lungs", "Hold breath for Stamina minutes"),
    ("Dense bones", "+2 Stamina against falls and crushing"),
    ("Night eyes", "See in near darkness"),
];

const CYBERNETIC_IMPLANTS: [Augmentation; 8] = [
    ("Bionic arm", "Arm strength counts as Strength +10"),
    ("Bionic legs", "Leap Strength metres, run at double speed"),
    ("Cyber eye", "Telescopic and infrared sight"),
    ("Cyber ear", "Hear whispers at 100 metres"),
    ("Neural jack", "Interface directly with computers"),
    ("Subdermal plating", "Takes 3/4 damage from all attacks"),
    ("Built-in weapon", "1d8 ranged attack, range Agility x3"),
    ("Internal radio", "Silent communication on any band"),
];

/// 1-3 slots, each an independent pick from `table` with a 5% chance of a
/// hidden extra power.
fn augment(ctx: &mut PowerContext<'_>, table: &[Augmentation]) {
    let slots = ctx.roll_range(1, 3);
    let mut entries = Vec::new();
    for _ in 0..slots {
        let (kind, ability) = *ctx.pick(table);
        let hidden = if ctx.chance(5) {
            hidden_power(ctx)
        } else {
            "No".to_string()
        };
        entries.push(object([
            ("Type", kind.to_string()),
            ("Ability", ability.to_string()),
            ("HiddenPower", hidden),
        ]));
    }
    ctx.set("Slots", slots);
    ctx.set("Augmentations", numbered(entries));
}

/// A catalog power to hide inside an augmentation.
fn hidden_power(ctx: &mut PowerContext<'_>) -> String {
    let (baseline, catalog) = (ctx.baseline, ctx.catalog);
    let own = baseline.name.as_str();
    let names: Vec<&str> = catalog
        .names()
        .into_iter()
        .filter(|name| *name != own)
        .collect();
    if names.is_empty() {
        return "Yes".to_string();
    }
    ctx.pick(&names).to_string()
}

/// Organic augmentations, one to three slots.
pub fn body_augmentation(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    augment(ctx, &BODY_AUGMENTATIONS);
    Ok(())
}

/// Cybernetic implants, one to three slots.
pub fn cybernetics(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    augment(ctx, &CYBERNETIC_IMPLANTS);
    Ok(())
}

/// Name, HTH damage, movement multiplier.
const DENSITY_TIERS: [(&str, &str, &str); 6] = [
    ("Diamond", "3d6", "x1/4"),
    ("Steel", "2d8", "x1/2"),
    ("Stone", "2d6", "x3/4"),
    ("Normal", "1d6", "x1"),
    ("Mist", "0", "x2"),
    ("Flight", "0", "x4"),
];

/// Density tiers from Diamond to Flight.
pub fn density_control(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    let tiers = DENSITY_TIERS.iter().map(|(name, damage, movement)| {
        object([("Name", *name), ("DamageAP", *damage), ("Movement", *movement)])
    });
    ctx.set("Tiers", numbered(tiers));
    ctx.set("ChangeAPCost", 1);
    Ok(())
}

/// Stretches to Stamina x 2 metres.
pub fn elasticity(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    let reach = ctx.stat_times(Stat::Stamina, 2);
    ctx.set("Reach", reach);
    ctx.set("ReachUnit", "Metres");
    ctx.set("BluntDamageReduction", "1/2");
    ctx.set("Squeeze", "Through any gap wider than 2cm");
    Ok(())
}

/// Recovers Stamina / 5 damage per turn.
pub fn fast_recovery(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    let per_turn = ctx.stat_div(Stat::Stamina, 5).max(1);
    ctx.set("RecoveryRate", per_turn);
    ctx.set("RecoveryUnit", "Damage per turn");
    ctx.set("FatigueRecovery", "Full after 1 turn of rest");
    Ok(())
}

/// Passes through solid matter for Stamina turns.
pub fn immateriality(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    let duration = ctx.stat(Stat::Stamina);
    ctx.set("Duration", duration);
    ctx.set("DurationUnit", "Turns");
    ctx.set("PassThrough", "Solid matter, not force fields");
    ctx.set("Vulnerable", "Mental and magical attacks");
    Ok(())
}

/// Does not age and may return from death.
pub fn immortality(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    let return_chance = ctx.stat(Stat::Luck).saturating_add(50);
    let return_weeks = ctx.roll(1, 6);
    ctx.set("Ageing", "None");
    ctx.set("ReturnChance", return_chance.min(100));
    ctx.set("ReturnTime", return_weeks);
    ctx.set("ReturnUnit", "Weeks");
    Ok(())
}

/// Quarters all damage and ignores hits of 2 or less.
pub fn invulnerability(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    ctx.set("DamageMultiplier", 0.25);
    ctx.set("NoDamageAtOrBelow", 2);
    Ok(())
}

const NATURAL_WEAPONS: [(&str, &str); 6] = [
    ("Claws", "1d6"),
    ("Fangs", "1d4"),
    ("Horns", "1d8"),
    ("Spines", "1d4"),
    ("Tail", "1d6"),
    ("Hooves", "1d6"),
];

/// One natural weapon from the table.
pub fn natural_weaponry(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    let (weapon, damage) = *ctx.pick(&NATURAL_WEAPONS);
    ctx.set("Weapon", weapon);
    ctx.set("DamageAP", damage);
    ctx.set("Range", "HTH");
    Ok(())
}

/// Heals 1d6 per turn; high Stamina regrows limbs.
pub fn regeneration(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    ctx.set("HealRate", "1d6");
    ctx.set("HealUnit", "Per turn");
    ctx.set("RegrowLimbs", yes_no(ctx.stat(Stat::Stamina) > 15));
    Ok(())
}

/// Number of forms grows with Intelligence.
pub fn shape_change(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    let forms = ctx.stat_div(Stat::Intelligence, 4).max(1);
    let duration = ctx.stat_times(Stat::Stamina, 10);
    ctx.set("Forms", forms);
    ctx.set("Duration", duration);
    ctx.set("DurationUnit", "Minutes");
    ctx.set("Keeps", "Own statistics and mind");
    Ok(())
}

/// Shrinks by Agility / 4 levels.
pub fn shrinking(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    let levels = ctx.stat_div(Stat::Agility, 4).max(1);
    ctx.set("Levels", levels);
    ctx.set("DefenseBonus", levels.saturating_mul(5));
    ctx.set("DamagePenalty", levels);
    ctx.set("MinimumHeight", format!("{}cm", (180 / levels.saturating_mul(2)).max(1)));
    Ok(())
}

/// Grows by Stamina / 4 levels.
pub fn size_increase(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    let levels = ctx.stat_div(Stat::Stamina, 4).max(1);
    ctx.set("Levels", levels);
    ctx.set("StrengthBonus", levels.saturating_mul(3));
    ctx.set("DefensePenalty", levels.saturating_mul(5));
    ctx.set("MaximumHeight", format!("{}m", levels.saturating_add(2)));
    Ok(())
}

/// Climbs at Agility x 2.
pub fn wall_crawling(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    let speed = ctx.stat_times(Stat::Agility, 2);
    ctx.set("ClimbSpeed", speed);
    ctx.set("Surfaces", "Any surface that can bear the character's weight");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::Formula;
    use crate::powers::Bench;
    use serde_json::Value;

    #[test]
    fn test_armour_reductions() {
        let mut bench = Bench::new(&[]);
        let detail = bench.run(armour);
        let reduction = detail.get("DamageReduction").unwrap();
        assert_eq!(reduction["HTH"], "1/3");
        assert_eq!(reduction["Other"], "1/2");
        assert_eq!(detail.get("DamageMultiplier").unwrap()["Other"], 0.5);
        assert!(!detail.has_device());
    }

    #[test]
    fn test_armour_device_extras_stay_in_table() {
        for seed in 0..200 {
            let mut bench = Bench::new(&[]);
            bench.roller = crate::roll::DiceRoller::seeded(seed);
            bench.detail.seed_device();
            let detail = bench.run(armour);
            if let Some(extras) = detail.device().unwrap().get("Extras") {
                let extras = extras.as_object().unwrap();
                assert!((2..=5).contains(&extras.len()));
                for extra in extras.values() {
                    assert!(ARMOUR_EXTRAS.contains(&extra.as_str().unwrap()));
                }
            }
        }
    }

    #[test]
    fn test_adaption_duration_is_evaluated() {
        let mut bench = Bench::new(&[]);
        bench.baseline.duration = Formula::parse("20 or 10");
        let detail = bench.run(adaption);
        let duration = detail.get_i64("Duration").unwrap();
        assert!(duration == 20 || duration == 10);
        assert_eq!(detail.get("Levels").unwrap()["Heavy"], 5);
    }

    #[test]
    fn test_augmentation_slots() {
        let mut bench = Bench::new(&[]);
        let detail = bench.run(cybernetics);
        let slots = detail.get_i64("Slots").unwrap();
        assert!((1..=3).contains(&slots));
        let entries = detail.get("Augmentations").unwrap().as_object().unwrap();
        assert_eq!(entries.len() as i64, slots);
        for entry in entries.values() {
            let kind = entry["Type"].as_str().unwrap();
            assert!(CYBERNETIC_IMPLANTS.iter().any(|(k, _)| *k == kind));
        }
    }

    #[test]
    fn test_density_tiers() {
        let mut bench = Bench::new(&[]);
        let tiers = bench.run(density_control).get("Tiers").unwrap().clone();
        assert_eq!(tiers["1"]["Name"], "Diamond");
        assert_eq!(tiers["6"]["Name"], "Flight");
    }

    #[test]
    fn test_invulnerability_floor() {
        let mut bench = Bench::new(&[]);
        let detail = bench.run(invulnerability);
        assert_eq!(detail.get("DamageMultiplier"), Some(&Value::from(0.25)));
        assert_eq!(detail.get_i64("NoDamageAtOrBelow"), Some(2));
    }
}
