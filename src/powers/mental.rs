//! Mind and perception powers.

use super::{numbered, yes_no};
use crate::context::{object, PowerContext};
use crate::error::PowerError;
use crate::stats::Stat;

const ANIMAL_KINDS: [&str; 8] = [
    "Mammals",
    "Birds",
    "Reptiles",
    "Fish",
    "Insects",
    "Amphibians",
    "Arachnids",
    "Sea mammals",
];

/// Rapport with one to three kinds of animal.
pub fn animal_affinity(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    let count = ctx.roll_range(1, 3);
    let kinds: Vec<&str> = (0..count).map(|_| *ctx.pick(&ANIMAL_KINDS)).collect();
    let range = ctx.stat_times(Stat::Charisma, 10);
    ctx.set("Kinds", numbered(kinds));
    ctx.set("Range", range);
    ctx.set("Command", yes_no(ctx.stat(Stat::Charisma) > 12));
    Ok(())
}

/// Alter ego with a statistic bonus.
pub fn ego_change(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    let bonus = ctx.roll(2, 6);
    let change_turns = ctx.roll(1, 4);
    ctx.set(
        "AlterEgo",
        object([
            ("StatisticBonus", bonus),
            ("ChangeTurns", change_turns),
        ]),
    );
    ctx.set("Trigger", "Chosen word or action");
    Ok(())
}

const EMOTIONS: [&str; 6] = ["Fear", "Rage", "Love", "Despair", "Calm", "Joy"];

/// Imposes one of six emotions within Charisma x 2 metres.
pub fn emotion_control(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    let penalty = ctx.stat_div(Stat::Charisma, 2);
    ctx.set("Emotions", numbered(EMOTIONS));
    ctx.set("ResistPenalty", penalty);
    ctx.set("Range", ctx.stat_times(Stat::Charisma, 2));
    Ok(())
}

/// Invisible for Stamina turns.
pub fn invisibility(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    let duration = ctx.stat(Stat::Stamina);
    let infrared = ctx.chance(10);
    ctx.set("Duration", duration);
    ctx.set("DurationUnit", "Turns");
    ctx.set("DetectionPenalty", 40);
    ctx.set("InfraredInvisible", yes_no(infrared));
    Ok(())
}

/// Controls Charisma / 5 targets within Intelligence x 2.
pub fn mind_control(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    let range = ctx.stat_times(Stat::Intelligence, 2);
    let targets = ctx.stat_div(Stat::Charisma, 5).max(1);
    let duration = ctx.stat(Stat::Intelligence);
    ctx.set("Range", range);
    ctx.set("Targets", targets);
    ctx.set("Duration", duration);
    ctx.set("DurationUnit", "Turns");
    ctx.set("ResistPenalty", ctx.stat_div(Stat::Intelligence, 2));
    Ok(())
}

/// Lifts Intelligence x Stamina kg.
pub fn telekinesis(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    let lift = ctx
        .stat(Stat::Intelligence)
        .saturating_mul(ctx.stat(Stat::Stamina));
    let range = ctx.stat_times(Stat::Intelligence, 3);
    ctx.set("LiftWeight", lift);
    ctx.set("LiftUnit", "kg");
    ctx.set("Range", range);
    ctx.set("ThrowDamageAP", "1d6 per 50kg");
    Ok(())
}

/// Reads and sends thoughts within Intelligence x 10 metres.
pub fn telepathy(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    let range = ctx.stat_times(Stat::Intelligence, 10);
    ctx.set("Range", range);
    ctx.set("RangeUnit", "Metres");
    ctx.set(
        "Modes",
        object([("Read", 1), ("Send", 1), ("Probe", 3), ("Shield", 2)]),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::powers::Bench;

    #[test]
    fn test_animal_affinity_kinds() {
        let mut bench = Bench::new(&[(Stat::Charisma, 14)]);
        let detail = bench.run(animal_affinity);
        let kinds = detail.get("Kinds").unwrap().as_object().unwrap();
        assert!((1..=3).contains(&kinds.len()));
        assert_eq!(detail.get_i64("Range"), Some(140));
        assert_eq!(detail.get_str("Command"), Some("Yes"));
    }

    #[test]
    fn test_mind_control_always_one_target() {
        let mut bench = Bench::new(&[(Stat::Intelligence, 8), (Stat::Charisma, 2)]);
        let detail = bench.run(mind_control);
        assert_eq!(detail.get_i64("Targets"), Some(1));
        assert_eq!(detail.get_i64("Range"), Some(16));
    }
}
