//! Enhanced statistics and heightened abilities.
//!
//! The Enhanced family is the only one that writes back into the character
//! statistics, so any rule that reads a statistic sees the enhanced value
//! only if the enhancement was resolved first.

use super::{numbered, SubAbility};
use crate::context::{object, PowerContext};
use crate::error::PowerError;
use crate::stats::Stat;
use serde_json::Value;

/// Roll `count`d`sides` and add it to `stat`.
fn enhance(ctx: &mut PowerContext<'_>, stat: Stat, count: i64, sides: i64) {
    let increase = ctx.roll(count, sides);
    let new_value = ctx.stats.add(stat, increase);
    tracing::trace!(stat = %stat, increase, new_value, "statistic enhanced");
    ctx.set("Statistic", stat.as_str());
    ctx.set("Increase", increase);
    ctx.set("NewValue", new_value);
}

/// Adds 2d8 to Agility.
pub fn enhanced_agility(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    enhance(ctx, Stat::Agility, 2, 8);
    Ok(())
}

/// Adds 1d10 to Charisma.
pub fn enhanced_charisma(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    enhance(ctx, Stat::Charisma, 1, 10);
    Ok(())
}

/// Adds 1d10 to Intelligence.
pub fn enhanced_intelligence(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    enhance(ctx, Stat::Intelligence, 1, 10);
    Ok(())
}

/// Adds 2d10 to Stamina.
pub fn enhanced_stamina(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    enhance(ctx, Stat::Stamina, 2, 10);
    Ok(())
}

/// Adds 2d10 to Strength.
pub fn enhanced_strength(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    enhance(ctx, Stat::Strength, 2, 10);
    Ok(())
}

/// Bonus to hit of 1d4 x 5 and to damage of 1d4.
pub fn heightened_attack(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    let hit_bonus = ctx.roll(1, 4) * 5;
    let damage_bonus = ctx.roll(1, 4);
    ctx.set("HitBonus", hit_bonus);
    ctx.set("DamageBonus", damage_bonus);
    Ok(())
}

/// Defense bonus of 1d4 x 5.
pub fn heightened_defense(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    let bonus = ctx.roll(1, 4) * 5;
    ctx.set("DefenseBonus", bonus);
    Ok(())
}

const EXPERTISE_FIELDS: [&str; 10] = [
    "Acrobatics",
    "Chemistry",
    "Computers",
    "Detective work",
    "Electronics",
    "Languages",
    "Martial arts",
    "Medicine",
    "Piloting",
    "Marksmanship",
];

/// One to four fields of expertise, more with higher Intelligence.
pub fn heightened_expertise(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    let count = ctx.stat_div(Stat::Intelligence, 5).clamp(1, 4);
    let fields: Vec<&str> = (0..count).map(|_| *ctx.pick(&EXPERTISE_FIELDS)).collect();
    ctx.set("Fields", numbered(fields));
    ctx.set("SkillBonus", 20);
    Ok(())
}

const SENSES: [SubAbility; 12] = [
    sense("Telescopic Vision", "See distant objects as if close", "Intelligence*10"),
    sense("Microscopic Vision", "See objects too small for the eye", "Self"),
    sense("Infrared Vision", "See heat, including in darkness", "Intelligence*5"),
    sense("Ultraviolet Vision", "See ultraviolet light and traces", "Intelligence*5"),
    sense("X-Ray Vision", "See through anything except lead", "Intelligence*2"),
    sense("Radar Sense", "Sense shapes around the user without sight", "Intelligence*3"),
    sense("Super Hearing", "Hear faint sounds at great distance", "Intelligence*10"),
    sense("Super Smell", "Track by scent and identify people by smell", "Intelligence*5"),
    sense("Super Taste", "Identify any substance by taste", "HTH"),
    sense("Super Touch", "Read texture, vibration and print by touch", "HTH"),
    sense("Danger Sense", "Warned of danger a moment before it happens", "Self"),
    sense("Life Sense", "Sense living beings nearby", "Stamina*3"),
];

const fn sense(name: &'static str, details: &'static str, range: &'static str) -> SubAbility {
    SubAbility {
        name,
        details,
        ap_cost: "1",
        max_ap: "NotApplicable",
        area_effect: "NotApplicable",
        damage_ap: "NotApplicable",
        duration: "Variable",
        duration_unit: "Turns",
        range,
        choices: "",
    }
}

/// One sense from the table, written with its own sub-ability fields.
pub fn heightened_senses(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    let sense = *ctx.pick(&SENSES);
    let value = sense.to_value(ctx);
    ctx.set("Sense", sense.name);
    ctx.set(sense.name, value);
    Ok(())
}

/// Travel speed as for Flight, plus extra actions.
pub fn heightened_speed(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    super::movement::travel_speed(ctx);
    let actions = if ctx.stat(Stat::Agility) > 15 { 2 } else { 1 };
    ctx.set("ExtraActions", actions);
    ctx.set("Reflexes", object([("Initiative", Value::from(10))]));
    Ok(())
}
