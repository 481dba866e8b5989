//! Powers built from external lists or fixed tables of unrelated entries.

use super::{numbered, SubAbility};
use crate::context::PowerContext;
use crate::error::PowerError;

const DEFECTS: [(&str, &str); 10] = [
    ("Vulnerability", "Takes double damage from one material"),
    ("Power loss", "Powers fail in the presence of one substance"),
    ("Dependency", "Must consume a rare substance daily or weaken"),
    ("Unstable powers", "10% chance each use that the power misfires"),
    ("Distinctive looks", "Cannot pass as a normal person"),
    ("Phobia", "Must save or flee from one common thing"),
    ("Short lived", "Loses 1 Stamina per year permanently"),
    ("Berserk", "Must save or attack the nearest person when hurt"),
    ("Weak sense", "One normal sense is badly impaired"),
    ("Enemy", "A powerful foe hunts the character"),
];

/// One drawback from the defect table.
pub fn defect(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    let (name, effect) = *ctx.pick(&DEFECTS);
    ctx.set("Defect", name);
    ctx.set("Effect", effect);
    Ok(())
}

/// 2-5 items, each drawn independently from the gimmick list. The same item
/// can turn up more than once.
pub fn gimmick(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    let gimmicks = ctx.gimmicks;
    let count = ctx.roll_range(2, 5);
    let items: Vec<String> = if gimmicks.is_empty() {
        tracing::warn!("gimmick list is empty, no items rolled");
        Vec::new()
    } else {
        (0..count)
            .filter_map(|_| {
                let index = ctx.roll_range(1, gimmicks.len() as i64) - 1;
                gimmicks.get(index as usize).map(str::to_string)
            })
            .collect()
    };
    ctx.set("Count", items.len());
    ctx.set("Items", numbered(items));
    Ok(())
}

const INHERENT_POWERS: [SubAbility; 6] = [
    SubAbility {
        name: "Life Support",
        details: "Needs no air, food or sleep",
        ap_cost: "0",
        max_ap: "NotApplicable",
        area_effect: "NotApplicable",
        damage_ap: "NotApplicable",
        duration: "Unlimited",
        duration_unit: "NotApplicable",
        range: "Self",
        choices: "",
    },
    SubAbility {
        name: "Radiation Aura",
        details: "Harms anyone who stays close",
        ap_cost: "0",
        max_ap: "NotApplicable",
        area_effect: "Stamina",
        damage_ap: "1d4",
        duration: "Unlimited",
        duration_unit: "NotApplicable",
        range: "Stamina",
        choices: "",
    },
    SubAbility {
        name: "Glow",
        details: "Gives off steady light",
        ap_cost: "0",
        max_ap: "NotApplicable",
        area_effect: "10",
        damage_ap: "NotApplicable",
        duration: "Unlimited",
        duration_unit: "NotApplicable",
        range: "Self",
        choices: "",
    },
    SubAbility {
        name: "Water Breathing",
        details: "Breathes water as easily as air",
        ap_cost: "0",
        max_ap: "NotApplicable",
        area_effect: "NotApplicable",
        damage_ap: "NotApplicable",
        duration: "Unlimited",
        duration_unit: "NotApplicable",
        range: "Self",
        choices: "",
    },
    SubAbility {
        name: "Electric Skin",
        details: "Shocks anyone who touches the character",
        ap_cost: "0",
        max_ap: "NotApplicable",
        area_effect: "NotApplicable",
        damage_ap: "1d6",
        duration: "Unlimited",
        duration_unit: "NotApplicable",
        range: "HTH",
        choices: "",
    },
    SubAbility {
        name: "Empathy",
        details: "Senses the mood of everyone nearby",
        ap_cost: "0",
        max_ap: "NotApplicable",
        area_effect: "Charisma",
        damage_ap: "NotApplicable",
        duration: "Unlimited",
        duration_unit: "NotApplicable",
        range: "Charisma*2",
        choices: "",
    },
];

/// One always-on ability, written with its own sub-ability fields.
pub fn inherent_power(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    let power = *ctx.pick(&INHERENT_POWERS);
    let value = power.to_value(ctx);
    ctx.set("Ability", power.name);
    ctx.set(power.name, value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::GimmickList;
    use crate::powers::Bench;

    #[test]
    fn test_gimmick_items_come_from_list() {
        let mut bench = Bench::new(&[]);
        bench.gimmicks = GimmickList::new(vec!["Smoke bomb".into(), "Grapple gun".into()]);
        let detail = bench.run(gimmick);
        let count = detail.get_i64("Count").unwrap();
        assert!((2..=5).contains(&count));
        for item in detail.get("Items").unwrap().as_object().unwrap().values() {
            assert!(item == "Smoke bomb" || item == "Grapple gun");
        }
    }

    #[test]
    fn test_gimmick_with_empty_list() {
        let mut bench = Bench::new(&[]);
        let detail = bench.run(gimmick);
        assert_eq!(detail.get_i64("Count"), Some(0));
    }

    #[test]
    fn test_inherent_power_sub_table() {
        let mut bench = Bench::new(&[(crate::stats::Stat::Charisma, 7)]);
        let detail = bench.run(inherent_power);
        let name = detail.get_str("Ability").unwrap().to_string();
        let ability = detail.get(&name).unwrap();
        assert_eq!(ability["Name"], name.as_str());
        assert_eq!(ability["APCost"], 0);
        assert_eq!(ability["Duration"], "Unlimited");
    }
}
