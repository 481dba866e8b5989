//! Power resolution rules.
//!
//! Each power has exactly one [`PowerRule`]: a fixed rules-text summary and
//! a resolve function. The registry in [`crate::resolver`] copies the
//! baseline into the detail block before the function runs and fills the
//! device fields after it, so a rule only writes what is specific to its
//! power.

mod elemental;
mod energy;
mod enhanced;
mod mental;
mod movement;
mod physical;
mod special;

use crate::context::PowerContext;
use crate::dice::Formula;
use crate::error::PowerError;
use serde_json::{Map, Value};
use std::fmt;

/// A rule's resolve function.
pub type ResolveFn = fn(&mut PowerContext<'_>) -> Result<(), PowerError>;

/// How one power is resolved.
#[derive(Clone, Copy)]
pub struct PowerRule {
    /// Rules text written to `StrDetails`.
    pub details: &'static str,
    pub resolve: ResolveFn,
}

impl PowerRule {
    /// A rule with its `StrDetails` text.
    pub const fn new(details: &'static str, resolve: ResolveFn) -> Self {
        Self { details, resolve }
    }
}

impl fmt::Debug for PowerRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PowerRule")
            .field("details", &self.details)
            .finish_non_exhaustive()
    }
}

macro_rules! powers {
    ($($variant:ident => $name:literal),* $(,)?) => {
        /// Every power with a resolution rule.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Power {
            $($variant),*
        }

        impl Power {
            pub const ALL: &'static [Power] = &[$(Power::$variant),*];

            /// Catalog name of the power.
            pub fn name(self) -> &'static str {
                match self {
                    $(Power::$variant => $name),*
                }
            }

            /// Exact, case-sensitive lookup by catalog name.
            pub fn from_name(name: &str) -> Option<Power> {
                match name {
                    $($name => Some(Power::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

powers! {
    Adaption => "Adaption",
    AirGeneration => "Air Generation",
    AnimalAffinity => "Animal Affinity",
    Armour => "Armour",
    AstralProjection => "Astral Projection",
    BodyAugmentation => "Body Augmentation",
    Cybernetics => "Cybernetics",
    DarknessGeneration => "Darkness Generation",
    DeathTouch => "Death Touch",
    Defect => "Defect",
    DensityControl => "Density Control",
    DimensionalGate => "Dimensional Gate",
    DisintegrationBeam => "Disintegration Beam",
    EgoChange => "Ego Change",
    Elasticity => "Elasticity",
    EmotionControl => "Emotion Control",
    EnergyAbsorption => "Energy Absorption",
    EnhancedAgility => "Enhanced Agility",
    EnhancedCharisma => "Enhanced Charisma",
    EnhancedIntelligence => "Enhanced Intelligence",
    EnhancedStamina => "Enhanced Stamina",
    EnhancedStrength => "Enhanced Strength",
    EnvironmentControl => "Environment Control",
    FastRecovery => "Fast Recovery",
    FlameGeneration => "Flame Generation",
    Flight => "Flight",
    ForceBeam => "Force Beam",
    ForceField => "Force Field",
    Gimmick => "Gimmick",
    GravityControl => "Gravity Control",
    HeightenedAttack => "Heightened Attack",
    HeightenedDefense => "Heightened Defense",
    HeightenedExpertise => "Heightened Expertise",
    HeightenedSenses => "Heightened Senses",
    HeightenedSpeed => "Heightened Speed",
    IceGeneration => "Ice Generation",
    Immateriality => "Immateriality",
    Immortality => "Immortality",
    InherentPower => "Inherent Power",
    Invisibility => "Invisibility",
    Invulnerability => "Invulnerability",
    LightGeneration => "Light Generation",
    LightningControl => "Lightning Control",
    MagneticControl => "Magnetic Control",
    MindControl => "Mind Control",
    NaturalWeaponry => "Natural Weaponry",
    PlantControl => "Plant Control",
    Regeneration => "Regeneration",
    ShapeChange => "Shape Change",
    Shrinking => "Shrinking",
    SizeIncrease => "Size Increase",
    SonicGeneration => "Sonic Generation",
    Telekinesis => "Telekinesis",
    Telepathy => "Telepathy",
    Teleportation => "Teleportation",
    TimeTravel => "Time Travel",
    Transmutation => "Transmutation",
    WaterGeneration => "Water Generation",
    WeatherControl => "Weather Control",
    WallCrawling => "Wall Crawling",
}

impl fmt::Display for Power {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Power {
    /// The built-in rule for this power.
    pub fn rule(self) -> PowerRule {
        use Power::*;
        match self {
            Adaption => PowerRule::new(
                "1AP for light adaption, 5AP for heavy",
                physical::adaption,
            ),
            AirGeneration => PowerRule::new(
                "Blast, damaging gusts, storms, or breathable air around the user",
                elemental::air_generation,
            ),
            AnimalAffinity => PowerRule::new(
                "Communicate with and command animals of the chosen kinds",
                mental::animal_affinity,
            ),
            Armour => PowerRule::new(
                "Takes 1/3 damage from hand to hand attacks, 1/2 from all others",
                physical::armour,
            ),
            AstralProjection => PowerRule::new(
                "Leave the body as an invisible astral form; the body is helpless meanwhile",
                movement::astral_projection,
            ),
            BodyAugmentation => PowerRule::new(
                "Organic enhancements, each granting a special ability",
                physical::body_augmentation,
            ),
            Cybernetics => PowerRule::new(
                "Mechanical implants, each granting a special ability",
                physical::cybernetics,
            ),
            DarknessGeneration => PowerRule::new(
                "Fill an area with magical darkness that blocks normal sight",
                elemental::darkness_generation,
            ),
            DeathTouch => PowerRule::new(
                "Touch drains life; victims save or take full damage and may be permanently harmed",
                energy::death_touch,
            ),
            Defect => PowerRule::new(
                "A drawback that hampers the character",
                special::defect,
            ),
            DensityControl => PowerRule::new(
                "Raise density for toughness or lower it to float and drift",
                physical::density_control,
            ),
            DimensionalGate => PowerRule::new(
                "Open a gate to another place or dimension",
                movement::dimensional_gate,
            ),
            DisintegrationBeam => PowerRule::new(
                "A beam that destroys matter; living targets take damage",
                energy::disintegration_beam,
            ),
            EgoChange => PowerRule::new(
                "Transform into a second, more powerful persona",
                mental::ego_change,
            ),
            Elasticity => PowerRule::new(
                "Stretch, reshape and absorb blunt impacts",
                physical::elasticity,
            ),
            EmotionControl => PowerRule::new(
                "Impose emotions on others who fail to resist",
                mental::emotion_control,
            ),
            EnergyAbsorption => PowerRule::new(
                "Absorb energy attacks and store them as AP",
                energy::energy_absorption,
            ),
            EnhancedAgility => PowerRule::new(
                "Agility is permanently increased",
                enhanced::enhanced_agility,
            ),
            EnhancedCharisma => PowerRule::new(
                "Charisma is permanently increased",
                enhanced::enhanced_charisma,
            ),
            EnhancedIntelligence => PowerRule::new(
                "Intelligence is permanently increased",
                enhanced::enhanced_intelligence,
            ),
            EnhancedStamina => PowerRule::new(
                "Stamina is permanently increased",
                enhanced::enhanced_stamina,
            ),
            EnhancedStrength => PowerRule::new(
                "Strength is permanently increased",
                enhanced::enhanced_strength,
            ),
            EnvironmentControl => PowerRule::new(
                "Alter temperature, humidity and other conditions in an area",
                elemental::environment_control,
            ),
            FastRecovery => PowerRule::new(
                "Recover from damage and fatigue far faster than normal",
                physical::fast_recovery,
            ),
            FlameGeneration => PowerRule::new(
                "Project flame, raise walls of fire and ignite objects; immune to own fire",
                elemental::flame_generation,
            ),
            Flight => PowerRule::new(
                "Fly under own power",
                movement::flight,
            ),
            ForceBeam => PowerRule::new(
                "A focused beam of a single energy type",
                energy::force_beam,
            ),
            ForceField => PowerRule::new(
                "An invisible barrier that absorbs incoming damage",
                energy::force_field,
            ),
            Gimmick => PowerRule::new(
                "A collection of gadgets and trick items",
                special::gimmick,
            ),
            GravityControl => PowerRule::new(
                "Increase or reduce gravity on targets or an area",
                elemental::gravity_control,
            ),
            HeightenedAttack => PowerRule::new(
                "Better chance to hit and extra damage",
                enhanced::heightened_attack,
            ),
            HeightenedDefense => PowerRule::new(
                "Harder to hit",
                enhanced::heightened_defense,
            ),
            HeightenedExpertise => PowerRule::new(
                "Expert skill in several fields",
                enhanced::heightened_expertise,
            ),
            HeightenedSenses => PowerRule::new(
                "One sense is raised to superhuman levels",
                enhanced::heightened_senses,
            ),
            HeightenedSpeed => PowerRule::new(
                "Run at superhuman speed and act more often",
                enhanced::heightened_speed,
            ),
            IceGeneration => PowerRule::new(
                "Project cold, build ice walls and slides, freeze targets",
                elemental::ice_generation,
            ),
            Immateriality => PowerRule::new(
                "Become intangible and pass through solid matter",
                physical::immateriality,
            ),
            Immortality => PowerRule::new(
                "Does not age and may return from death",
                physical::immortality,
            ),
            InherentPower => PowerRule::new(
                "A natural ability that is always on",
                special::inherent_power,
            ),
            Invisibility => PowerRule::new(
                "Cannot be seen by normal sight",
                mental::invisibility,
            ),
            Invulnerability => PowerRule::new(
                "Takes 1/4 damage; attacks of 2 or less do nothing",
                physical::invulnerability,
            ),
            LightGeneration => PowerRule::new(
                "Project light blasts, blinding flashes or steady illumination",
                elemental::light_generation,
            ),
            LightningControl => PowerRule::new(
                "Throw lightning bolts that can arc between targets",
                elemental::lightning_control,
            ),
            MagneticControl => PowerRule::new(
                "Move and shape metal with magnetic force",
                elemental::magnetic_control,
            ),
            MindControl => PowerRule::new(
                "Take over the actions of others who fail to resist",
                mental::mind_control,
            ),
            NaturalWeaponry => PowerRule::new(
                "Claws, fangs or similar natural weapons",
                physical::natural_weaponry,
            ),
            PlantControl => PowerRule::new(
                "Command plant life to grow, grasp and entangle",
                elemental::plant_control,
            ),
            Regeneration => PowerRule::new(
                "Heal wounds as they are received",
                physical::regeneration,
            ),
            ShapeChange => PowerRule::new(
                "Take the shape of other creatures",
                physical::shape_change,
            ),
            Shrinking => PowerRule::new(
                "Reduce size; harder to hit but weaker blows",
                physical::shrinking,
            ),
            SizeIncrease => PowerRule::new(
                "Grow larger and stronger; easier to hit",
                physical::size_increase,
            ),
            SonicGeneration => PowerRule::new(
                "Project sound as a blast, a stunning scream or a shattering tone",
                elemental::sonic_generation,
            ),
            Telekinesis => PowerRule::new(
                "Move objects with the mind",
                mental::telekinesis,
            ),
            Telepathy => PowerRule::new(
                "Read, send and probe thoughts",
                mental::telepathy,
            ),
            Teleportation => PowerRule::new(
                "Vanish and reappear elsewhere without crossing the space between",
                movement::teleportation,
            ),
            TimeTravel => PowerRule::new(
                "Travel into the past or future",
                movement::time_travel,
            ),
            Transmutation => PowerRule::new(
                "Change one substance into another",
                energy::transmutation,
            ),
            WaterGeneration => PowerRule::new(
                "Project water jets, flood an area and breathe underwater",
                elemental::water_generation,
            ),
            WeatherControl => PowerRule::new(
                "Summon and steer weather over a wide area",
                elemental::weather_control,
            ),
            WallCrawling => PowerRule::new(
                "Cling to and move along walls and ceilings",
                physical::wall_crawling,
            ),
        }
    }
}

/// A sub-ability with the same field set as a catalog row.
///
/// Used by powers that roll one of several fixed abilities, each of which
/// behaves like a small power of its own.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SubAbility {
    pub name: &'static str,
    pub details: &'static str,
    pub ap_cost: &'static str,
    pub max_ap: &'static str,
    pub area_effect: &'static str,
    pub damage_ap: &'static str,
    pub duration: &'static str,
    pub duration_unit: &'static str,
    pub range: &'static str,
    pub choices: &'static str,
}

impl SubAbility {
    /// The ability as a detail sub-table. Stat formulas in `Range` are
    /// resolved; everything else is copied verbatim.
    pub fn to_value(&self, ctx: &mut PowerContext<'_>) -> Value {
        let mut map = Map::new();
        map.insert("Name".into(), self.name.into());
        map.insert("StrDetails".into(), self.details.into());
        for (key, expr) in [
            ("APCost", self.ap_cost),
            ("MaxAP", self.max_ap),
            ("AreaEffect", self.area_effect),
            ("DamageAP", self.damage_ap),
            ("Duration", self.duration),
            ("DurationUnit", self.duration_unit),
            ("Choices", self.choices),
        ] {
            map.insert(key.into(), Formula::parse(expr).to_value());
        }
        map.insert("Range".into(), ctx.eval(self.range));
        Value::Object(map)
    }
}

/// A table keyed by position, `{"1": .., "2": ..}`.
pub(crate) fn numbered<I, V>(items: I) -> Value
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    Value::Object(
        items
            .into_iter()
            .enumerate()
            .map(|(i, v)| ((i + 1).to_string(), v.into()))
            .collect(),
    )
}

pub(crate) fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

/// A scratch character for exercising one rule in isolation.
#[cfg(test)]
pub(crate) struct Bench {
    pub baseline: crate::catalog::PowerBaseline,
    pub catalog: crate::catalog::PowerCatalog,
    pub gimmicks: crate::catalog::GimmickList,
    pub origin: crate::origin::Origin,
    pub stats: crate::stats::Statistics,
    pub detail: crate::detail::PowerDetail,
    pub roller: crate::roll::DiceRoller,
}

#[cfg(test)]
impl Bench {
    pub fn new(stats: &[(crate::stats::Stat, i64)]) -> Self {
        Self {
            baseline: crate::catalog::PowerBaseline::named("Test"),
            catalog: crate::catalog::PowerCatalog::new(),
            gimmicks: crate::catalog::GimmickList::default(),
            origin: crate::origin::Origin::default(),
            stats: stats.iter().copied().collect(),
            detail: crate::detail::PowerDetail::new(),
            roller: crate::roll::DiceRoller::seeded(3),
        }
    }

    pub fn run(&mut self, rule: ResolveFn) -> &crate::detail::PowerDetail {
        {
            let mut ctx = PowerContext {
                baseline: &self.baseline,
                catalog: &self.catalog,
                gimmicks: &self.gimmicks,
                origin: &self.origin,
                stats: &mut self.stats,
                detail: &mut self.detail,
                roller: &mut self.roller,
                device_ap: self.baseline.device_ap.clone(),
                device_range: self.baseline.device_range.clone(),
            };
            rule(&mut ctx).unwrap();
            ctx.fill_device();
        }
        &self.detail
    }
}
