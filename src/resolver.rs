//! Power resolver module.
//!
//! Provides the `PowerResolver` type, the main entry point for turning a
//! power name into a filled-in detail block on a character. It owns the
//! shared catalog and gimmick list and a lookup table from [`Power`] to
//! its [`PowerRule`].

use crate::catalog::{GimmickList, PowerCatalog};
use crate::character::Character;
use crate::config::DataConfig;
use crate::context::PowerContext;
use crate::detail::DEVICE_KEY;
use crate::error::PowerError;
use crate::powers::{Power, PowerRule};
use crate::roll::Roller;
use std::collections::HashMap;
use std::sync::Arc;

/// Resolves powers onto characters.
///
/// Resolving a power:
/// 1. Looks up the power's baseline in the catalog
/// 2. Copies the baseline fields into the character's detail block
/// 3. Runs the power's rule to derive its own fields
/// 4. Fills `DeviceAP` and `DeviceRange` if the caller seeded a device
///
/// Rules run in the order the caller asks for them. Some rules change
/// statistics that later rules read (Enhanced Strength before Flight gives
/// a faster flyer), and the resolver does nothing to reorder them.
///
/// The catalog and gimmick list are read-only after loading and are held
/// behind `Arc`, so one set of data files can back many resolvers.
///
/// # Examples
///
/// ```rust
/// use squadron::*;
/// use std::sync::Arc;
///
/// let csv = "Power,APCost,MaxAP,AreaEffect,DeviceAP,DamageAP,Duration,DurationUnit,Range,DeviceRange,Choices\n\
///            Armour,2,20,NotApplicable,1d6+2,NotApplicable,Variable,Turns,Self,NotApplicable,\n";
/// let catalog = Arc::new(PowerCatalog::from_reader(csv.as_bytes()).unwrap());
/// let resolver = PowerResolver::new(catalog, Arc::new(GimmickList::default()));
///
/// let mut character = Character::default();
/// let mut roller = DiceRoller::seeded(7);
/// resolver.add_power("Armour", &mut character, &mut roller).unwrap();
///
/// let armour = character.detail("Armour").unwrap();
/// assert_eq!(armour.get_i64("APCost"), Some(2));
/// assert_eq!(armour.get("DamageReduction").unwrap()["HTH"], "1/3");
/// ```
#[derive(Debug, Clone)]
pub struct PowerResolver {
    catalog: Arc<PowerCatalog>,
    gimmicks: Arc<GimmickList>,
    rules: HashMap<Power, PowerRule>,
}

impl PowerResolver {
    /// Create a resolver with every built-in rule registered.
    pub fn new(catalog: Arc<PowerCatalog>, gimmicks: Arc<GimmickList>) -> Self {
        let rules = Power::ALL
            .iter()
            .map(|power| (*power, power.rule()))
            .collect();
        Self {
            catalog,
            gimmicks,
            rules,
        }
    }

    /// Load both data files from the locations in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`PowerError::DataFileNotFound`] naming every path tried if
    /// either file is missing, or [`PowerError::MalformedData`] if one
    /// cannot be parsed.
    pub fn from_config(config: &DataConfig) -> Result<Self, PowerError> {
        let catalog = PowerCatalog::load(config)?;
        let gimmicks = GimmickList::load(config)?;
        Ok(Self::new(Arc::new(catalog), Arc::new(gimmicks)))
    }

    /// The power catalog this resolver reads baselines from.
    pub fn catalog(&self) -> &PowerCatalog {
        &self.catalog
    }

    /// The gimmick list used by the Gimmick rule.
    pub fn gimmicks(&self) -> &GimmickList {
        &self.gimmicks
    }

    /// Replace the rule for `power`, returning the one it replaces.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use squadron::*;
    /// use std::sync::Arc;
    ///
    /// fn tough_skin(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
    ///     ctx.set("DamageReduction", "1/4");
    ///     Ok(())
    /// }
    ///
    /// let mut resolver = PowerResolver::new(
    ///     Arc::new(PowerCatalog::new()),
    ///     Arc::new(GimmickList::default()),
    /// );
    /// let old = resolver.register(Power::Armour, PowerRule::new("House armour", tough_skin));
    /// assert!(old.is_some());
    /// ```
    pub fn register(&mut self, power: Power, rule: PowerRule) -> Option<PowerRule> {
        self.rules.insert(power, rule)
    }

    /// The rule currently registered for `power`.
    pub fn rule(&self, power: Power) -> Option<&PowerRule> {
        self.rules.get(&power)
    }

    fn rule_for(&self, name: &str) -> Result<&PowerRule, PowerError> {
        Power::from_name(name)
            .and_then(|power| self.rules.get(&power))
            .ok_or_else(|| PowerError::UnknownPower(name.to_string()))
    }

    /// Resolve `name` onto `character`.
    ///
    /// Everything the power wrote on a previous run is replaced; a caller
    /// seeded `Device` block is kept and refilled.
    ///
    /// # Arguments
    ///
    /// * `name` - Exact, case-sensitive power name
    /// * `character` - The character being built
    /// * `roller` - Source of every random draw
    ///
    /// # Errors
    ///
    /// Returns [`PowerError::MissingPower`] if the catalog has no row for
    /// `name`, and [`PowerError::UnknownPower`] if it has a row but no rule
    /// is registered.
    pub fn resolve(
        &self,
        name: &str,
        character: &mut Character,
        roller: &mut dyn Roller,
    ) -> Result<(), PowerError> {
        let baseline = self.catalog.get(name)?;
        let rule = self.rule_for(name)?;

        let Character {
            statistics,
            origin,
            powers,
            ..
        } = character;
        let detail = powers.detail.entry(name.to_string()).or_default();
        if detail.contains_key(DEVICE_KEY) && !detail.has_device() {
            tracing::warn!(power = name, "Device entry is not an object, ignoring it");
        }

        detail.reset();
        detail.set("StrDetails", rule.details);
        detail.apply_baseline(baseline);

        let mut ctx = PowerContext {
            baseline,
            catalog: &self.catalog,
            gimmicks: &self.gimmicks,
            origin,
            stats: statistics,
            detail,
            roller,
            device_ap: baseline.device_ap.clone(),
            device_range: baseline.device_range.clone(),
        };
        (rule.resolve)(&mut ctx)?;
        ctx.fill_device();

        tracing::debug!(
            power = name,
            device = ctx.has_device(),
            fields = ctx.detail.as_map().len(),
            "resolved power"
        );
        Ok(())
    }

    /// Give `character` a new power: append it to `Powers.List`, update
    /// `Powers.Number`, seed its detail entry and resolve it.
    pub fn add_power(
        &self,
        name: &str,
        character: &mut Character,
        roller: &mut dyn Roller,
    ) -> Result<(), PowerError> {
        self.catalog.get(name)?;
        self.rule_for(name)?;
        character.add_to_list(name);
        self.resolve(name, character, roller)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PowerBaseline;
    use crate::dice::Formula;
    use crate::roll::DiceRoller;
    use crate::stats::Stat;

    fn catalog_with(names: &[&str]) -> Arc<PowerCatalog> {
        let mut catalog = PowerCatalog::new();
        for name in names {
            let mut baseline = PowerBaseline::named(*name);
            baseline.ap_cost = Formula::parse("2");
            baseline.device_ap = Formula::parse("1d6+2");
            baseline.device_range = Formula::parse("NotApplicable");
            catalog.insert(baseline).unwrap();
        }
        Arc::new(catalog)
    }

    fn resolver(names: &[&str]) -> PowerResolver {
        PowerResolver::new(catalog_with(names), Arc::new(GimmickList::default()))
    }

    #[test]
    fn test_every_power_has_a_rule() {
        let resolver = resolver(&[]);
        for power in Power::ALL {
            assert!(resolver.rule(*power).is_some(), "{power} has no rule");
        }
    }

    #[test]
    fn test_missing_catalog_row() {
        let resolver = resolver(&[]);
        let mut character = Character::default();
        let err = resolver
            .resolve("Armour", &mut character, &mut DiceRoller::seeded(1))
            .unwrap_err();
        assert_eq!(err, PowerError::MissingPower("Armour".into()));
    }

    #[test]
    fn test_catalog_row_without_rule() {
        let resolver = resolver(&["Weather Magic"]);
        let mut character = Character::default();
        let err = resolver
            .resolve("Weather Magic", &mut character, &mut DiceRoller::seeded(1))
            .unwrap_err();
        assert_eq!(err, PowerError::UnknownPower("Weather Magic".into()));
    }

    #[test]
    fn test_add_power_bookkeeping() {
        let resolver = resolver(&["Armour", "Flight"]);
        let mut character = Character::default();
        let mut roller = DiceRoller::seeded(2);
        resolver.add_power("Armour", &mut character, &mut roller).unwrap();
        resolver.add_power("Flight", &mut character, &mut roller).unwrap();
        assert_eq!(character.powers.number, 2);
        assert_eq!(character.powers.list, vec!["Armour", "Flight"]);
        assert!(resolver.add_power("Nope", &mut character, &mut roller).is_err());
        assert_eq!(character.powers.number, 2);
    }

    #[test]
    fn test_device_is_filled_and_kept() {
        let resolver = resolver(&["Armour"]);
        let mut character = Character::default();
        character.seed_device("Armour");
        resolver
            .resolve("Armour", &mut character, &mut DiceRoller::seeded(4))
            .unwrap();
        let device = character.detail("Armour").unwrap().device().unwrap();
        let ap = device["DeviceAP"].as_i64().unwrap();
        assert!((3..=8).contains(&ap));
        assert_eq!(device["DeviceRange"], "NotApplicable");
    }

    #[test]
    fn test_overflowing_device_formula_is_kept_as_text() {
        let mut catalog = PowerCatalog::new();
        let mut baseline = PowerBaseline::named("Armour");
        baseline.device_ap = Formula::parse("3d6x4611686018427387904");
        baseline.device_range = Formula::parse("50000000d6");
        catalog.insert(baseline).unwrap();
        let resolver = PowerResolver::new(Arc::new(catalog), Arc::new(GimmickList::default()));

        let mut character = Character::default();
        character.seed_device("Armour");
        resolver
            .resolve("Armour", &mut character, &mut DiceRoller::seeded(4))
            .unwrap();
        let device = character.detail("Armour").unwrap().device().unwrap();
        assert_eq!(device["DeviceAP"], "3d6x4611686018427387904");
        assert_eq!(device["DeviceRange"], "50000000d6");
    }

    #[test]
    fn test_register_overrides_rule() {
        fn flat(ctx: &mut PowerContext<'_>) -> Result<(), PowerError> {
            ctx.set("Flat", true);
            Ok(())
        }
        let mut resolver = resolver(&["Flight"]);
        resolver.register(Power::Flight, PowerRule::new("Flat", flat));
        let mut character = Character::new([(Stat::Agility, 10)].into_iter().collect());
        resolver
            .resolve("Flight", &mut character, &mut DiceRoller::seeded(1))
            .unwrap();
        let detail = character.detail("Flight").unwrap();
        assert_eq!(detail.get_str("StrDetails"), Some("Flat"));
        assert!(!detail.contains_key("Speed"));
    }
}
