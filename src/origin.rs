//! Character origins.

use crate::roll::Roller;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the character came by their powers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OriginKind {
    Mutant,
    #[serde(rename = "Self Developed")]
    SelfDeveloped,
    Supernatural,
    #[serde(rename = "Designed or Sponsored")]
    DesignedOrSponsored,
    Alien,
    #[serde(rename = "Accidental/Scientific")]
    AccidentalScientific,
}

impl OriginKind {
    pub fn as_str(self) -> &'static str {
        match self {
            OriginKind::Mutant => "Mutant",
            OriginKind::SelfDeveloped => "Self Developed",
            OriginKind::Supernatural => "Supernatural",
            OriginKind::DesignedOrSponsored => "Designed or Sponsored",
            OriginKind::Alien => "Alien",
            OriginKind::AccidentalScientific => "Accidental/Scientific",
        }
    }
}

impl fmt::Display for OriginKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Natural lifespan: human, or a number of years for aliens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Lifespan {
    Years(i64),
    Named(String),
}

impl Default for Lifespan {
    fn default() -> Self {
        Lifespan::Named("Human".to_string())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Artifact {
    Yes,
    #[default]
    No,
}

/// The `Origin` block of a character record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Origin {
    #[serde(rename = "Origin", skip_serializing_if = "Option::is_none")]
    pub kind: Option<OriginKind>,
    #[serde(rename = "Age")]
    pub age: i64,
    #[serde(rename = "Lifespan")]
    pub lifespan: Lifespan,
    #[serde(rename = "Artifact")]
    pub artifact: Artifact,
}

impl Origin {
    /// True if the origin has been rolled and is `kind`.
    pub fn is(&self, kind: OriginKind) -> bool {
        self.kind == Some(kind)
    }
}

/// Roll an origin on a d10.
///
/// ```text
/// 1-3  Mutant                 age 1d12+15
/// 4    Self Developed         age 1d12+25
/// 5    Supernatural           age 1d10+20
/// 6    Designed or Sponsored  age 1d12+25
/// 7-9  Accidental/Scientific  age 1d8 x 1d6 + 25, 5% artifact
/// 10   Alien                  age 1d10 x 1d6, lifespan 1d20 x 1d20
/// ```
pub fn roll_origin<R: Roller + ?Sized>(roller: &mut R) -> Origin {
    let mut origin = Origin::default();
    let (kind, age) = match roller.roll_range(1, 10) {
        1..=3 => (OriginKind::Mutant, roller.roll_die(12) + 15),
        4 => (OriginKind::SelfDeveloped, roller.roll_die(12) + 25),
        5 => (OriginKind::Supernatural, roller.roll_die(10) + 20),
        6 => (OriginKind::DesignedOrSponsored, roller.roll_die(12) + 25),
        10 => {
            let age = roller.roll_die(10) * roller.roll_die(6);
            origin.lifespan = Lifespan::Years(roller.roll_die(20) * roller.roll_die(20));
            (OriginKind::Alien, age)
        }
        _ => {
            let age = roller.roll_die(8) * roller.roll_die(6) + 25;
            if roller.chance(5) {
                origin.artifact = Artifact::Yes;
            }
            (OriginKind::AccidentalScientific, age)
        }
    };
    origin.kind = Some(kind);
    origin.age = age;
    tracing::debug!(origin = %kind, age, "rolled origin");
    origin
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roll::DiceRoller;

    #[test]
    fn test_origin_json_shape() {
        let origin = Origin {
            kind: Some(OriginKind::AccidentalScientific),
            age: 40,
            lifespan: Lifespan::default(),
            artifact: Artifact::Yes,
        };
        let json = serde_json::to_value(&origin).unwrap();
        assert_eq!(json["Origin"], "Accidental/Scientific");
        assert_eq!(json["Age"], 40);
        assert_eq!(json["Lifespan"], "Human");
        assert_eq!(json["Artifact"], "Yes");
    }

    #[test]
    fn test_partial_origin_deserializes() {
        let origin: Origin = serde_json::from_str(r#"{"Origin": "Supernatural", "Age": 31}"#).unwrap();
        assert!(origin.is(OriginKind::Supernatural));
        assert_eq!(origin.artifact, Artifact::No);
    }

    #[test]
    fn test_rolled_ages_in_range() {
        let mut roller = DiceRoller::seeded(2024);
        for _ in 0..500 {
            let origin = roll_origin(&mut roller);
            let age = origin.age;
            match origin.kind.unwrap() {
                OriginKind::Mutant => assert!((16..=27).contains(&age)),
                OriginKind::SelfDeveloped | OriginKind::DesignedOrSponsored => {
                    assert!((26..=37).contains(&age))
                }
                OriginKind::Supernatural => assert!((21..=30).contains(&age)),
                OriginKind::Alien => {
                    assert!((1..=60).contains(&age));
                    assert!(matches!(origin.lifespan, Lifespan::Years(1..=400)));
                }
                OriginKind::AccidentalScientific => assert!((26..=73).contains(&age)),
            }
            if origin.artifact == Artifact::Yes {
                assert_eq!(origin.kind, Some(OriginKind::AccidentalScientific));
            }
        }
    }
}
