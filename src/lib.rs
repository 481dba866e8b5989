//! # squadron - Superhero Power Generation
//!
//! Rolls the powers of a superhero role-playing character and writes their
//! derived details into a character record:
//! - **Catalog-driven** baselines loaded from a CSV table of powers
//! - **Dice formulas** such as `2d6`, `1d10x10` and `2d4x4+3`
//! - **One rule per power**, registered in a replaceable lookup table
//! - **Injectable randomness**, so any build can be replayed from a seed
//!
//! ## Core Concepts
//!
//! ### Resolution Pipeline
//!
//! Each power flows through the same steps:
//!
//! ```text
//! [PowerCatalog] → baseline → [PowerRule] → [PowerDetail] (+ Device)
//! ```
//!
//! 1. **Baseline** fields are copied verbatim from the catalog row
//! 2. **Rules** derive power-specific fields from the character's statistics
//!    and random rolls
//! 3. **Devices** seeded by the caller get their own AP and range
//!
//! ### Key Features
//!
//! - **Formula model**: catalog cells are classified once into literals,
//!   dice, stat references and sentinels (see [`Formula`])
//! - **Order matters**: Enhanced statistics change what later rules read;
//!   callers choose the order
//! - **Record friendly**: [`Character`] round-trips the JSON character
//!   format, keeping keys it does not model
//!
//! ## Example
//!
//! ```rust
//! use squadron::*;
//! use std::sync::Arc;
//!
//! let csv = "Power,APCost,MaxAP,AreaEffect,DeviceAP,DamageAP,Duration,DurationUnit,Range,DeviceRange,Choices\n\
//!            Air Generation,2,20,Variable,2d6,1d6,Variable,Turns,Stamina+Agility,1d10x10,\n";
//! let catalog = PowerCatalog::from_reader(csv.as_bytes()).unwrap();
//! let resolver = PowerResolver::new(Arc::new(catalog), Arc::new(GimmickList::default()));
//!
//! let stats = [(Stat::Stamina, 15), (Stat::Agility, 5)].into_iter().collect();
//! let mut character = Character::new(stats);
//! let mut roller = DiceRoller::seeded(1);
//!
//! resolver.add_power("Air Generation", &mut character, &mut roller).unwrap();
//!
//! let air = character.detail("Air Generation").unwrap();
//! assert_eq!(air.get("Blast").unwrap()["Range"], 40);
//! assert_eq!(air.get("Storm").unwrap()["AreaEffect"], 3);
//! ```
//!
//! ## Modules
//!
//! - [`dice`] - Dice formulas and the evaluator
//! - [`roll`] - Random primitives and the `Roller` trait
//! - [`stats`] - Character statistics
//! - [`origin`] - Character origins
//! - [`catalog`] - Power catalog and gimmick list
//! - [`character`] - The character record
//! - [`detail`] - Per-power detail blocks
//! - [`context`] - What a rule sees while it runs
//! - [`powers`] - The rules themselves
//! - [`resolver`] - Main power resolver
//! - [`config`] - Where data files are found
//! - [`error`] - Error types

pub mod catalog;
pub mod character;
pub mod config;
pub mod context;
pub mod detail;
pub mod dice;
pub mod error;
pub mod numeric;
pub mod origin;
pub mod powers;
pub mod resolver;
pub mod roll;
pub mod stats;

// Re-export main types for convenience
pub use catalog::{GimmickList, PowerBaseline, PowerCatalog};
pub use character::{Character, Powers};
pub use config::DataConfig;
pub use context::PowerContext;
pub use detail::PowerDetail;
pub use dice::{evaluate, Evaluated, Formula, Sentinel};
pub use error::PowerError;
pub use origin::{roll_origin, Origin, OriginKind};
pub use powers::{Power, PowerRule};
pub use resolver::PowerResolver;
pub use roll::{DiceRoller, Roller};
pub use stats::{roll_main_statistics, Stat, Statistics};
