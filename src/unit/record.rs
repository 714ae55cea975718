//! Converted unit records
//!
//! The stat-conversion pipeline emits a JSON roster of converted stat blocks;
//! this module mirrors that shape. The engine assumes records are well-formed
//! apart from the setup-time checks in `encounter::setup` — validation of the
//! raw tabletop numbers is the converter's job.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::Result;

/// Five ability scores.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatBlock {
    #[serde(rename = "Fighting", default)]
    pub fighting: i32,
    #[serde(rename = "Strength", default)]
    pub strength: i32,
    #[serde(rename = "Dexterity", default)]
    pub dexterity: i32,
    #[serde(rename = "Agility", default)]
    pub agility: i32,
    #[serde(rename = "Awareness", default)]
    pub awareness: i32,
}

/// Three defense scores.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefenseBlock {
    #[serde(rename = "Toughness", default)]
    pub toughness: i32,
    #[serde(rename = "Parry", default)]
    pub parry: i32,
    #[serde(rename = "Dodge", default)]
    pub dodge: i32,
}

/// Movement rates in meters per time unit, one per environment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MovementBlock {
    #[serde(rename = "Land", default)]
    pub land: f64,
    #[serde(rename = "Water", default)]
    pub water: f64,
    #[serde(rename = "Air", default)]
    pub air: f64,
}

/// One entry in a record's power list.
///
/// Key usage drifted across converter versions: attack powers carry `Damage`,
/// defensive powers carry `Rank`, and some drafts use them interchangeably.
/// Both are kept optional here; `unit::capability` sorts it out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerRecord {
    #[serde(rename = "Type")]
    pub power_type: String,
    #[serde(rename = "Rank", default)]
    pub rank: Option<i32>,
    #[serde(rename = "Damage", default)]
    pub damage: Option<i32>,
    #[serde(rename = "Senses", default)]
    pub senses: Option<Vec<String>>,
    #[serde(rename = "Extras", default)]
    pub extras: Option<Vec<String>>,
    #[serde(rename = "Power Points", default)]
    pub power_points: Option<f64>,
}

impl PowerRecord {
    /// The power's effective rank, whichever key the converter used.
    pub fn effective_rank(&self) -> Option<i32> {
        self.rank.or(self.damage)
    }
}

/// A full converted unit record as read from the roster file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoidRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Stats", default)]
    pub stats: StatBlock,
    #[serde(rename = "Defenses", default)]
    pub defenses: DefenseBlock,
    #[serde(rename = "Movement", default)]
    pub movement: MovementBlock,
    #[serde(rename = "Powers", default)]
    pub powers: Vec<PowerRecord>,
    #[serde(rename = "Total Power Points", default)]
    pub total_power_points: f64,
    #[serde(rename = "Power Level", default)]
    pub power_level: i32,
    #[serde(rename = "Power Level Source", default)]
    pub power_level_source: Vec<String>,
    #[serde(rename = "Cost", default)]
    pub cost: f64,
}

/// Load a converted roster from a JSON file.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<ZoidRecord>> {
    let data = std::fs::read_to_string(path)?;
    let records: Vec<ZoidRecord> = serde_json::from_str(&data)?;
    Ok(records)
}
