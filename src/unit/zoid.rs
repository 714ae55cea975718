//! Combat unit model
//!
//! A `Zoid` is built once from a converted record: immutable scores plus the
//! resolved capability table, alongside the mutable battle state the combat
//! systems drive. State transitions with invariants (dent monotonicity, the
//! shield latch, terminal defeat) go through methods, not raw field writes.

use serde::{Deserialize, Serialize};

use crate::combat::range::normalize_facing;
use crate::combat::status::Status;
use crate::core::{Environment, Result, SkirmishError};
use crate::unit::capability::Capabilities;
use crate::unit::record::{DefenseBlock, MovementBlock, StatBlock, ZoidRecord};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zoid {
    name: String,
    pub stats: StatBlock,
    pub defenses: DefenseBlock,
    movement: MovementBlock,
    pub capabilities: Capabilities,
    /// Roster ordering key, not consumed by combat logic
    pub power_level: i32,

    // Battle state
    status: Status,
    dents: u32,
    shield_active: bool,
    shield_disabled: bool,
    concealment_active: bool,
    facing: f64,
}

impl Zoid {
    /// Build a unit from a converted record.
    ///
    /// Rejects records that could never participate: a blank name, or a power
    /// list that resolves to no capabilities at all.
    pub fn from_record(record: &ZoidRecord) -> Result<Self> {
        if record.name.trim().is_empty() {
            return Err(SkirmishError::MissingName);
        }

        let capabilities = Capabilities::from_powers(&record.powers);
        if capabilities == Capabilities::default() {
            return Err(SkirmishError::NoCapabilities(record.name.clone()));
        }

        Ok(Self {
            name: record.name.clone(),
            stats: record.stats.clone(),
            defenses: record.defenses.clone(),
            movement: record.movement.clone(),
            capabilities,
            power_level: record.power_level,
            status: Status::Intact,
            dents: 0,
            shield_active: false,
            shield_disabled: false,
            concealment_active: false,
            facing: 0.0,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn dents(&self) -> u32 {
        self.dents
    }

    pub fn facing(&self) -> f64 {
        self.facing
    }

    pub fn shield_active(&self) -> bool {
        self.shield_active
    }

    pub fn shield_disabled(&self) -> bool {
        self.shield_disabled
    }

    pub fn concealment_active(&self) -> bool {
        self.concealment_active
    }

    /// Movement rate for the battle environment.
    pub fn speed(&self, environment: Environment) -> f64 {
        match environment {
            Environment::Land => self.movement.land,
            Environment::Water => self.movement.water,
            Environment::Air => self.movement.air,
        }
    }

    /// Has an undisabled shield capability (whether or not it is raised).
    pub fn has_shield(&self) -> bool {
        self.capabilities.shield.is_some() && !self.shield_disabled
    }

    /// Shield is raised and still functional; such a shield intercepts
    /// in-arc hits and forbids attacking.
    pub fn shield_ready(&self) -> bool {
        self.shield_active && self.has_shield()
    }

    pub fn has_concealment(&self) -> bool {
        self.capabilities.concealment.is_some()
    }

    /// Concealment is engaged and backed by an actual capability.
    pub fn concealed(&self) -> bool {
        self.concealment_active && self.has_concealment()
    }

    /// Toggle the shield. No-op once the shield is disabled; the latch is
    /// one-way for the rest of the encounter.
    pub fn toggle_shield(&mut self) {
        if self.has_shield() {
            self.shield_active = !self.shield_active;
        }
    }

    pub fn toggle_concealment(&mut self) {
        if self.has_concealment() {
            self.concealment_active = !self.concealment_active;
        }
    }

    /// Latch the shield as permanently disabled.
    pub fn disable_shield(&mut self) {
        self.shield_disabled = true;
    }

    /// Record one dent. Dents only ever accumulate.
    pub fn add_dent(&mut self) {
        self.dents += 1;
    }

    /// Apply a status transition. Defeat is terminal; nothing moves a
    /// defeated unit back up the ladder.
    pub fn set_status(&mut self, status: Status) {
        if self.status.is_defeated() {
            return;
        }
        self.status = status;
    }

    /// Set the facing angle, normalized into [0, 360).
    pub fn set_facing(&mut self, angle: f64) {
        self.facing = normalize_facing(angle);
    }
}

/// Structured per-unit summary for presentation layers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitReport {
    pub name: String,
    pub status: Status,
    pub dents: u32,
    pub shield_active: bool,
    pub shield_disabled: bool,
    pub shield_rank: Option<i32>,
    pub concealment_active: bool,
    pub concealment_rank: Option<i32>,
    pub facing: f64,
}

impl Zoid {
    pub fn report(&self) -> UnitReport {
        UnitReport {
            name: self.name.clone(),
            status: self.status,
            dents: self.dents,
            shield_active: self.shield_active,
            shield_disabled: self.shield_disabled,
            shield_rank: self.capabilities.shield,
            concealment_active: self.concealment_active,
            concealment_rank: self.capabilities.concealment,
            facing: self.facing,
        }
    }
}
