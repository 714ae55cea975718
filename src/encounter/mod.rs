//! Encounter state and orchestration

pub mod decision;
pub mod events;
pub mod setup;
pub mod turn;

use serde::{Deserialize, Serialize};

use crate::core::{Environment, Result, Side, SkirmishError};
use crate::dice::RollSource;
use crate::unit::Zoid;

pub use decision::{
    AttackRequest, BlindMovementChoice, BlindMovementRequest, DazedAction, DazedActionRequest,
    DecisionProvider, MovementChoice, MovementRequest, ScriptedDecisions, ToggleChoice,
    ToggleRequest,
};
pub use events::{EventLog, MovementKind, NarrationEvent, NarrationSink};
pub use setup::{eligible_units, roster_order};
pub use turn::{EncounterResult, TurnEngine};

/// A two-unit encounter: the units, the environment, the scalar distance
/// between them, and the fixed turn order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Encounter {
    pub(crate) units: [Zoid; 2],
    pub(crate) environment: Environment,
    pub(crate) distance: f64,
    /// Decided once by a coin flip at setup, then fixed
    pub(crate) order: [Side; 2],
    pub(crate) turn_index: u64,
}

impl Encounter {
    /// Set up an encounter. Both units must be able to operate in the
    /// chosen environment, and the starting distance must be non-negative.
    pub fn new(
        first: Zoid,
        second: Zoid,
        environment: Environment,
        distance: f64,
        rolls: &mut dyn RollSource,
    ) -> Result<Self> {
        if distance < 0.0 {
            return Err(SkirmishError::NegativeDistance(distance));
        }
        for unit in [&first, &second] {
            if unit.speed(environment) <= 0.0 {
                return Err(SkirmishError::NoMobility(
                    unit.name().to_string(),
                    environment,
                ));
            }
        }

        let order = if rolls.coin_flip() {
            [Side::First, Side::Second]
        } else {
            [Side::Second, Side::First]
        };

        Ok(Self {
            units: [first, second],
            environment,
            distance,
            order,
            turn_index: 0,
        })
    }

    pub fn unit(&self, side: Side) -> &Zoid {
        &self.units[side.index()]
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn turn_index(&self) -> u64 {
        self.turn_index
    }

    /// The side whose turn it is.
    pub fn active_side(&self) -> Side {
        self.order[(self.turn_index % 2) as usize]
    }

    /// The side that moves first.
    pub fn first_mover(&self) -> Side {
        self.order[0]
    }

    /// The standing side once its opponent is defeated.
    pub fn winner(&self) -> Option<Side> {
        for side in [Side::First, Side::Second] {
            if self.unit(side).status().is_defeated() {
                return Some(side.opponent());
            }
        }
        None
    }

    pub fn is_over(&self) -> bool {
        self.winner().is_some()
    }
}
