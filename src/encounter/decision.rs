//! Decision points
//!
//! The orchestrator suspends at each decision by calling into a
//! `DecisionProvider`: a console prompt, a UI event pump, or a scripted test
//! driver. Each request carries the legal option set and any computed bound
//! so the presentation layer can validate input before answering; answers
//! that still land out of bounds are rejected and the request re-issued.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::combat::{CircleDirection, RangeBand};

/// Movement options while the opponent is located.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MovementChoice {
    Close,
    Retreat,
    Circle {
        direction: CircleDirection,
        degrees: f64,
    },
    StandStill,
}

/// Movement options while the opponent is concealed and unlocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlindMovementChoice {
    /// Move half speed in a random direction, then search again.
    Probe,
    /// Hold position; no further search this turn.
    StandStill,
}

/// A dazed unit's single action for the turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DazedAction {
    Move,
    Attack,
    Skip,
}

/// Request for a movement decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementRequest {
    pub unit: String,
    pub distance: f64,
    pub speed: f64,
    /// Upper bound for a circling angle this turn
    pub max_circle_degrees: f64,
}

/// Request for a blind movement decision (opponent unlocated).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlindMovementRequest {
    pub unit: String,
    pub distance: f64,
    /// Probe speed, already halved
    pub probe_speed: f64,
}

/// Request for the dazed move-or-attack choice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DazedActionRequest {
    pub unit: String,
    pub distance: f64,
}

/// Request for shield/stealth toggles. Always issued, whatever the status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleRequest {
    pub unit: String,
    pub shield_available: bool,
    pub shield_active: bool,
    pub stealth_available: bool,
    pub stealth_active: bool,
}

/// Answer to a toggle request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleChoice {
    pub toggle_shield: bool,
    pub toggle_stealth: bool,
}

/// Request for the attack yes/no decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttackRequest {
    pub unit: String,
    pub target: String,
    pub band: RangeBand,
    /// The target is concealed and was not located this turn; an attack
    /// carries the 50% blind-miss chance.
    pub target_unlocated: bool,
}

/// Supplies answers at each decision point.
///
/// Implementations may block (console prompt), pump an event loop (GUI), or
/// answer instantly (scripted tests). The engine holds no state between
/// calls beyond the encounter itself.
pub trait DecisionProvider {
    fn movement(&mut self, request: &MovementRequest) -> MovementChoice;
    fn blind_movement(&mut self, request: &BlindMovementRequest) -> BlindMovementChoice;
    fn dazed_action(&mut self, request: &DazedActionRequest) -> DazedAction;
    fn toggles(&mut self, request: &ToggleRequest) -> ToggleChoice;
    fn attack(&mut self, request: &AttackRequest) -> bool;
}

/// Scripted decisions for tests and replays.
///
/// Queued answers are consumed front-to-back; when a queue runs dry the
/// provider falls back to a passive default (stand still, skip, no toggles)
/// or to the configured standing attack policy.
#[derive(Debug, Default)]
pub struct ScriptedDecisions {
    movements: VecDeque<MovementChoice>,
    blind_movements: VecDeque<BlindMovementChoice>,
    dazed_actions: VecDeque<DazedAction>,
    toggles: VecDeque<ToggleChoice>,
    attacks: VecDeque<bool>,
    attack_by_default: bool,
}

impl ScriptedDecisions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attack whenever asked and the queue is empty.
    pub fn attack_by_default(mut self) -> Self {
        self.attack_by_default = true;
        self
    }

    pub fn queue_movement(&mut self, choice: MovementChoice) -> &mut Self {
        self.movements.push_back(choice);
        self
    }

    pub fn queue_blind_movement(&mut self, choice: BlindMovementChoice) -> &mut Self {
        self.blind_movements.push_back(choice);
        self
    }

    pub fn queue_dazed_action(&mut self, action: DazedAction) -> &mut Self {
        self.dazed_actions.push_back(action);
        self
    }

    pub fn queue_toggles(&mut self, choice: ToggleChoice) -> &mut Self {
        self.toggles.push_back(choice);
        self
    }

    pub fn queue_attack(&mut self, attack: bool) -> &mut Self {
        self.attacks.push_back(attack);
        self
    }
}

impl DecisionProvider for ScriptedDecisions {
    fn movement(&mut self, _request: &MovementRequest) -> MovementChoice {
        self.movements.pop_front().unwrap_or(MovementChoice::StandStill)
    }

    fn blind_movement(&mut self, _request: &BlindMovementRequest) -> BlindMovementChoice {
        self.blind_movements
            .pop_front()
            .unwrap_or(BlindMovementChoice::StandStill)
    }

    fn dazed_action(&mut self, _request: &DazedActionRequest) -> DazedAction {
        self.dazed_actions.pop_front().unwrap_or(DazedAction::Skip)
    }

    fn toggles(&mut self, _request: &ToggleRequest) -> ToggleChoice {
        self.toggles.pop_front().unwrap_or_default()
    }

    fn attack(&mut self, _request: &AttackRequest) -> bool {
        self.attacks.pop_front().unwrap_or(self.attack_by_default)
    }
}
