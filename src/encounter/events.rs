//! Narration events
//!
//! The engine performs no IO; every check, roll, and outcome is emitted as a
//! structured event into a caller-supplied sink. A console front-end renders
//! them as text, a GUI as whatever it likes, and tests assert on them.

use serde::{Deserialize, Serialize};

use crate::combat::{AttackOutcome, CircleDirection, RangeBand, SearchCheck, Status};
use crate::core::{Environment, Side};

/// How the active unit moved this turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementKind {
    Closed,
    Retreated,
}

/// One narration event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum NarrationEvent {
    EncounterStarted {
        first_mover: String,
        second_mover: String,
        environment: Environment,
        distance: f64,
    },
    TurnBegan {
        turn_index: u64,
        active: String,
        distance: f64,
    },
    /// The opponent entered the turn with concealment engaged.
    OpponentConcealed {
        unit: String,
    },
    SearchResolved {
        searcher: String,
        target: String,
        check: SearchCheck,
    },
    /// Active unit is stunned: toggles only this turn.
    StunnedNoAction {
        unit: String,
    },
    /// Active unit is dazed: it may move or attack, not both.
    DazedRestriction {
        unit: String,
    },
    Moved {
        unit: String,
        kind: MovementKind,
        distance_after: f64,
    },
    Circled {
        unit: String,
        direction: CircleDirection,
        degrees: f64,
        facing_after: f64,
    },
    HeldPosition {
        unit: String,
    },
    /// Blind probe against an unlocated opponent: random direction at half
    /// speed, followed by a fresh search check.
    BlindProbe {
        unit: String,
        kind: MovementKind,
        distance_after: f64,
    },
    ShieldToggled {
        unit: String,
        active: bool,
    },
    StealthToggled {
        unit: String,
        active: bool,
    },
    /// A raised shield forbids attacking; the attack phase is skipped.
    AttackForbiddenByShield {
        unit: String,
    },
    /// Movement already used the dazed unit's single action.
    AttackSpentOnMovement {
        unit: String,
    },
    /// No capability reaches the current band; forced no-op.
    OutOfReach {
        unit: String,
        band: RangeBand,
    },
    AttackDeclined {
        unit: String,
    },
    AttackLaunched {
        attacker: String,
        target: String,
        band: RangeBand,
    },
    AttackResolved {
        attacker: String,
        target: String,
        outcome: AttackOutcome,
    },
    StatusRecovered {
        unit: String,
        from: Status,
        to: Status,
    },
    /// A decision answer was out of bounds; the same request is re-issued.
    DecisionRejected {
        unit: String,
        reason: String,
    },
    TurnEnded {
        turn_index: u64,
    },
    EncounterEnded {
        winner: Option<Side>,
        turns: u64,
    },
}

/// Where narration events go.
pub trait NarrationSink {
    fn emit(&mut self, event: NarrationEvent);
}

/// Collects events in memory; the test driver's sink.
#[derive(Debug, Default)]
pub struct EventLog {
    pub events: Vec<NarrationEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NarrationSink for EventLog {
    fn emit(&mut self, event: NarrationEvent) {
        self.events.push(event);
    }
}
