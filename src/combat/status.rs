//! Unit status state machine
//!
//! Attack outcomes push a unit down the ladder; turn boundaries pull it back
//! up one step at a time. Defeated is terminal.

use serde::{Deserialize, Serialize};

use crate::combat::constants::{HEAVY_HIT_MAX, MINOR_HIT_MAX, MODERATE_HIT_MAX};

/// Battle status of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Status {
    #[default]
    Intact,
    /// May move or attack on its turn, not both
    Dazed,
    /// May only toggle shield/stealth on its turn
    Stunned,
    /// Out of the fight, terminal
    Defeated,
}

impl Status {
    pub fn is_defeated(&self) -> bool {
        matches!(self, Status::Defeated)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Intact => write!(f, "intact"),
            Status::Dazed => write!(f, "dazed"),
            Status::Stunned => write!(f, "stunned"),
            Status::Defeated => write!(f, "defeated"),
        }
    }
}

/// Severity tier of a landed hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HitSeverity {
    /// Fully defended, no effect
    Deflected,
    Minor,
    Moderate,
    Heavy,
    Critical,
}

impl std::fmt::Display for HitSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HitSeverity::Deflected => write!(f, "deflected"),
            HitSeverity::Minor => write!(f, "a minor hit"),
            HitSeverity::Moderate => write!(f, "a moderate hit"),
            HitSeverity::Heavy => write!(f, "a heavy hit"),
            HitSeverity::Critical => write!(f, "a critical hit"),
        }
    }
}

impl HitSeverity {
    /// Tier for a damage difference (damage rank + advantage − toughness roll).
    pub fn from_damage_difference(difference: i32) -> Self {
        if difference <= 0 {
            HitSeverity::Deflected
        } else if difference <= MINOR_HIT_MAX {
            HitSeverity::Minor
        } else if difference <= MODERATE_HIT_MAX {
            HitSeverity::Moderate
        } else if difference <= HEAVY_HIT_MAX {
            HitSeverity::Heavy
        } else {
            HitSeverity::Critical
        }
    }

    /// Does this tier dent the hull?
    pub fn dents(&self) -> bool {
        !matches!(self, HitSeverity::Deflected)
    }

    /// Status forced on the defender, if the tier carries one.
    pub fn inflicted_status(&self) -> Option<Status> {
        match self {
            HitSeverity::Deflected | HitSeverity::Minor => None,
            HitSeverity::Moderate => Some(Status::Dazed),
            HitSeverity::Heavy => Some(Status::Stunned),
            HitSeverity::Critical => Some(Status::Defeated),
        }
    }
}

/// End-of-turn recovery for the unit whose turn just finished.
///
/// Recovery only applies if no attack outcome overrode the status since the
/// turn began; a fresh Stunned/Defeated always takes precedence.
pub fn end_of_turn_recovery(status_at_turn_start: Status, current: Status) -> Option<Status> {
    if current != status_at_turn_start {
        return None;
    }
    match current {
        Status::Stunned => Some(Status::Dazed),
        Status::Dazed => Some(Status::Intact),
        Status::Intact | Status::Defeated => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_difference_tiers() {
        assert_eq!(HitSeverity::from_damage_difference(0), HitSeverity::Deflected);
        assert_eq!(HitSeverity::from_damage_difference(-4), HitSeverity::Deflected);
        assert_eq!(HitSeverity::from_damage_difference(1), HitSeverity::Minor);
        assert_eq!(HitSeverity::from_damage_difference(5), HitSeverity::Minor);
        assert_eq!(HitSeverity::from_damage_difference(6), HitSeverity::Moderate);
        assert_eq!(HitSeverity::from_damage_difference(10), HitSeverity::Moderate);
        assert_eq!(HitSeverity::from_damage_difference(13), HitSeverity::Heavy);
        assert_eq!(HitSeverity::from_damage_difference(15), HitSeverity::Heavy);
        assert_eq!(HitSeverity::from_damage_difference(16), HitSeverity::Critical);
    }

    #[test]
    fn test_tier_effects() {
        assert!(!HitSeverity::Deflected.dents());
        assert!(HitSeverity::Minor.dents());
        assert_eq!(HitSeverity::Minor.inflicted_status(), None);
        assert_eq!(HitSeverity::Moderate.inflicted_status(), Some(Status::Dazed));
        assert_eq!(HitSeverity::Heavy.inflicted_status(), Some(Status::Stunned));
        assert_eq!(HitSeverity::Critical.inflicted_status(), Some(Status::Defeated));
    }

    #[test]
    fn test_recovery_ladder() {
        assert_eq!(
            end_of_turn_recovery(Status::Stunned, Status::Stunned),
            Some(Status::Dazed)
        );
        assert_eq!(
            end_of_turn_recovery(Status::Dazed, Status::Dazed),
            Some(Status::Intact)
        );
        assert_eq!(end_of_turn_recovery(Status::Intact, Status::Intact), None);
        assert_eq!(end_of_turn_recovery(Status::Defeated, Status::Defeated), None);
    }

    #[test]
    fn test_new_outcome_overrides_recovery() {
        // Dazed at turn start, knocked to Stunned during the turn: no recovery
        assert_eq!(end_of_turn_recovery(Status::Dazed, Status::Stunned), None);
        assert_eq!(end_of_turn_recovery(Status::Dazed, Status::Defeated), None);
    }
}
