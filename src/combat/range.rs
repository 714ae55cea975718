//! Range bands and battle geometry
//!
//! Distance between the two units is a single scalar; lateral movement is
//! modeled as circling, which converts arc length at the current distance
//! into a facing-angle change.

use serde::{Deserialize, Serialize};

use crate::combat::constants::{
    CLOSE_RANGE_MAX, MID_RANGE_MAX, POINT_BLANK_DISTANCE, SHIELD_ARC_DEGREES,
};
use crate::unit::capability::Capabilities;

/// Range band for the current distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RangeBand {
    /// Distance exactly zero
    Melee,
    /// Up to 500 m
    Close,
    /// 500 to 1000 m
    Mid,
    /// Beyond 1000 m
    Long,
}

impl std::fmt::Display for RangeBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RangeBand::Melee => write!(f, "melee"),
            RangeBand::Close => write!(f, "close"),
            RangeBand::Mid => write!(f, "mid"),
            RangeBand::Long => write!(f, "long"),
        }
    }
}

/// Which band a given distance falls into.
pub fn range_band(distance: f64) -> RangeBand {
    if distance == 0.0 {
        RangeBand::Melee
    } else if distance <= CLOSE_RANGE_MAX {
        RangeBand::Close
    } else if distance <= MID_RANGE_MAX {
        RangeBand::Mid
    } else {
        RangeBand::Long
    }
}

/// Can a unit with these capabilities attack at this distance?
pub fn can_reach(caps: &Capabilities, distance: f64) -> bool {
    caps.attack_rank(range_band(distance)).is_some()
}

/// Closing movement: distance shrinks by speed, floored at zero.
pub fn close_in(distance: f64, speed: f64) -> f64 {
    (distance - speed).max(0.0)
}

/// Retreating movement: distance grows by speed.
pub fn retreat(distance: f64, speed: f64) -> f64 {
    distance + speed
}

/// Maximum facing change (degrees) a unit can circle through in one turn.
///
/// Arc length covered at the unit's speed, converted to degrees at the
/// current distance and capped at a full rotation. At point-blank range the
/// conversion blows up, so a full rotation is simply allowed.
pub fn max_circling_angle(speed: f64, distance: f64) -> f64 {
    if distance <= POINT_BLANK_DISTANCE {
        return 360.0;
    }
    ((speed * 180.0) / (std::f64::consts::PI * distance)).min(360.0)
}

/// Circling direction, viewed from above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CircleDirection {
    Left,
    Right,
}

/// New facing after circling by `degrees` in `direction`.
pub fn circled_facing(facing: f64, degrees: f64, direction: CircleDirection) -> f64 {
    let delta = match direction {
        CircleDirection::Left => degrees,
        CircleDirection::Right => -degrees,
    };
    normalize_facing(facing + delta)
}

/// Normalize an angle into [0, 360).
pub fn normalize_facing(angle: f64) -> f64 {
    angle.rem_euclid(360.0)
}

/// Does an attack land within the defender's shield arc?
///
/// The angular difference between the two facings, reduced to [0, 180],
/// must be within the shield's 45 degree coverage.
pub fn in_shield_arc(attacker_facing: f64, defender_facing: f64) -> bool {
    let mut relative = (attacker_facing - defender_facing).rem_euclid(360.0);
    if relative > 180.0 {
        relative = 360.0 - relative;
    }
    relative <= SHIELD_ARC_DEGREES
}
