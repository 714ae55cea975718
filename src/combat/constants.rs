//! Combat constants - all tunable rule values in one place
//!
//! Reproduced from the tabletop conversion as given, not rebalanced.

// Range band upper bounds (meters)
pub const CLOSE_RANGE_MAX: f64 = 500.0;
pub const MID_RANGE_MAX: f64 = 1000.0;

// Distances at or below this allow a full rotation while circling
pub const POINT_BLANK_DISTANCE: f64 = 0.1;

// Shield coverage: attacks within this many degrees of the defender's
// facing are intercepted
pub const SHIELD_ARC_DEGREES: f64 = 45.0;

// Base defense value added to Parry/Dodge for the opposed roll
pub const DEFENSE_BASE: i32 = 10;

// Attacker advantage added to the damage rank before comparing against the
// defender's toughness roll
pub const DAMAGE_ADVANTAGE: i32 = 15;

// Margin a shield check must clear (damage rank + this) for the shield
// itself to break. Numerically equal to DAMAGE_ADVANTAGE but an unrelated
// comparison; kept separate on purpose.
pub const SHIELD_BREAK_MARGIN: i32 = 15;

// Damage-difference tier ceilings
pub const MINOR_HIT_MAX: i32 = 5;
pub const MODERATE_HIT_MAX: i32 = 10;
pub const HEAVY_HIT_MAX: i32 = 15;

// Detection
pub const CONCEALMENT_DC_BASE: i32 = 5;

// Blind probes move at this fraction of normal speed
pub const BLIND_PROBE_SPEED_FACTOR: f64 = 0.5;
