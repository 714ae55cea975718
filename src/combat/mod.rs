pub mod attack;
pub mod constants;
pub mod detection;
pub mod range;
pub mod status;

pub use attack::{resolve_attack, AttackOutcome, HitRoll};
pub use detection::{search_check, SearchCheck};
pub use range::{
    can_reach, circled_facing, close_in, in_shield_arc, max_circling_angle, normalize_facing,
    range_band, retreat, CircleDirection, RangeBand,
};
pub use status::{end_of_turn_recovery, HitSeverity, Status};
