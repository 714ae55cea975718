//! Typed capability resolution
//!
//! The raw power list is scanned exactly once, at unit construction, into a
//! fixed-field record. Converter drafts disagree on naming: armor appears as
//! "Armor" or "Protection", the energy shield as "E-Shield" or "Create", and
//! attack powers key their rank under "Damage". All variants resolve here so
//! nothing downstream ever touches the power list again.

use serde::{Deserialize, Serialize};

use crate::combat::range::RangeBand;
use crate::unit::record::PowerRecord;

/// Resolved optional ranks per capability category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub melee: Option<i32>,
    pub close_range: Option<i32>,
    pub mid_range: Option<i32>,
    pub long_range: Option<i32>,
    pub armor: Option<i32>,
    pub shield: Option<i32>,
    pub concealment: Option<i32>,
}

/// A Concealment power hides the unit visually if it is untagged or tagged
/// for the Visual sense. Sensor-only entries (ECM) do not count.
fn conceals_visually(power: &PowerRecord) -> bool {
    match &power.senses {
        None => true,
        Some(senses) => senses.iter().any(|s| s == "Visual"),
    }
}

impl Capabilities {
    /// Resolve a power list. First matching entry wins per slot.
    pub fn from_powers(powers: &[PowerRecord]) -> Self {
        let mut caps = Capabilities::default();

        for power in powers {
            let slot = match power.power_type.as_str() {
                "Melee" => &mut caps.melee,
                "Close-Range" => &mut caps.close_range,
                "Mid-Range" => &mut caps.mid_range,
                "Long-Range" => &mut caps.long_range,
                "Armor" | "Protection" => &mut caps.armor,
                "E-Shield" | "Create" => &mut caps.shield,
                "Concealment" if conceals_visually(power) => &mut caps.concealment,
                _ => continue,
            };
            if slot.is_none() {
                *slot = power.effective_rank();
            }
        }

        caps
    }

    /// Damage rank of the attack usable at the given range band, if any.
    pub fn attack_rank(&self, band: RangeBand) -> Option<i32> {
        match band {
            RangeBand::Melee => self.melee,
            RangeBand::Close => self.close_range,
            RangeBand::Mid => self.mid_range,
            RangeBand::Long => self.long_range,
        }
    }

    /// Does the unit have at least one attack capability?
    pub fn has_any_attack(&self) -> bool {
        self.melee.is_some()
            || self.close_range.is_some()
            || self.mid_range.is_some()
            || self.long_range.is_some()
    }
}
