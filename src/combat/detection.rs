//! Concealment and search checks

use serde::{Deserialize, Serialize};

use crate::combat::constants::CONCEALMENT_DC_BASE;
use crate::dice::RollSource;
use crate::unit::Zoid;

/// Outcome of one search check, with the numbers that produced it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SearchCheck {
    pub roll: i32,
    pub awareness: i32,
    pub total: i32,
    pub dc: i32,
    pub detected: bool,
}

/// Roll a search check for `searcher` trying to locate `target`.
///
/// An unconcealed target has DC 0, so detection is automatic; the roll is
/// still made so narration and replay see a uniform check.
pub fn search_check(searcher: &Zoid, target: &Zoid, rolls: &mut dyn RollSource) -> SearchCheck {
    let roll = rolls.d20();
    let awareness = searcher.stats.awareness;
    let total = roll + awareness;

    let dc = match target.capabilities.concealment {
        Some(rank) if target.concealed() => CONCEALMENT_DC_BASE + rank,
        _ => 0,
    };

    SearchCheck {
        roll,
        awareness,
        total,
        dc,
        detected: total >= dc,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedRolls;
    use crate::unit::record::{PowerRecord, ZoidRecord};

    fn concealed_target() -> Zoid {
        let record: ZoidRecord = serde_json::from_str(
            r#"{
                "Name": "Helcat",
                "Stats": {"Awareness": 3},
                "Powers": [
                    {"Type": "Melee", "Damage": 5},
                    {"Type": "Concealment", "Senses": ["Visual"], "Rank": 8}
                ]
            }"#,
        )
        .unwrap();
        let mut zoid = Zoid::from_record(&record).unwrap();
        zoid.toggle_concealment();
        zoid
    }

    fn searcher(awareness: i32) -> Zoid {
        let record = ZoidRecord {
            name: "Seeker".to_string(),
            stats: crate::unit::record::StatBlock {
                awareness,
                ..Default::default()
            },
            defenses: Default::default(),
            movement: Default::default(),
            powers: vec![PowerRecord {
                power_type: "Melee".to_string(),
                rank: None,
                damage: Some(5),
                senses: None,
                extras: None,
                power_points: None,
            }],
            total_power_points: 0.0,
            power_level: 0,
            power_level_source: Vec::new(),
            cost: 0.0,
        };
        Zoid::from_record(&record).unwrap()
    }

    #[test]
    fn test_search_against_concealed_target() {
        let target = concealed_target();
        let seeker = searcher(4);

        // DC = 5 + 8 = 13; roll 9 + awareness 4 = 13 meets it exactly
        let mut rolls = ScriptedRolls::new();
        rolls.queue_d20(9);
        let check = search_check(&seeker, &target, &mut rolls);
        assert_eq!(check.dc, 13);
        assert!(check.detected);

        // Roll 8 falls one short
        rolls.queue_d20(8);
        let check = search_check(&seeker, &target, &mut rolls);
        assert!(!check.detected);
    }

    #[test]
    fn test_unconcealed_target_always_detected() {
        let mut target = concealed_target();
        target.toggle_concealment(); // back off
        let seeker = searcher(0);

        let mut rolls = ScriptedRolls::new();
        rolls.queue_d20(1);
        let check = search_check(&seeker, &target, &mut rolls);
        assert_eq!(check.dc, 0);
        assert!(check.detected);
    }
}
