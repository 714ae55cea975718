//! Attack resolution
//!
//! One declared attack runs through: blind-fire coin against an unlocated
//! target, the opposed hit roll for the range band, shield interception if
//! the defender has a live shield facing the attack, then the toughness
//! check feeding the damage tiers. Only the defender's state is mutated.

use serde::{Deserialize, Serialize};

use crate::combat::constants::{DAMAGE_ADVANTAGE, DEFENSE_BASE, SHIELD_BREAK_MARGIN};
use crate::combat::range::{in_shield_arc, RangeBand};
use crate::combat::status::{HitSeverity, Status};
use crate::dice::RollSource;
use crate::unit::Zoid;

/// The opposed hit roll of an attack.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HitRoll {
    pub band: RangeBand,
    pub roll: i32,
    /// Fighting for melee, Dexterity for ranged bands
    pub attack_score: i32,
    pub total: i32,
    /// 10 + Parry for melee, 10 + Dodge for ranged bands
    pub defense: i32,
}

impl HitRoll {
    pub fn hit(&self) -> bool {
        self.total >= self.defense
    }
}

/// Everything that happened while resolving one declared attack.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum AttackOutcome {
    /// Target concealed and unlocated; the coin came up against the
    /// attacker. No rolls were made and nothing changed.
    BlindMiss,
    /// Attack roll failed to meet the defense value.
    Miss { hit_roll: HitRoll },
    /// The defender's shield caught the hit. The shield check only decides
    /// whether the shield itself breaks; the hit is absorbed either way.
    ShieldIntercepted {
        hit_roll: HitRoll,
        damage_rank: i32,
        shield_roll: i32,
        shield_total: i32,
        shield_disabled: bool,
    },
    /// The hit got through to the hull.
    HullHit {
        hit_roll: HitRoll,
        damage_rank: i32,
        toughness_roll: i32,
        toughness_total: i32,
        damage_difference: i32,
        severity: HitSeverity,
        dents_after: u32,
        status_after: Status,
    },
}

/// Resolve one declared attack at the given band and damage rank.
///
/// The caller has already verified reachability (`range::can_reach`) and
/// that the attacker's own shield is down; those gates live in the turn
/// orchestrator because failing them consumes the phase without resolution.
pub fn resolve_attack(
    attacker: &Zoid,
    defender: &mut Zoid,
    band: RangeBand,
    damage_rank: i32,
    defender_located: bool,
    rolls: &mut dyn RollSource,
) -> AttackOutcome {
    // Firing at a last known position: even odds of wasting the attack
    if defender.concealed() && !defender_located && !rolls.coin_flip() {
        return AttackOutcome::BlindMiss;
    }

    let (attack_score, defense) = match band {
        RangeBand::Melee => (attacker.stats.fighting, DEFENSE_BASE + defender.defenses.parry),
        _ => (attacker.stats.dexterity, DEFENSE_BASE + defender.defenses.dodge),
    };

    let roll = rolls.d20();
    let hit_roll = HitRoll {
        band,
        roll,
        attack_score,
        total: roll + attack_score,
        defense,
    };

    if !hit_roll.hit() {
        return AttackOutcome::Miss { hit_roll };
    }

    if defender.shield_ready() && in_shield_arc(attacker.facing(), defender.facing()) {
        // Rank is present whenever shield_ready() holds
        let shield_rank = defender.capabilities.shield.unwrap_or(0);
        let shield_roll = rolls.d20();
        let shield_total = shield_roll + shield_rank;
        let shield_disabled = shield_total >= damage_rank + SHIELD_BREAK_MARGIN;
        if shield_disabled {
            defender.disable_shield();
        }
        return AttackOutcome::ShieldIntercepted {
            hit_roll,
            damage_rank,
            shield_roll,
            shield_total,
            shield_disabled,
        };
    }

    let toughness_roll = rolls.d20();
    let toughness_total = toughness_roll + defender.defenses.toughness - defender.dents() as i32;
    let damage_difference = damage_rank + DAMAGE_ADVANTAGE - toughness_total;
    let severity = HitSeverity::from_damage_difference(damage_difference);

    if severity.dents() {
        defender.add_dent();
    }
    if let Some(status) = severity.inflicted_status() {
        defender.set_status(status);
    }

    AttackOutcome::HullHit {
        hit_roll,
        damage_rank,
        toughness_roll,
        toughness_total,
        damage_difference,
        severity,
        dents_after: defender.dents(),
        status_after: defender.status(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedRolls;
    use crate::unit::record::ZoidRecord;

    fn unit(json: &str) -> Zoid {
        let record: ZoidRecord = serde_json::from_str(json).unwrap();
        Zoid::from_record(&record).unwrap()
    }

    fn melee_attacker() -> Zoid {
        unit(r#"{
            "Name": "Attacker",
            "Stats": {"Fighting": 8, "Dexterity": 6},
            "Powers": [{"Type": "Melee", "Damage": 6}, {"Type": "Mid-Range", "Damage": 4}]
        }"#)
    }

    fn plain_defender() -> Zoid {
        unit(r#"{
            "Name": "Defender",
            "Stats": {},
            "Defenses": {"Toughness": 5, "Parry": 2, "Dodge": 3},
            "Powers": [{"Type": "Melee", "Damage": 5}]
        }"#)
    }

    fn shielded_defender() -> Zoid {
        let mut defender = unit(r#"{
            "Name": "Shielded",
            "Defenses": {"Toughness": 5, "Parry": 2, "Dodge": 3},
            "Powers": [{"Type": "Melee", "Damage": 5}, {"Type": "E-Shield", "Rank": 10}]
        }"#);
        defender.toggle_shield();
        defender
    }

    #[test]
    fn test_melee_uses_fighting_vs_parry() {
        let attacker = melee_attacker();
        let mut defender = plain_defender();
        let mut rolls = ScriptedRolls::new();
        rolls.queue_d20(10).queue_d20(10);

        let outcome = resolve_attack(&attacker, &mut defender, RangeBand::Melee, 6, true, &mut rolls);
        let AttackOutcome::HullHit { hit_roll, .. } = outcome else {
            panic!("expected hull hit, got {outcome:?}");
        };
        assert_eq!(hit_roll.attack_score, 8);
        assert_eq!(hit_roll.defense, 12);
    }

    #[test]
    fn test_ranged_uses_dexterity_vs_dodge() {
        let attacker = melee_attacker();
        let mut defender = plain_defender();
        let mut rolls = ScriptedRolls::new();
        rolls.queue_d20(20).queue_d20(10);

        let outcome = resolve_attack(&attacker, &mut defender, RangeBand::Mid, 4, true, &mut rolls);
        let AttackOutcome::HullHit { hit_roll, .. } = outcome else {
            panic!("expected hull hit, got {outcome:?}");
        };
        assert_eq!(hit_roll.attack_score, 6);
        assert_eq!(hit_roll.defense, 13);
    }

    #[test]
    fn test_miss_changes_nothing() {
        let attacker = melee_attacker();
        let mut defender = plain_defender();
        let mut rolls = ScriptedRolls::new();
        rolls.queue_d20(1); // 1 + 8 = 9 < 12

        let outcome = resolve_attack(&attacker, &mut defender, RangeBand::Melee, 6, true, &mut rolls);
        assert!(matches!(outcome, AttackOutcome::Miss { .. }));
        assert_eq!(defender.dents(), 0);
        assert_eq!(defender.status(), Status::Intact);
    }

    #[test]
    fn test_heavy_hit_stuns() {
        // Scenario: forced attack total 25 vs defense 12, toughness total 8,
        // damage 6 -> difference 6 + 15 - 8 = 13 -> heavy hit
        let attacker = melee_attacker();
        let mut defender = plain_defender();
        let mut rolls = ScriptedRolls::new();
        rolls.queue_d20(17); // 17 + 8 = 25
        rolls.queue_d20(3); // 3 + 5 - 0 = 8

        let outcome = resolve_attack(&attacker, &mut defender, RangeBand::Melee, 6, true, &mut rolls);
        let AttackOutcome::HullHit {
            damage_difference,
            severity,
            dents_after,
            status_after,
            ..
        } = outcome
        else {
            panic!("expected hull hit, got {outcome:?}");
        };
        assert_eq!(damage_difference, 13);
        assert_eq!(severity, HitSeverity::Heavy);
        assert_eq!(dents_after, 1);
        assert_eq!(status_after, Status::Stunned);
        assert_eq!(defender.status(), Status::Stunned);
    }

    #[test]
    fn test_shield_absorbs_and_breaks_at_threshold() {
        // Shield check 20 vs damage 4 + 15 = 19: shield breaks, no dent
        let attacker = melee_attacker();
        let mut defender = shielded_defender();
        let mut rolls = ScriptedRolls::new();
        rolls.queue_d20(17); // hit
        rolls.queue_d20(10); // 10 + 10 = 20 >= 19

        let outcome = resolve_attack(&attacker, &mut defender, RangeBand::Melee, 4, true, &mut rolls);
        let AttackOutcome::ShieldIntercepted {
            shield_total,
            shield_disabled,
            ..
        } = outcome
        else {
            panic!("expected interception, got {outcome:?}");
        };
        assert_eq!(shield_total, 20);
        assert!(shield_disabled);
        assert!(defender.shield_disabled());
        assert_eq!(defender.dents(), 0);
    }

    #[test]
    fn test_shield_absorbs_without_breaking() {
        let attacker = melee_attacker();
        let mut defender = shielded_defender();
        let mut rolls = ScriptedRolls::new();
        rolls.queue_d20(17); // hit
        rolls.queue_d20(8); // 8 + 10 = 18 < 19

        let outcome = resolve_attack(&attacker, &mut defender, RangeBand::Melee, 4, true, &mut rolls);
        let AttackOutcome::ShieldIntercepted {
            shield_disabled, ..
        } = outcome
        else {
            panic!("expected interception, got {outcome:?}");
        };
        assert!(!shield_disabled);
        assert!(!defender.shield_disabled());
        assert_eq!(defender.dents(), 0);
        assert_eq!(defender.status(), Status::Intact);
    }

    #[test]
    fn test_out_of_arc_shield_does_not_intercept() {
        let mut attacker = melee_attacker();
        attacker.set_facing(90.0);
        let mut defender = shielded_defender();
        let mut rolls = ScriptedRolls::new();
        rolls.queue_d20(17).queue_d20(10);

        let outcome = resolve_attack(&attacker, &mut defender, RangeBand::Melee, 4, true, &mut rolls);
        assert!(matches!(outcome, AttackOutcome::HullHit { .. }));
    }

    #[test]
    fn test_blind_miss_consumes_no_rolls() {
        let attacker = melee_attacker();
        let mut concealed = unit(r#"{
            "Name": "Ghost",
            "Defenses": {"Toughness": 5},
            "Powers": [{"Type": "Melee", "Damage": 5}, {"Type": "Concealment", "Rank": 6}]
        }"#);
        concealed.toggle_concealment();

        let mut rolls = ScriptedRolls::new();
        rolls.queue_flip(false);
        rolls.queue_d20(20); // must remain unconsumed

        let outcome =
            resolve_attack(&attacker, &mut concealed, RangeBand::Melee, 6, false, &mut rolls);
        assert!(matches!(outcome, AttackOutcome::BlindMiss));
        assert_eq!(concealed.dents(), 0);
        assert_eq!(rolls.remaining_d20s(), 1);
    }

    #[test]
    fn test_blind_attack_lucky_flip_proceeds() {
        let attacker = melee_attacker();
        let mut concealed = unit(r#"{
            "Name": "Ghost",
            "Defenses": {"Toughness": 5},
            "Powers": [{"Type": "Melee", "Damage": 5}, {"Type": "Concealment", "Rank": 6}]
        }"#);
        concealed.toggle_concealment();

        let mut rolls = ScriptedRolls::new();
        rolls.queue_flip(true);
        rolls.queue_d20(17).queue_d20(3);

        let outcome =
            resolve_attack(&attacker, &mut concealed, RangeBand::Melee, 6, false, &mut rolls);
        assert!(matches!(outcome, AttackOutcome::HullHit { .. }));
    }

    #[test]
    fn test_dents_weaken_toughness() {
        let attacker = melee_attacker();
        let mut defender = plain_defender();
        defender.add_dent();
        defender.add_dent();

        let mut rolls = ScriptedRolls::new();
        rolls.queue_d20(17); // hit
        rolls.queue_d20(10); // 10 + 5 - 2 = 13; diff = 6 + 15 - 13 = 8 -> moderate

        let outcome = resolve_attack(&attacker, &mut defender, RangeBand::Melee, 6, true, &mut rolls);
        let AttackOutcome::HullHit {
            toughness_total,
            severity,
            ..
        } = outcome
        else {
            panic!("expected hull hit, got {outcome:?}");
        };
        assert_eq!(toughness_total, 13);
        assert_eq!(severity, HitSeverity::Moderate);
        assert_eq!(defender.status(), Status::Dazed);
    }
}
