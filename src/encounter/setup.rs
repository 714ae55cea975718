//! Roster filtering and ordering for encounter setup

use crate::core::Environment;
use crate::unit::ZoidRecord;

/// Records eligible for an environment: a positive matching movement rate.
pub fn eligible_units(records: &[ZoidRecord], environment: Environment) -> Vec<&ZoidRecord> {
    records
        .iter()
        .filter(|r| match environment {
            Environment::Land => r.movement.land > 0.0,
            Environment::Water => r.movement.water > 0.0,
            Environment::Air => r.movement.air > 0.0,
        })
        .collect()
}

/// Roster display order: ascending power level, name as tie-break.
pub fn roster_order<'a>(records: &[&'a ZoidRecord]) -> Vec<&'a ZoidRecord> {
    let mut ordered = records.to_vec();
    ordered.sort_by(|a, b| {
        a.power_level
            .cmp(&b.power_level)
            .then_with(|| a.name.cmp(&b.name))
    });
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, power_level: i32, land: f64, air: f64) -> ZoidRecord {
        serde_json::from_str(&format!(
            r#"{{
                "Name": "{name}",
                "Power Level": {power_level},
                "Movement": {{"Land": {land}, "Air": {air}}},
                "Powers": [{{"Type": "Melee", "Damage": 5}}]
            }}"#
        ))
        .unwrap()
    }

    #[test]
    fn test_environment_filter() {
        let records = vec![
            record("Walker", 10, 100.0, 0.0),
            record("Flyer", 12, 0.0, 300.0),
            record("Both", 14, 50.0, 200.0),
        ];

        let land = eligible_units(&records, Environment::Land);
        assert_eq!(land.len(), 2);
        let air = eligible_units(&records, Environment::Air);
        assert_eq!(air.len(), 2);
        let water = eligible_units(&records, Environment::Water);
        assert!(water.is_empty());
    }

    #[test]
    fn test_roster_order_by_power_level_then_name() {
        let records = vec![
            record("Zeta", 12, 100.0, 0.0),
            record("Alpha", 12, 100.0, 0.0),
            record("Cheap", 8, 100.0, 0.0),
        ];
        let refs: Vec<&ZoidRecord> = records.iter().collect();
        let ordered = roster_order(&refs);
        let names: Vec<&str> = ordered.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Cheap", "Alpha", "Zeta"]);
    }
}
