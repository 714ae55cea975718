//! Shared engine types

use serde::{Deserialize, Serialize};

/// Battle environment. Selects which movement rate applies and which units
/// are eligible for the encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Environment {
    Land,
    Water,
    Air,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Land => write!(f, "land"),
            Environment::Water => write!(f, "water"),
            Environment::Air => write!(f, "air"),
        }
    }
}

/// One of the two sides in an encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    First,
    Second,
}

impl Side {
    pub fn opponent(&self) -> Side {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Side::First => 0,
            Side::Second => 1,
        }
    }
}
