//! Zoid Skirmish: a two-party, turn-based tactical combat engine.
//!
//! Units are loaded from converted stat records, resolved into typed
//! capability tables, and pitted against each other in a single scalar
//! dimension: the distance between them. The engine is IO-free and fully
//! deterministic under a seeded roll source; decision points and narration
//! flow through traits so consoles, UIs, and scripted tests all drive the
//! same turn loop.

pub mod combat;
pub mod core;
pub mod dice;
pub mod encounter;
pub mod unit;
