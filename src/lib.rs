//! Property-trading strategy arena.
//!
//! Plays a simplified property-trading board game between automated purchasing
//! heuristics and aggregates win/round/timeout statistics over many seeded,
//! independent matches.

pub mod engine;
