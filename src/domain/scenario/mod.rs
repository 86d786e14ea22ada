//! Scenario domain module

mod profile;

pub use profile::{ScenarioId, ScenarioProfile, ALL_SCENARIOS};
