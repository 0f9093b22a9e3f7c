//! Configuration loading and management for the staffing match engine.
//!
//! This module provides functionality to load matching rules and the
//! proficiency label scale from YAML files, and process settings from the
//! environment.
//!
//! # Example
//!
//! ```no_run
//! use staffing_match::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Deadline: {}ms", config.rules().deadline_ms);
//! ```

mod loader;
mod settings;
mod types;

pub use loader::ConfigLoader;
pub use settings::AppSettings;
pub use types::{
    DEFAULT_DEADLINE_MS, DEFAULT_PROFICIENCY_LEVEL, DuplicateSkillPolicy, EmptyRequiredPolicy,
    MatchingConfig, MatchingRules, ProficiencyScale, TierThresholds,
};
