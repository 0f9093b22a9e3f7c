//! Staffing match engine
//!
//! This crate matches employees against open customer requirements on
//! nationality, age, availability and skills, buckets the shown candidates
//! into tiers, and builds the monthly revenue and utilization dashboard
//! from placement contracts.
//!
//! # Example
//!
//! ```no_run
//! use staffing_match::config::{ConfigLoader, ProficiencyScale};
//! use staffing_match::matching::RequirementMatcher;
//! use staffing_match::store::InMemoryStore;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! let store = InMemoryStore::load("./fixtures/staffing.yaml", config.proficiency().clone()).unwrap();
//! let today = chrono::NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
//!
//! let report = RequirementMatcher::new(&store, config.rules())
//!     .match_requirement("REQ-0001", today)
//!     .unwrap();
//! println!("{} candidates shown", report.matches.len());
//! ```

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod matching;
pub mod models;
pub mod store;
pub mod telemetry;
