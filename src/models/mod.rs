//! Core data models for the staffing match engine.
//!
//! This module contains all the domain models used throughout the engine.

mod contract;
mod employee;
mod match_result;
mod requirement;
mod skill;

pub use contract::{Contract, ContractStatus};
pub use employee::{Candidate, EmployeeRecord, EmployeeStatus};
pub use match_result::{
    CandidateMatch, ContractInfo, MatchBuckets, SkillMatchResult, SkillStatus, Tier,
};
pub use requirement::Requirement;
pub use skill::{
    EmployeeSkill, MAX_PROFICIENCY_LEVEL, MIN_PROFICIENCY_LEVEL, RequirementSkill, SkillKind,
    is_valid_level,
};
