//! Candidate pipeline and employment document workflows for hiring
//! operations: role-gated stage transitions, disqualification capture,
//! tracker-export import, and declarative document field filling.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
