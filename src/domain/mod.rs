//! Domain types used throughout the assessment pipeline.
//!
//! This module defines:
//!
//! - the applicant attributes collected by the form (`ApplicantInput`)
//! - categorical inputs (`ResidenceType`, `LoanPurpose`, `LoanType`)
//! - the collaborator output (`RiskResult`) and recognised grades (`Rating`)

pub mod types;

pub use types::*;
