//! Input/output helpers.
//!
//! - applicant JSON read/write (`applicant`)
//! - assessment exports (`export`)

pub mod applicant;
pub mod export;

pub use applicant::*;
pub use export::*;
