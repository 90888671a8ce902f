//! Reporting utilities: plain-text result cards and reference text.

pub mod format;

pub use format::*;
