//! `credit-vision` library crate.
//!
//! The binary (`cv`) is a thin wrapper around this library so that:
//!
//! - the risk presenter and form logic are testable without a terminal
//! - the predictor seam can be swapped (remote service, local scorecard)
//! - the CLI and the TUI share one assessment pipeline

pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod form;
pub mod io;
pub mod logging;
pub mod model;
pub mod presenter;
pub mod report;
pub mod tui;
