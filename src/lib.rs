//! `case-pulse` library crate.
//!
//! Daily-change and rolling statistics over cumulative case/death reports.
//! The `case-pulse` binary is a thin CLI and HTTP wrapper around it.

pub mod api;
pub mod cli;
pub mod config;
pub mod data;
pub mod logging;
pub mod metrics;
