//! Abacus Trainer Library
//!
//! This library provides the core functionality of the abacus trainer: the
//! bead/rod/frame model that turns bead positions into a base-10 value, the
//! reset broadcast channel, the demo challenge, configuration, and the
//! terminal host.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod models;
pub mod services;
pub mod tui;
