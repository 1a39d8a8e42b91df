//! Roast battle orchestration between three external text-generation agents.
//!
//! A battle runs three dependent rounds (opening, rebuttal, closer). Each
//! round fans one prompt out to every agent concurrently, isolates per-agent
//! failures, and persists the outputs inside a single per-battle transaction.
//! The champion and win streak are derived from recorded vote outcomes. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]
//! - Construction-time settings in [`config`]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;
