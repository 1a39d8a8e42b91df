//! Adapter implementations for arena ports.
//!
//! - [`memory`]: in-memory repository and scripted agents for tests and
//!   local deterministic runs
//! - [`postgres`]: Diesel-backed `PostgreSQL` repository
//! - [`cli`]: agent client driving the vendor command-line tools

pub mod cli;
pub mod memory;
pub mod postgres;
