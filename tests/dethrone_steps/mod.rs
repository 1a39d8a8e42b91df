//! Step definitions for dethrone battle scenarios.

mod given;
mod then;
mod when;
pub mod world;
