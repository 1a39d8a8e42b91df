//! Roast arena: three-agent roast battle orchestration.
//!
//! This crate runs structured three-round battles between external
//! text-generation agents, persists each battle atomically, and derives the
//! reigning champion and win streak from recorded votes.
//!
//! # Architecture
//!
//! Roast arena follows hexagonal architecture principles:
//!
//! - **Domain**: Pure battle and roster types with no infrastructure
//!   dependencies
//! - **Ports**: Abstract trait interfaces for agents and persistence
//! - **Adapters**: Concrete implementations of ports (`PostgreSQL`, vendor
//!   CLIs, in-memory)
//!
//! # Modules
//!
//! - [`arena`]: Battle orchestration, champion tracking, and voting

pub mod arena;
