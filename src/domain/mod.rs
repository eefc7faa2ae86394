//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (ids, timestamps, errors)
//! - `compliance` - Domain classification, catalog, validation and repair
//! - `workflow` - Graph model, deltas and the mutator
//! - `session` - Session aggregate and its errors

pub mod compliance;
pub mod foundation;
pub mod session;
pub mod workflow;
