//! Application layer - orchestrates the domain behind the session store.
//!
//! The store is the only place that owns mutable session state; everything
//! it calls into under `domain` is synchronous and side-effect free.

mod commands;
mod seed;
mod session_store;

pub use commands::{
    ComplianceStatus, CreateSessionCommand, DeltaOutcome, EnforcementOutcome,
};
pub use seed::{excerpt, seed_graph};
pub use session_store::SessionStore;
