//! Session domain module.
//!
//! A session is the unit of ownership for one workflow: it is created from
//! a seed input, mutated one delta at a time, and closed on cleanup.

mod aggregate;
mod errors;

pub use aggregate::Session;
pub use errors::SessionError;
