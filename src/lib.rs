//! FlowGuard - compliance-governed workflow graph engine.
//!
//! Sessions own a directed workflow graph whose domain (healthcare,
//! finance, ...) is inferred from a seed text. Every edit goes through the
//! graph mutator, which keeps the nodes the domain mandates in place and
//! re-inserts them when an edit leaves the graph non-compliant. Committed
//! versions are fanned out to subscribers over bounded channels.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
