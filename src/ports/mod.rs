//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `FlowNotifier` - Per-session fan-out of committed graph changes

mod flow_notifier;

pub use flow_notifier::{DeliveryReport, FlowNotification, FlowNotifier, Subscription};
