//! Adapters - In-process implementations of the ports.
//!
//! - `notifications` - Bounded-channel fan-out for `FlowNotifier`

pub mod notifications;
