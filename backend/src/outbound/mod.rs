//! Outbound adapters implementing domain ports.
//!
//! - **memory**: copy-on-write in-memory stores with simulated latency that
//!   stand in for a persistence layer.
//!
//! Adapters are thin: they hold and swap records but contain no business
//! rules.

pub mod memory;
