//! Request middleware shared by every console route.

pub mod trace;

pub use trace::Trace;
