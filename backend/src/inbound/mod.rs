//! Inbound adapters (HTTP) that translate external requests into domain
//! operations.

pub mod http;
