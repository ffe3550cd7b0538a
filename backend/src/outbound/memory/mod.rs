//! In-memory record stores with simulated latency.
//!
//! [`MockStore`] backs every console store. [`ConsoleStores`] owns one store
//! per record kind and reports their status.

mod console;
mod fixtures;
mod store;

pub use console::ConsoleStores;
pub use fixtures::account_employees;
pub use store::MockStore;
