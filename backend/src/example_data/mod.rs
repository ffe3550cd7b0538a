//! Startup wiring for example data seeding.

mod config;
mod startup;
mod workforce;

pub use config::ExampleDataSettings;
pub use startup::{ExampleDataSeedOutcome, StartupSeedingError, seed_example_data_on_startup};
pub use workforce::{SeededRecords, WorkforceConversionError, convert_workforce};
