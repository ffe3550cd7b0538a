//! Deterministic example workforce data generation for demonstration purposes.
//!
//! This crate generates believable, reproducible HR records from a JSON seed
//! registry. It is independent of backend domain types to avoid circular
//! dependencies; the backend converts the seed types at the point of use.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - Loading seed registries from JSON files
//! - Deterministic employee generation using named seeds
//! - Per-employee sample requests (advances, expenses, overtime, leave,
//!   documents) dated relative to the registry's reference date
//!
//! # Example
//!
//! ```
//! use example_data::{SeedRegistry, generate_example_workforce};
//!
//! let json = r#"{
//!     "version": 1,
//!     "referenceDate": "2026-01-15",
//!     "departments": ["Engineering", "Finance"],
//!     "seeds": [{"name": "test-seed", "seed": 42, "employeeCount": 3}]
//! }"#;
//!
//! let registry = SeedRegistry::from_json(json).expect("valid registry");
//! let seed_def = registry.find_seed("test-seed").expect("seed exists");
//! let workforce = generate_example_workforce(&registry, seed_def).expect("generation succeeds");
//!
//! assert_eq!(workforce.employees.len(), 3);
//! ```

mod error;
mod generator;
mod registry;
mod seed;
mod validation;

pub use error::{GenerationError, RegistryError};
pub use generator::generate_example_workforce;
pub use registry::{SeedDefinition, SeedRegistry};
pub use seed::{
    AdvanceSeed, DocumentKindSeed, DocumentSeed, EmployeeSeed, ExampleWorkforce,
    ExpenseCategorySeed, ExpenseSeed, LeaveSeed, LeaveTypeSeed, OutcomeSeed, OvertimeKindSeed,
    OvertimeSeed,
};
pub use validation::{EMPLOYEE_NAME_MAX, EMPLOYEE_NAME_MIN, is_valid_employee_name};
