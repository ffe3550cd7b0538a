//! Seed registry types and JSON parsing.
//!
//! The registry holds named seed definitions, the departments generated
//! employees are assigned to, and the reference date every generated record
//! is dated from. Pinning the date keeps output identical across runs.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::RegistryError;

/// Current supported registry version.
const SUPPORTED_VERSION: u32 = 1;

/// A seed registry containing named seeds and department names.
///
/// # Example
///
/// ```
/// use example_data::SeedRegistry;
///
/// let json = r#"{
///     "version": 1,
///     "referenceDate": "2026-01-15",
///     "departments": ["Operations"],
///     "seeds": [{"name": "test", "seed": 42, "employeeCount": 5}]
/// }"#;
///
/// let registry = SeedRegistry::from_json(json).expect("valid registry");
/// assert_eq!(registry.seeds().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedRegistry {
    version: u32,
    reference_date: NaiveDate,
    departments: Vec<String>,
    seeds: Vec<SeedDefinition>,
}

impl SeedRegistry {
    /// Parses a seed registry from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if:
    /// - The JSON is malformed or a required field is missing
    /// - The version is unsupported
    /// - The department list is empty or contains a blank name
    /// - The seeds array is empty
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let raw: RawSeedRegistry =
            serde_json::from_str(json).map_err(|e| RegistryError::ParseError {
                message: e.to_string(),
            })?;

        Self::from_raw(raw)
    }

    /// Loads a seed registry from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, RegistryError> {
        let contents = fs::read_to_string(path).map_err(|e| RegistryError::IoError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::from_json(&contents)
    }

    fn from_raw(raw: RawSeedRegistry) -> Result<Self, RegistryError> {
        if raw.version != SUPPORTED_VERSION {
            return Err(RegistryError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }

        if raw.departments.is_empty() {
            return Err(RegistryError::EmptyDepartments);
        }

        let departments = raw
            .departments
            .into_iter()
            .enumerate()
            .map(|(index, name)| {
                let trimmed = name.trim();
                if trimmed.is_empty() {
                    Err(RegistryError::BlankDepartment { index })
                } else {
                    Ok(trimmed.to_owned())
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        if raw.seeds.is_empty() {
            return Err(RegistryError::EmptySeeds);
        }

        let seeds = raw
            .seeds
            .into_iter()
            .map(|s| SeedDefinition {
                name: s.name,
                seed: s.seed,
                employee_count: s.employee_count,
            })
            .collect();

        Ok(Self {
            version: raw.version,
            reference_date: raw.reference_date,
            departments,
            seeds,
        })
    }

    /// Returns the registry version.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Returns the date generated records are dated relative to.
    #[must_use]
    pub const fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    /// Returns the departments employees are drawn into.
    #[must_use]
    pub fn departments(&self) -> &[String] {
        &self.departments
    }

    /// Returns all seed definitions.
    #[must_use]
    pub fn seeds(&self) -> &[SeedDefinition] {
        &self.seeds
    }

    /// Finds a seed definition by name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::SeedNotFound`] if no seed with the given name
    /// exists.
    pub fn find_seed(&self, name: &str) -> Result<&SeedDefinition, RegistryError> {
        self.seeds
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| RegistryError::SeedNotFound {
                name: name.to_owned(),
            })
    }
}

/// A named seed definition for deterministic workforce generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedDefinition {
    name: String,
    seed: u64,
    employee_count: usize,
}

impl SeedDefinition {
    /// Returns the seed name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the RNG seed value.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the number of employees to generate.
    #[must_use]
    pub const fn employee_count(&self) -> usize {
        self.employee_count
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSeedRegistry {
    version: u32,
    reference_date: NaiveDate,
    departments: Vec<String>,
    seeds: Vec<RawSeedDefinition>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSeedDefinition {
    name: String,
    seed: u64,
    employee_count: usize,
}
