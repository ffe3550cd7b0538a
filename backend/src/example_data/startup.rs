//! Startup seeding of the mock stores.

use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};
use example_data::{GenerationError, RegistryError, SeedRegistry, generate_example_workforce};
use thiserror::Error;
use tracing::info;

use crate::example_data::config::ExampleDataSettings;
use crate::example_data::workforce::{WorkforceConversionError, convert_workforce};
use crate::outbound::memory::ConsoleStores;

/// Errors returned while executing startup seeding.
#[derive(Debug, Error)]
pub enum StartupSeedingError {
    /// Registry file could not be read.
    #[error("failed to read registry at {path}: {source}")]
    RegistryRead {
        /// Path to the registry file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Registry parsing or seed lookup failed.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
    /// Workforce generation failed.
    #[error("example data generation failed: {0}")]
    Generation(#[from] GenerationError),
    /// Generated seeds did not convert into valid records.
    #[error("example data conversion failed: {0}")]
    Conversion(#[from] WorkforceConversionError),
    /// Seed name must not be empty.
    #[error("seed name must not be empty")]
    EmptySeedName,
}

/// What a seeding run loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleDataSeedOutcome {
    /// Seed name used for generation.
    pub seed_name: String,
    /// Number of employees loaded into the directory.
    pub employee_count: usize,
    /// Number of request records loaded across every kind.
    pub request_count: usize,
}

/// Replace the store contents with a generated workforce when enabled.
///
/// # Examples
///
/// ```rust,no_run
/// use std::time::Duration;
///
/// use hr_console::example_data::{ExampleDataSettings, seed_example_data_on_startup};
/// use hr_console::outbound::memory::ConsoleStores;
///
/// let settings = ExampleDataSettings {
///     enabled: false,
///     seed_name: None,
///     registry_path: None,
/// };
/// let stores = ConsoleStores::new(Duration::ZERO);
/// let outcome = seed_example_data_on_startup(&settings, &stores).unwrap();
/// assert!(outcome.is_none());
/// ```
pub fn seed_example_data_on_startup(
    settings: &ExampleDataSettings,
    stores: &ConsoleStores,
) -> Result<Option<ExampleDataSeedOutcome>, StartupSeedingError> {
    let Some(seed_name) = settings.workforce_seed() else {
        info!(reason = "disabled", "example data seeding skipped");
        return Ok(None);
    };
    if seed_name.is_empty() {
        return Err(StartupSeedingError::EmptySeedName);
    }

    let registry = load_registry(&settings.registry_path())?;
    let seed = registry.find_seed(seed_name)?;
    let workforce = generate_example_workforce(&registry, seed)?;
    let records = convert_workforce(workforce, registry.reference_date())?;

    let outcome = ExampleDataSeedOutcome {
        seed_name: seed_name.to_owned(),
        employee_count: records.employees.len(),
        request_count: records.request_count(),
    };
    stores.employees.preload(records.employees);
    stores.advances.preload(records.advances);
    stores.expenses.preload(records.expenses);
    stores.overtime.preload(records.overtime);
    stores.leave.preload(records.leave);
    stores.documents.preload(records.documents);

    info!(
        seed_name = %outcome.seed_name,
        employee_count = outcome.employee_count,
        request_count = outcome.request_count,
        "example data seeding applied"
    );
    Ok(Some(outcome))
}

fn load_registry(path: &Path) -> Result<SeedRegistry, StartupSeedingError> {
    let read_error = |source| StartupSeedingError::RegistryRead {
        path: path.to_path_buf(),
        source,
    };
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path.file_name().ok_or_else(|| {
        read_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "registry path must be a file",
        ))
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
    let contents = dir.read_to_string(Path::new(file_name)).map_err(read_error)?;
    Ok(SeedRegistry::from_json(&contents)?)
}
