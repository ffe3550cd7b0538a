//! Settings choosing which generated workforce, if any, is loaded into the
//! mock stores at startup. Read through OrthoConfig from `EXAMPLE_DATA_*`
//! environment variables.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Registry seed used when none is configured.
const DEFAULT_WORKFORCE_SEED: &str = "desert-falcon";

/// Registry bundled with the backend crate.
fn bundled_registry_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("example-data")
        .join("seeds.json")
}

/// Startup workforce seeding settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "EXAMPLE_DATA")]
pub struct ExampleDataSettings {
    /// Replace the store contents with a generated workforce on startup.
    #[ortho_config(default = false)]
    pub enabled: bool,
    /// Registry seed the workforce is generated from.
    pub seed_name: Option<String>,
    /// Registry file override.
    pub registry_path: Option<PathBuf>,
}

impl ExampleDataSettings {
    /// Trimmed seed to generate the workforce from, or `None` while seeding
    /// is disabled. A blank configured name stays blank so startup can
    /// report it.
    pub fn workforce_seed(&self) -> Option<&str> {
        self.enabled.then(|| {
            self.seed_name
                .as_deref()
                .map_or(DEFAULT_WORKFORCE_SEED, str::trim)
        })
    }

    /// Registry file holding the seed definitions.
    pub fn registry_path(&self) -> PathBuf {
        self.registry_path
            .clone()
            .unwrap_or_else(bundled_registry_path)
    }
}
