//! Configuration types for astrodb runs.
//!
//! All types implement [`serde::Deserialize`] with every field defaulted, so
//! a configuration file only needs the settings it changes.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`FilesConfig`] - Default paths of the three record files.
//! - [`CatalogConfig`] - Optional integrity checks.
//! - [`OutputConfig`] - The default [`ReportMode`].
//!
//! # Example
//!
//! ```
//! # use astrodb::config::AppConfig;
//! # use astrodb::ReportMode;
//! let config = AppConfig::default();
//! assert!(!config.catalog().check_likely_duplicates());
//! assert_eq!(config.output().mode(), ReportMode::ObservingList);
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::export::ReportMode;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Record file section.
    #[serde(default)]
    files: FilesConfig,

    /// Catalog construction section.
    #[serde(default)]
    catalog: CatalogConfig,

    /// Report output section.
    #[serde(default)]
    output: OutputConfig,
}

impl AppConfig {
    pub fn new(files: FilesConfig, catalog: CatalogConfig, output: OutputConfig) -> Self {
        Self {
            files,
            catalog,
            output,
        }
    }

    pub fn files(&self) -> &FilesConfig {
        &self.files
    }

    pub fn catalog(&self) -> &CatalogConfig {
        &self.catalog
    }

    pub fn output(&self) -> &OutputConfig {
        &self.output
    }

    /// Returns the configuration with likely-duplicate checking switched on.
    pub fn with_likely_duplicate_check(mut self) -> Self {
        self.catalog.check_likely_duplicates = true;
        self
    }
}

/// Default locations of the record files, used when none is given.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilesConfig {
    #[serde(default)]
    objects: Option<PathBuf>,

    #[serde(default)]
    observations: Option<PathBuf>,

    #[serde(default)]
    programs: Option<PathBuf>,
}

impl FilesConfig {
    pub fn new(
        objects: Option<PathBuf>,
        observations: Option<PathBuf>,
        programs: Option<PathBuf>,
    ) -> Self {
        Self {
            objects,
            observations,
            programs,
        }
    }

    pub fn objects(&self) -> Option<&Path> {
        self.objects.as_deref()
    }

    pub fn observations(&self) -> Option<&Path> {
        self.observations.as_deref()
    }

    pub fn programs(&self) -> Option<&Path> {
        self.programs.as_deref()
    }
}

/// Integrity checks applied when building a catalog.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogConfig {
    /// Report objects sharing an arc-minute position cell.
    #[serde(default)]
    check_likely_duplicates: bool,
}

impl CatalogConfig {
    pub fn new(check_likely_duplicates: bool) -> Self {
        Self {
            check_likely_duplicates,
        }
    }

    pub fn check_likely_duplicates(&self) -> bool {
        self.check_likely_duplicates
    }
}

/// Report output settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    mode: ReportMode,
}

impl OutputConfig {
    pub fn new(mode: ReportMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ReportMode {
        self.mode
    }
}
