//! Dashboard configuration loaded from `{data_dir}/config.yaml`.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use visitcast_core::analysis::{MultiplierRange, SweepDimension};
use visitcast_core::model::{LibraryParameters, ModelCoefficients};

use crate::util::io::atomic_write;

/// File name of the configuration inside the data directory
pub const CONFIG_FILE: &str = "config.yaml";

/// File name of the dataset when none is configured
pub const DEFAULT_DATASET_FILE: &str = "gwr.csv";

/// Where the observation CSV comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    Path(PathBuf),
    Url(String),
}

impl DatasetSource {
    /// Interpret a CLI or config value. `http://` and `https://` values are
    /// URLs; anything else is a path, resolved against `base_dir` when relative.
    pub fn parse(value: &str, base_dir: &Path) -> Self {
        let value = value.trim();
        if value.starts_with("http://") || value.starts_with("https://") {
            return DatasetSource::Url(value.to_string());
        }

        let path = PathBuf::from(value);
        if path.is_absolute() {
            DatasetSource::Path(path)
        } else {
            DatasetSource::Path(base_dir.join(path))
        }
    }
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetSource::Path(path) => write!(f, "{}", path.display()),
            DatasetSource::Url(url) => write!(f, "{url}"),
        }
    }
}

/// Persisted dashboard settings; every field is optional in the file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Path (relative to the data directory) or http(s) URL of the GWR CSV
    pub dataset: Option<String>,
    pub coefficients: ModelCoefficients,
    /// Parameters shown when the dashboard opens and after a reset
    pub parameters: LibraryParameters,
    pub sweep_dimension: SweepDimension,
    pub multipliers: MultiplierRange,
}

impl AppConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_saphyr::Error> {
        serde_saphyr::from_str(yaml)
    }

    pub fn to_yaml(&self) -> Result<String, serde_saphyr::ser::Error> {
        serde_saphyr::to_string(self)
    }

    /// Load `{data_dir}/config.yaml`.
    ///
    /// A missing file yields the defaults. An unreadable or invalid file is
    /// logged and also yields the defaults.
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join(CONFIG_FILE);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Self::default();
        }

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read config");
                return Self::default();
            }
        };

        match Self::from_yaml(&content) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded config");
                config
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "invalid config, using defaults");
                Self::default()
            }
        }
    }

    /// Write the defaults to `{data_dir}/config.yaml` unless a file is
    /// already there. Returns whether a file was written.
    pub fn write_default_if_missing(data_dir: &Path) -> io::Result<bool> {
        let path = data_dir.join(CONFIG_FILE);
        if path.exists() {
            return Ok(false);
        }
        let yaml = Self::default().to_yaml().map_err(|e| io::Error::other(e.to_string()))?;
        fs::create_dir_all(data_dir)?;
        atomic_write(&path, &yaml)?;
        tracing::info!(path = %path.display(), "wrote default config");
        Ok(true)
    }

    /// Resolve the dataset source. A CLI override wins over the config file,
    /// which wins over `gwr.csv` in the data directory.
    pub fn dataset_source(&self, data_dir: &Path, cli_override: Option<&str>) -> DatasetSource {
        match cli_override.or(self.dataset.as_deref()) {
            Some(value) => DatasetSource::parse(value, data_dir),
            None => DatasetSource::Path(data_dir.join(DEFAULT_DATASET_FILE)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        assert_eq!(AppConfig::load(dir.path()), AppConfig::default());
    }

    #[test]
    fn test_invalid_file_gives_defaults() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "parameters: [not, a, map]\n").unwrap();
        assert_eq!(AppConfig::load(dir.path()), AppConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "dataset: https://example.org/gwr.csv\nsweep_dimension: Hours\nparameters:\n  total_staff: 30\n",
        )
        .unwrap();

        let config = AppConfig::load(dir.path());
        assert_eq!(config.dataset.as_deref(), Some("https://example.org/gwr.csv"));
        assert_eq!(config.sweep_dimension, SweepDimension::Hours);
        assert_eq!(config.parameters.total_staff, 30.0);
        assert_eq!(config.parameters.population, 25_000.0);
        assert_eq!(config.coefficients, ModelCoefficients::REFERENCE);
    }

    #[test]
    fn test_yaml_round_trip() {
        let mut config = AppConfig {
            dataset: Some("data/gwr.csv".into()),
            ..Default::default()
        };
        config.coefficients.intercept = 3.0;
        config.parameters.library_name = "Branch".into();

        let yaml = config.to_yaml().unwrap();
        assert_eq!(AppConfig::from_yaml(&yaml).unwrap(), config);
    }

    #[test]
    fn test_default_file_written_once() {
        let dir = tempdir().unwrap();

        assert!(AppConfig::write_default_if_missing(dir.path()).unwrap());
        assert_eq!(AppConfig::load(dir.path()), AppConfig::default());

        fs::write(dir.path().join(CONFIG_FILE), "sweep_dimension: Income\n").unwrap();
        assert!(!AppConfig::write_default_if_missing(dir.path()).unwrap());
        assert_eq!(
            AppConfig::load(dir.path()).sweep_dimension,
            SweepDimension::Income
        );
    }

    #[test]
    fn test_dataset_source_resolution() {
        let data_dir = Path::new("/home/user/.visitcast");
        let config = AppConfig {
            dataset: Some("extra/gwr.csv".into()),
            ..Default::default()
        };

        assert_eq!(
            AppConfig::default().dataset_source(data_dir, None),
            DatasetSource::Path(data_dir.join("gwr.csv"))
        );
        assert_eq!(
            config.dataset_source(data_dir, None),
            DatasetSource::Path(data_dir.join("extra/gwr.csv"))
        );
        assert_eq!(
            config.dataset_source(data_dir, Some("http://host/gwr.csv")),
            DatasetSource::Url("http://host/gwr.csv".into())
        );
        assert_eq!(
            config.dataset_source(data_dir, Some("/tmp/gwr.csv")),
            DatasetSource::Path(PathBuf::from("/tmp/gwr.csv"))
        );
    }
}
