//! Resolver configuration from YAML

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Scenario file name used by the directory layout
pub const DEFAULT_SCENARIO_FILE: &str = "scenario.yml";

/// Errors raised while loading or validating resolver configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("no project scenario configured: set project_file or root_dir and project")]
    NoProjectScenario,

    #[error("'{0}' is set but '{1}' is missing")]
    Incomplete(&'static str, &'static str),
}

/// Where the project and common scenarios live
///
/// Either name the files directly, or give a root directory and project
/// name and let the standard layout decide:
///
/// ```text
/// <root_dir>/project/<project>/<scenario_file>
/// <root_dir>/common/<scenario_file>
/// ```
///
/// Explicit file paths take precedence over the layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Project scenario file
    #[serde(default)]
    pub project_file: Option<PathBuf>,

    /// Common scenario file (optional; may not exist)
    #[serde(default)]
    pub common_file: Option<PathBuf>,

    /// Root directory of the standard layout
    #[serde(default)]
    pub root_dir: Option<PathBuf>,

    /// Project name within the standard layout
    #[serde(default)]
    pub project: Option<String>,

    /// Scenario file name within the standard layout
    #[serde(default = "default_scenario_file")]
    pub scenario_file: String,
}

fn default_scenario_file() -> String {
    DEFAULT_SCENARIO_FILE.to_string()
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolverConfig {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self {
            project_file: None,
            common_file: None,
            root_dir: None,
            project: None,
            scenario_file: default_scenario_file(),
        }
    }

    /// Load resolver configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Parse resolver configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: ResolverConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that a project scenario can be located
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.project_file.is_some() {
            return Ok(());
        }
        match (&self.root_dir, &self.project) {
            (Some(_), Some(_)) => Ok(()),
            (Some(_), None) => Err(ConfigError::Incomplete("root_dir", "project")),
            (None, Some(_)) => Err(ConfigError::Incomplete("project", "root_dir")),
            (None, None) => Err(ConfigError::NoProjectScenario),
        }
    }

    pub fn with_project_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.project_file = Some(path.into());
        self
    }

    pub fn with_common_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.common_file = Some(path.into());
        self
    }

    pub fn with_layout(mut self, root_dir: impl Into<PathBuf>, project: impl Into<String>) -> Self {
        self.root_dir = Some(root_dir.into());
        self.project = Some(project.into());
        self
    }

    /// Path of the project scenario
    pub fn project_path(&self) -> Result<PathBuf, ConfigError> {
        self.validate()?;
        if let Some(path) = &self.project_file {
            return Ok(path.clone());
        }
        match (&self.root_dir, &self.project) {
            (Some(root), Some(project)) => Ok(root.join("project").join(project).join(&self.scenario_file)),
            _ => Err(ConfigError::NoProjectScenario),
        }
    }

    /// Path of the common scenario, if one is configured
    pub fn common_path(&self) -> Option<PathBuf> {
        self.common_file.clone().or_else(|| {
            self.root_dir
                .as_ref()
                .map(|root| root.join("common").join(&self.scenario_file))
        })
    }
}
