//! Project discovery and configuration
//!
//! A project is the directory tree the developer commands operate on. Its
//! root is the first ancestor of the working directory containing a
//! `devkit.yaml`, unless `DEVKIT_TOPSRCDIR` overrides it; with neither, the
//! working directory itself is the root and all config fields take their
//! defaults.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file name looked for at the project root.
pub const CONFIG_FILE: &str = "devkit.yaml";

/// Environment variable overriding project-root discovery.
pub const SRCDIR_ENV: &str = "DEVKIT_TOPSRCDIR";

/// Contents of `devkit.yaml`. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Virtualenv directory relative to the project root. When unset the
    /// conventional `.venv` and `venv` directories are tried in order.
    pub venv_dir: Option<String>,

    pub lint: LintConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LintConfig {
    /// Directories (relative to the project root) holding local eslint
    /// plugins to `npm link` during `eslint --setup`.
    pub local_plugins: Vec<String>,
}

/// A resolved project: root directory plus parsed configuration.
#[derive(Debug, Clone)]
pub struct Project {
    pub root: PathBuf,
    pub config: ProjectConfig,
}

impl Project {
    /// Discover the project from the current working directory.
    pub fn discover() -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to read working directory")?;
        if let Ok(root) = std::env::var(SRCDIR_ENV) {
            return Self::load(PathBuf::from(root));
        }
        Self::discover_from(&cwd)
    }

    /// Discover the project starting from `start`: walk up to the first
    /// directory containing the config file, falling back to `start`.
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut dir = start;
        loop {
            if dir.join(CONFIG_FILE).is_file() {
                return Self::load(dir.to_path_buf());
            }
            match dir.parent() {
                Some(parent) => dir = parent,
                None => return Self::load(start.to_path_buf()),
            }
        }
    }

    fn load(root: PathBuf) -> Result<Self> {
        let config_path = root.join(CONFIG_FILE);
        let config = if config_path.is_file() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse {}", config_path.display()))?
        } else {
            ProjectConfig::default()
        };
        Ok(Self { root, config })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults_without_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let project = Project::discover_from(dir.path()).unwrap();
        assert_eq!(project.root, dir.path());
        assert!(project.config.venv_dir.is_none());
        assert!(project.config.lint.local_plugins.is_empty());
    }

    #[test]
    fn test_config_file_marks_the_root() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "venv_dir: env\n").unwrap();
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        let project = Project::discover_from(&nested).unwrap();
        assert_eq!(project.root, dir.path());
        assert_eq!(project.config.venv_dir.as_deref(), Some("env"));
    }

    #[test]
    fn test_lint_section_parses() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "lint:\n  local_plugins:\n    - tools/eslint-plugin\n",
        )
        .unwrap();

        let project = Project::discover_from(dir.path()).unwrap();
        assert_eq!(
            project.config.lint.local_plugins,
            vec!["tools/eslint-plugin"]
        );
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "venv_dir: [oops\n").unwrap();
        assert!(Project::discover_from(dir.path()).is_err());
    }
}
