//! Project virtualenv interpreter resolution
//!
//! The virtualenv itself is created and populated elsewhere; this module only
//! answers "which interpreter do I spawn". Candidates are the configured
//! `venv_dir`, else `.venv` then `venv` under the project root.

use crate::toolchain::Platform;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Conventional virtualenv directory names, tried in order.
const VENV_DIRS: [&str; 2] = [".venv", "venv"];

#[derive(Debug, Error)]
pub enum VenvError {
    #[error(
        "No Python virtualenv found. Searched:\n{}\nCreate one with `python3 -m venv .venv` at the project root.",
        format_searched(.searched)
    )]
    NotFound { searched: Vec<PathBuf> },
}

fn format_searched(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Resolve the virtualenv interpreter under `project_root`.
pub fn python_path(
    project_root: &Path,
    platform: Platform,
    configured: Option<&str>,
) -> Result<PathBuf, VenvError> {
    let mut searched = Vec::new();
    for dir in candidate_dirs(configured) {
        let interpreter = interpreter_in(&project_root.join(dir.as_ref()), platform);
        if interpreter.is_file() {
            return Ok(interpreter);
        }
        searched.push(interpreter);
    }
    Err(VenvError::NotFound { searched })
}

fn candidate_dirs(configured: Option<&str>) -> Vec<std::borrow::Cow<'_, str>> {
    match configured {
        Some(dir) => vec![std::borrow::Cow::Borrowed(dir)],
        None => VENV_DIRS
            .iter()
            .map(|d| std::borrow::Cow::Borrowed(*d))
            .collect(),
    }
}

fn interpreter_in(venv: &Path, platform: Platform) -> PathBuf {
    match platform {
        Platform::Windows => venv.join("Scripts").join("python.exe"),
        Platform::MacOs | Platform::Linux => venv.join("bin").join("python"),
    }
}
