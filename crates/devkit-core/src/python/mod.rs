//! Python inside the project virtualenv
//!
//! This module provides:
//! - Virtualenv interpreter resolution
//! - The interactive `python` command
//! - The file-by-file `python-test` runner

pub mod test_runner;
pub mod venv;

use crate::config::Project;
use crate::process;
use crate::toolchain::Platform;
use anyhow::Result;

/// Appended to every spawned interpreter so test and REPL runs never litter
/// the tree with .pyc files.
pub const NO_BYTECODE_ENV: (&str, &str) = ("PYTHONDONTWRITEBYTECODE", "1");

/// Run the virtualenv interpreter interactively with the user's arguments.
///
/// Stdio is inherited and the interpreter's exit code is returned verbatim.
pub fn run_python(project: &Project, args: &[String]) -> Result<i32> {
    let python = venv::python_path(
        &project.root,
        Platform::current(),
        project.config.venv_dir.as_deref(),
    )?;
    process::run_pass_thru(python.as_os_str(), args, &[NO_BYTECODE_ENV])
}
