//! JavaScript linting via eslint
//!
//! `run_eslint` gates on a minimum Node.js version, resolves the eslint
//! binary (explicit flag, then the ESLINT environment variable, then the
//! search path) and runs it interactively with the user's arguments.

pub mod setup;

use crate::config::Project;
use crate::process;
use crate::toolchain::locate::{EnvReader, ExecFinder, SystemEnv, SystemFinder};
use crate::toolchain::{Tool, ToolLocator, ToolVersion};
use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

/// eslint requires at least this Node.js version.
pub const MIN_NODE_VERSION: &str = "4.2.3";

/// Environment variable naming the eslint binary.
pub const ESLINT_ENV: &str = "ESLINT";

const ESLINT_NOT_FOUND_MESSAGE: &str = "\
Could not find eslint!  We looked at the --binary option, at the ESLINT
environment variable, and then at your path.  Install eslint and needed
plugins with

devkit eslint --setup

and try again.";

#[derive(Debug, Clone)]
pub struct EslintOptions {
    /// Configure eslint instead of running it.
    pub setup: bool,
    /// Filename extensions to lint, passed through as a single argument.
    pub ext: String,
    /// Explicit path to the eslint binary.
    pub binary: Option<PathBuf>,
    /// Arguments passed through to eslint. Defaults to `.` when empty.
    pub args: Vec<String>,
}

/// Run eslint (or its setup) for the project. Returns the exit code.
pub fn run_eslint(project: &Project, options: EslintOptions) -> Result<i32> {
    let minimum = ToolVersion::parse(MIN_NODE_VERSION)?;
    let locator = ToolLocator::system();
    if locator.locate(Tool::Node, Some(&minimum)).is_none() {
        return Ok(1);
    }

    if options.setup {
        return setup::eslint_setup(project, &locator);
    }

    let Some(binary) = resolve_binary(options.binary, &SystemEnv, &SystemFinder) else {
        println!("{}", ESLINT_NOT_FOUND_MESSAGE);
        return Ok(1);
    };

    println!(
        "{} {}",
        "Running".dimmed(),
        binary.display().to_string().yellow()
    );

    let args = if options.args.is_empty() {
        vec![".".to_string()]
    } else {
        options.args
    };

    // The html plugin has bad interactions with editor eslint integrations
    // when enabled from the shared config file, so it is forced on here.
    let mut cmd_args = vec![
        "--plugin".to_string(),
        "html".to_string(),
        "--ext".to_string(),
        options.ext,
    ];
    cmd_args.extend(args);

    let code = process::run_pass_thru(binary.as_os_str(), &cmd_args, &[])?;

    if code == 0 {
        println!("{}", "Finished eslint. No errors encountered.".green());
    } else {
        println!("{}", "Finished eslint. Errors encountered.".red());
    }
    Ok(code)
}

/// Binary resolution precedence: explicit flag, ESLINT env var, search path.
fn resolve_binary<E, F>(explicit: Option<PathBuf>, env: &E, finder: &F) -> Option<PathBuf>
where
    E: EnvReader,
    F: ExecFinder,
{
    explicit
        .or_else(|| env.var(ESLINT_ENV).map(PathBuf::from))
        .or_else(|| finder.find_on_path("eslint"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::Path;

    struct FakeEnv(HashMap<&'static str, &'static str>);

    impl EnvReader for FakeEnv {
        fn var(&self, name: &str) -> Option<String> {
            self.0.get(name).map(|v| v.to_string())
        }
    }

    struct FakeFinder(HashMap<&'static str, PathBuf>);

    impl ExecFinder for FakeFinder {
        fn find_in_dir(&self, _filename: &str, _dir: &Path) -> Option<PathBuf> {
            None
        }

        fn find_on_path(&self, filename: &str) -> Option<PathBuf> {
            self.0.get(filename).cloned()
        }
    }

    #[test]
    fn test_explicit_binary_wins() {
        let env = FakeEnv(HashMap::from([("ESLINT", "/from/env/eslint")]));
        let finder = FakeFinder(HashMap::from([(
            "eslint",
            PathBuf::from("/from/path/eslint"),
        )]));

        let binary = resolve_binary(Some(PathBuf::from("/explicit/eslint")), &env, &finder);
        assert_eq!(binary, Some(PathBuf::from("/explicit/eslint")));
    }

    #[test]
    fn test_env_var_beats_search_path() {
        let env = FakeEnv(HashMap::from([("ESLINT", "/from/env/eslint")]));
        let finder = FakeFinder(HashMap::from([(
            "eslint",
            PathBuf::from("/from/path/eslint"),
        )]));

        let binary = resolve_binary(None, &env, &finder);
        assert_eq!(binary, Some(PathBuf::from("/from/env/eslint")));
    }

    #[test]
    fn test_search_path_as_last_resort() {
        let env = FakeEnv(HashMap::new());
        let finder = FakeFinder(HashMap::from([(
            "eslint",
            PathBuf::from("/from/path/eslint"),
        )]));

        let binary = resolve_binary(None, &env, &finder);
        assert_eq!(binary, Some(PathBuf::from("/from/path/eslint")));
    }

    #[test]
    fn test_nothing_found() {
        let binary = resolve_binary(None, &FakeEnv(HashMap::new()), &FakeFinder(HashMap::new()));
        assert_eq!(binary, None);
    }
}
