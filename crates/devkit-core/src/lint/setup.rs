//! Interactive eslint setup
//!
//! Installs the pinned eslint version and the approved plugins globally, and
//! links any local plugin packages the project config names.

use crate::config::Project;
use crate::toolchain::locate::{EnvReader, ExecFinder, VersionProbe};
use crate::toolchain::{Tool, ToolLocator};
use anyhow::Result;
use colored::Colorize;
use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, Stdio};

/// The eslint version compatible with the local plugin packages.
const ESLINT_VERSION: &str = "1.10.3";

/// Plugins installed globally alongside eslint.
const GLOBAL_PLUGINS: [&str; 2] = ["eslint-plugin-html", "eslint-plugin-react"];

/// Install eslint and its plugins via npm. Returns the exit code.
pub fn eslint_setup<E, F, P>(project: &Project, locator: &ToolLocator<E, F, P>) -> Result<i32>
where
    E: EnvReader,
    F: ExecFinder,
    P: VersionProbe,
{
    let Some(npm) = locator.locate(Tool::Npm, None) else {
        return Ok(1);
    };
    let npm = npm.as_os_str();

    let eslint_spec = format!("eslint@{}", ESLINT_VERSION);
    if !install_package("eslint", npm, &["install", &eslint_spec, "-g"], None) {
        return Ok(1);
    }

    for plugin_dir in &project.config.lint.local_plugins {
        let dir = project.root.join(plugin_dir);
        if !install_package(plugin_dir, npm, &["link"], Some(&dir)) {
            return Ok(1);
        }
    }

    for plugin in GLOBAL_PLUGINS {
        if !install_package(plugin, npm, &["install", plugin, "-g"], None) {
            return Ok(1);
        }
    }

    println!(
        "\n{}",
        "ESLint and approved plugins installed successfully!".green()
    );
    Ok(0)
}

/// Run one npm step, swallowing its stdout. Prints the command being run and
/// an actionable message on failure.
fn install_package(name: &str, npm: &OsStr, args: &[&str], cwd: Option<&Path>) -> bool {
    println!(
        "\nInstalling {} using \"{} {}\"...",
        name,
        npm.to_string_lossy(),
        args.join(" ")
    );

    let mut command = Command::new(npm);
    command.args(args).stdout(Stdio::null());
    if let Some(dir) = cwd {
        command.current_dir(dir);
    }

    match command.status() {
        Ok(status) if status.success() => true,
        _ => {
            match cwd {
                Some(dir) => println!(
                    "\n{}",
                    format!(
                        "Error installing {} in the {} folder, aborting.",
                        name,
                        dir.display()
                    )
                    .red()
                ),
                None => println!("\n{}", format!("Error installing {}, aborting.", name).red()),
            }
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Project, ProjectConfig};
    use crate::toolchain::Platform;
    use std::collections::HashMap;
    use std::fs;
    use std::path::PathBuf;

    #[test]
    fn test_install_package_success() {
        assert!(install_package(
            "ok-step",
            OsStr::new("sh"),
            &["-c", "exit 0"],
            None
        ));
    }

    #[test]
    fn test_install_package_failure() {
        assert!(!install_package(
            "bad-step",
            OsStr::new("sh"),
            &["-c", "exit 1"],
            None
        ));
    }

    #[test]
    fn test_install_package_runs_in_cwd() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("marker"), "").unwrap();

        assert!(install_package(
            "linked-step",
            OsStr::new("sh"),
            &["-c", "test -f marker"],
            Some(dir.path())
        ));
        assert!(!install_package(
            "missing-step",
            OsStr::new("sh"),
            &["-c", "test -f no_such_marker"],
            Some(dir.path())
        ));
    }

    struct FakeEnv;

    impl EnvReader for FakeEnv {
        fn var(&self, _name: &str) -> Option<String> {
            None
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

    struct FakeProbe;

    impl VersionProbe for FakeProbe {
        fn report(&self, _exe: &Path) -> Option<String> {
            None
        }
    }

    /// A stand-in npm: appends its arguments to a log file, then exits with
    /// the given code.
    #[cfg(unix)]
    fn fake_npm(dir: &Path, log: &Path, exit_code: i32) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let npm = dir.join("npm");
        fs::write(
            &npm,
            format!("#!/bin/sh\necho \"$@\" >> {}\nexit {}\n", log.display(), exit_code),
        )
        .unwrap();
        fs::set_permissions(&npm, fs::Permissions::from_mode(0o755)).unwrap();
        npm
    }

    fn project_at(root: &Path) -> Project {
        Project {
            root: root.to_path_buf(),
            config: ProjectConfig::default(),
        }
    }

    fn locator_with_npm(npm: Option<PathBuf>) -> ToolLocator<FakeEnv, FakeFinder, FakeProbe> {
        let mut on_path = HashMap::new();
        if let Some(npm) = npm {
            on_path.insert("npm", npm);
        }
        ToolLocator::new(Platform::Linux, FakeEnv, FakeFinder(on_path), FakeProbe)
    }

    #[test]
    fn test_setup_fails_without_npm() {
        let dir = tempfile::tempdir().unwrap();
        let code = eslint_setup(&project_at(dir.path()), &locator_with_npm(None)).unwrap();
        assert_eq!(code, 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_setup_aborts_on_first_failing_step() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("npm.log");
        let npm = fake_npm(dir.path(), &log, 1);

        let code = eslint_setup(&project_at(dir.path()), &locator_with_npm(Some(npm))).unwrap();

        assert_eq!(code, 1);
        // Only the first step ran before the abort.
        let invocations = fs::read_to_string(&log).unwrap();
        assert_eq!(
            invocations,
            format!("install eslint@{} -g\n", ESLINT_VERSION)
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_setup_runs_every_step_on_success() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("npm.log");
        let npm = fake_npm(dir.path(), &log, 0);

        let code = eslint_setup(&project_at(dir.path()), &locator_with_npm(Some(npm))).unwrap();

        assert_eq!(code, 0);
        let invocations: Vec<String> = fs::read_to_string(&log)
            .unwrap()
            .lines()
            .map(String::from)
            .collect();
        assert_eq!(
            invocations,
            vec![
                format!("install eslint@{} -g", ESLINT_VERSION),
                "install eslint-plugin-html -g".to_string(),
                "install eslint-plugin-react -g".to_string(),
            ]
        );
    }
}
