//! File-by-file Python test runner
//!
//! Python's unittest discovery has problems with clashing namespaces when
//! importing multiple test modules, so each test file runs in its own
//! interpreter process. The harness inside each file is expected to emit
//! result lines starting with `TEST-`; a file that never does gets flagged,
//! since that usually means the file forgot to invoke its test main.

use crate::config::Project;
use crate::process;
use crate::python::{venv, NO_BYTECODE_ENV};
use crate::toolchain::Platform;
use anyhow::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Output lines starting with this mark a harness result.
const HARNESS_MARKER: &str = "TEST-";

#[derive(Debug, Clone, Copy, Default)]
pub struct TestRunOptions {
    /// Report a pass/fail line per file.
    pub verbose: bool,
    /// Stop after the first error or failure.
    pub stop: bool,
}

/// Test files resolved from the command-line TEST arguments.
#[derive(Debug, Default, PartialEq)]
pub struct CollectedTests {
    pub files: Vec<PathBuf>,
    /// Arguments that matched nothing in any search directory.
    pub invalid: Vec<String>,
}

/// Resolve TEST arguments against `search_dirs`, first hit wins.
///
/// Both the working directory and the project root are searched so tests can
/// be named from either; stopping at the first hit keeps a test from running
/// twice when the two coincide. Each argument may be a `.py` file, a file
/// with the `.py` extension omitted, or a directory holding `test*.py` /
/// `unit*.py` files.
pub fn collect_test_files(tests: &[String], search_dirs: &[PathBuf]) -> CollectedTests {
    let mut collected = CollectedTests::default();
    for test in tests {
        let mut matched = false;
        for dir in search_dirs {
            let candidate = dir.join(test);
            if test.ends_with(".py") && candidate.is_file() {
                collected.files.push(candidate);
                matched = true;
                break;
            }
            let with_ext = dir.join(format!("{}.py", test));
            if with_ext.is_file() {
                collected.files.push(with_ext);
                matched = true;
                break;
            }
            if candidate.is_dir() {
                collected.files.extend(tests_in_dir(&candidate));
                matched = true;
                break;
            }
        }
        if !matched {
            collected.invalid.push(test.clone());
        }
    }
    collected
}

/// Direct children of `dir` matching `test*.py` then `unit*.py`, each group
/// sorted for a deterministic run order.
fn tests_in_dir(dir: &Path) -> Vec<PathBuf> {
    let mut test_files = Vec::new();
    let mut unit_files = Vec::new();
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !name.ends_with(".py") {
            continue;
        }
        if name.starts_with("test") {
            test_files.push(path);
        } else if name.starts_with("unit") {
            unit_files.push(path);
        }
    }
    test_files.sort();
    unit_files.sort();
    test_files.extend(unit_files);
    test_files
}

/// Outcome of running a batch of test files.
#[derive(Debug, Default)]
pub struct TestRunSummary {
    /// Files whose interpreter exited non-zero.
    pub failed: Vec<PathBuf>,
    /// Files that never emitted a harness result line.
    pub missing_output: Vec<PathBuf>,
    /// 0 iff every file that ran exited 0.
    pub exit_code: i32,
}

/// Run the named tests file-by-file in the project virtualenv.
///
/// Returns the overall exit code: 0 iff every file passed.
pub async fn run_tests(
    project: &Project,
    tests: &[String],
    options: TestRunOptions,
) -> Result<i32> {
    let python = venv::python_path(
        &project.root,
        Platform::current(),
        project.config.venv_dir.as_deref(),
    )?;

    let search_dirs = [PathBuf::from("."), project.root.clone()];
    let collected = collect_test_files(tests, &search_dirs);

    for test in &collected.invalid {
        println!(
            "{} Invalid test: {}",
            "TEST-UNEXPECTED-FAIL |".red(),
            test
        );
    }
    if options.stop && !collected.invalid.is_empty() {
        return Ok(1);
    }

    let summary = run_files(&python, &collected.files, options).await?;
    Ok(summary.exit_code)
}

/// Run each file in its own interpreter process, reporting as it goes.
///
/// With `stop` set the loop aborts after the first failing file; the files
/// after it never run.
pub async fn run_files(
    python: &Path,
    files: &[PathBuf],
    options: TestRunOptions,
) -> Result<TestRunSummary> {
    let mut summary = TestRunSummary::default();
    for file in files {
        let mut saw_harness_output = false;
        let code = process::run_streaming(
            python.as_os_str(),
            [file.as_os_str()],
            &[NO_BYTECODE_ENV],
            |line| {
                if line.starts_with(HARNESS_MARKER) {
                    saw_harness_output = true;
                }
            },
        )
        .await?;

        if !saw_harness_output {
            println!(
                "{} No test output (missing test harness main call?): {}",
                "TEST-UNEXPECTED-FAIL |".red(),
                file.display()
            );
            summary.missing_output.push(file.clone());
        }

        if code != 0 {
            summary.failed.push(file.clone());
            if options.verbose {
                println!("{} {}", "Test failed:".red(), file.display());
            }
        } else if options.verbose {
            println!("{} {}", "Test passed:".green(), file.display());
        }

        if options.stop && !summary.failed.is_empty() {
            break;
        }
    }
    summary.exit_code = if summary.failed.is_empty() { 0 } else { 1 };
    Ok(summary)
}
