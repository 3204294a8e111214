//! devkit - developer-environment subcommands
//!
//! Thin clap front-end over `devkit-core`: each subcommand resolves the
//! project, delegates, and exits with the code the underlying tool produced.

use anyhow::Result;
use clap::{Parser, Subcommand};
use devkit_core::config::Project;
use devkit_core::lint::{self, EslintOptions};
use devkit_core::python::{self, test_runner};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "devkit")]
#[command(about = "Developer-environment commands for devkit projects")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run Python inside the project virtualenv
    Python(PythonArgs),
    /// Run Python unit tests, one interpreter per file
    PythonTest(PythonTestArgs),
    /// Run eslint or help configure eslint for development
    Eslint(EslintArgs),
}

#[derive(Parser, Debug)]
pub struct PythonArgs {
    /// Arguments passed through to the interpreter
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

#[derive(Parser, Debug)]
pub struct PythonTestArgs {
    /// Verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Stop running tests after the first error or failure
    #[arg(long)]
    pub stop: bool,

    /// Tests to run. Each test can be a single file or a directory
    #[arg(required = true, value_name = "TEST")]
    pub tests: Vec<String>,
}

#[derive(Parser, Debug)]
pub struct EslintArgs {
    /// Configure eslint for optimal development
    #[arg(short, long)]
    pub setup: bool,

    /// Filename extensions to lint
    #[arg(short, long, default_value = "[.js,.jsm,.jsx,.xml,.html]")]
    pub ext: String,

    /// Path to the eslint binary
    #[arg(short, long)]
    pub binary: Option<PathBuf>,

    /// Arguments passed through to eslint
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

impl From<EslintArgs> for EslintOptions {
    fn from(args: EslintArgs) -> Self {
        EslintOptions {
            setup: args.setup,
            ext: args.ext,
            binary: args.binary,
            args: args.args,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let project = Project::discover()?;

    let code = match args.command {
        Command::Python(python_args) => python::run_python(&project, &python_args.args)?,
        Command::PythonTest(test_args) => {
            let options = test_runner::TestRunOptions {
                verbose: test_args.verbose,
                stop: test_args.stop,
            };
            test_runner::run_tests(&project, &test_args.tests, options).await?
        }
        Command::Eslint(eslint_args) => lint::run_eslint(&project, eslint_args.into())?,
    };

    std::process::exit(code);
}
