//! Devkit Core - Shared library for the devkit developer-environment commands
//!
//! This library provides the logic behind the `devkit` subcommands that deal
//! with the developer environment rather than the build graph itself:
//!
//! - **Toolchain discovery** - platform-aware location and version gating of
//!   external executables (`node`, `npm`)
//! - **Python** - running the project virtualenv interpreter, and running a
//!   Python unit-test suite file-by-file
//! - **Lint** - invoking and configuring eslint for the project
//!
//! The binaries in this workspace (`devkit`) are thin clap front-ends over
//! these modules; everything user-visible here is a sequence of filesystem
//! probes, environment lookups, and child-process invocations.

pub mod config;
pub mod lint;
pub mod process;
pub mod python;
pub mod toolchain;

// Re-export main types for convenience
pub use config::Project;
pub use toolchain::{Platform, Tool, ToolLocator, ToolVersion};
