//! External toolchain discovery
//!
//! This module provides:
//! - Loose dotted version parsing and comparison for `--version` gates
//! - Platform-aware location of external executables (`node`, `npm`)

pub mod locate;
pub mod version;

pub use locate::{
    EnvReader, ExecFinder, Platform, SystemEnv, SystemFinder, SystemProbe, Tool, ToolLocator,
    VersionProbe,
};
pub use version::{ToolVersion, VersionError};
