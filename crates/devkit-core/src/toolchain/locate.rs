//! Platform-aware location of external executables
//!
//! Finds a named external tool (`node`, `npm`) and optionally gates it on a
//! minimum reported version. On Windows the search walks a fixed list of
//! conventional install directories built from environment variables, trying
//! `.cmd`, `.exe` and the bare name in each directory before moving to the
//! next; installers there do not reliably register on PATH. Everywhere else
//! the search is a single lookup on the executable search path.
//!
//! The search is first-found-wins in a deterministic order, never
//! best-version-wins. A candidate that cannot be probed (spawn failure,
//! non-zero exit, unparseable output) is skipped and the search continues;
//! no error escapes `locate`.

use super::version::ToolVersion;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Extension variants tried on Windows, in order, within each directory.
const WINDOWS_EXTENSIONS: [&str; 3] = [".cmd", ".exe", ""];

/// Environment variables naming conventional install roots on Windows.
const WINDOWS_PROGRAM_DIRS: [&str; 3] = ["ProgramFiles", "ProgramW6432", "ProgramFiles(x86)"];

const NODE_NOT_FOUND_MESSAGE: &str = "\
nodejs is either not installed or is installed to a non-standard path.
Please install nodejs from https://nodejs.org and try again.

Valid installation paths:";

const NPM_NOT_FOUND_MESSAGE: &str = "\
Node Package Manager (npm) is either not installed or installed to a
non-standard path. Please install npm from https://nodejs.org (it comes as an
option in the node installation) and try again.

Valid installation paths:";

/// Operating-system family, resolved once and passed in.
///
/// Only used to choose search locations and to tailor the not-found hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Linux
        }
    }
}

/// External tools the locator knows how to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Node,
    Npm,
}

impl Tool {
    pub fn name(&self) -> &'static str {
        match self {
            Tool::Node => "node",
            Tool::Npm => "npm",
        }
    }

    fn not_found_header(&self) -> &'static str {
        match self {
            Tool::Node => NODE_NOT_FOUND_MESSAGE,
            Tool::Npm => NPM_NOT_FOUND_MESSAGE,
        }
    }
}

/// Environment-variable access.
pub trait EnvReader {
    fn var(&self, name: &str) -> Option<String>;
}

pub struct SystemEnv;

impl EnvReader for SystemEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Executable lookup, either inside one directory or on the search path.
pub trait ExecFinder {
    fn find_in_dir(&self, filename: &str, dir: &Path) -> Option<PathBuf>;
    fn find_on_path(&self, filename: &str) -> Option<PathBuf>;
}

pub struct SystemFinder;

impl ExecFinder for SystemFinder {
    fn find_in_dir(&self, filename: &str, dir: &Path) -> Option<PathBuf> {
        which::which_in(filename, Some(dir.as_os_str()), dir).ok()
    }

    fn find_on_path(&self, filename: &str) -> Option<PathBuf> {
        which::which(filename).ok()
    }
}

/// One `--version` probe against a candidate executable.
pub trait VersionProbe {
    /// The trimmed version output, or `None` if the candidate could not be
    /// probed (spawn failure or non-zero exit).
    fn report(&self, exe: &Path) -> Option<String>;
}

pub struct SystemProbe;

impl VersionProbe for SystemProbe {
    fn report(&self, exe: &Path) -> Option<String> {
        let output = Command::new(exe).arg("--version").output().ok()?;
        if !output.status.success() {
            return None;
        }
        // Some tools report on stderr.
        let text = if output.stdout.is_empty() {
            String::from_utf8_lossy(&output.stderr).trim().to_string()
        } else {
            String::from_utf8_lossy(&output.stdout).trim().to_string()
        };
        Some(text)
    }
}

/// Locator for external tools, parameterized over its collaborators so the
/// search logic is testable without touching the real system.
pub struct ToolLocator<E, F, P> {
    platform: Platform,
    env: E,
    finder: F,
    probe: P,
}

impl ToolLocator<SystemEnv, SystemFinder, SystemProbe> {
    /// Locator backed by the real environment, filesystem and processes.
    pub fn system() -> Self {
        Self::new(Platform::current(), SystemEnv, SystemFinder, SystemProbe)
    }
}

impl<E, F, P> ToolLocator<E, F, P>
where
    E: EnvReader,
    F: ExecFinder,
    P: VersionProbe,
{
    pub fn new(platform: Platform, env: E, finder: F, probe: P) -> Self {
        Self {
            platform,
            env,
            finder,
            probe,
        }
    }

    /// Find `tool`, optionally requiring a minimum reported version.
    ///
    /// Returns the first qualifying path in search order. On failure a
    /// diagnostic naming the tool and every attempted location has already
    /// been printed; callers only need to abort.
    pub fn locate(&self, tool: Tool, minimum: Option<&ToolVersion>) -> Option<PathBuf> {
        match self.search(tool, minimum) {
            Ok(path) => Some(path),
            Err(attempted) => {
                println!("{}", not_found_message(tool, self.platform, &attempted));
                None
            }
        }
    }

    /// The raw search: qualifying path, or the list of attempted directories.
    fn search(&self, tool: Tool, minimum: Option<&ToolVersion>) -> Result<PathBuf, Vec<PathBuf>> {
        match self.platform {
            Platform::Windows => {
                let dirs = self.windows_install_dirs();
                for dir in &dirs {
                    for ext in WINDOWS_EXTENSIONS {
                        let filename = format!("{}{}", tool.name(), ext);
                        if let Some(path) = self.finder.find_in_dir(&filename, dir) {
                            if self.qualifies(&path, minimum) {
                                return Ok(path);
                            }
                        }
                    }
                }
                Err(dirs)
            }
            Platform::MacOs | Platform::Linux => {
                if let Some(path) = self.finder.find_on_path(tool.name()) {
                    if self.qualifies(&path, minimum) {
                        return Ok(path);
                    }
                }
                Err(Vec::new())
            }
        }
    }

    fn qualifies(&self, path: &Path, minimum: Option<&ToolVersion>) -> bool {
        let Some(minimum) = minimum else {
            return true;
        };
        let Some(reported) = self.probe.report(path) else {
            return false;
        };
        match ToolVersion::parse(&reported) {
            Ok(version) => version >= *minimum,
            Err(_) => false,
        }
    }

    /// Conventional nodejs install directories on Windows, deduplicated
    /// preserving order. Installers there do not reliably add themselves to
    /// PATH, so these directories are the whole search space.
    fn windows_install_dirs(&self) -> Vec<PathBuf> {
        let mut dirs = Vec::new();
        if let Some(drive) = self.env.var("SystemDrive") {
            dirs.push(PathBuf::from(format!("{}\\nodejs", drive)));
        }
        for var in WINDOWS_PROGRAM_DIRS {
            if let Some(base) = self.env.var(var) {
                let dir = Path::new(&base).join("nodejs");
                if !dirs.contains(&dir) {
                    dirs.push(dir);
                }
            }
        }
        dirs
    }
}

/// The diagnostic printed when a tool cannot be found: the tool-specific
/// header, then every attempted directory in order (Windows) or a single
/// conventional path as a hint (macOS, Linux).
pub fn not_found_message(tool: Tool, platform: Platform, attempted: &[PathBuf]) -> String {
    let mut message = String::from(tool.not_found_header());
    match platform {
        Platform::Windows => {
            for dir in attempted {
                message.push_str(&format!("\n  - {}", dir.display()));
            }
        }
        Platform::MacOs => message.push_str("\n  - /usr/local/bin/node"),
        Platform::Linux => message.push_str("\n  - /usr/bin/nodejs"),
    }
    message
}
