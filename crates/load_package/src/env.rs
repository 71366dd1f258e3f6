// crates/load_package/src/env.rs

use std::env;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

use crate::clean_path;

/// Which environment variable a source root came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RootOrigin {
    Goroot,
    Gopath,
}

impl fmt::Display for RootOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RootOrigin::Goroot => write!(f, "$GOROOT"),
            RootOrigin::Gopath => write!(f, "$GOPATH"),
        }
    }
}

/// A `src` directory under which packages are resolved by import path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceRoot {
    pub path: PathBuf,
    pub origin: RootOrigin,
}

/// The Go workspace layout used to resolve package identifiers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GoEnv {
    pub goroot: Option<PathBuf>,
    pub gopath: Vec<PathBuf>,
    pub cwd: PathBuf,
}

impl GoEnv {
    pub fn new(goroot: Option<PathBuf>, gopath: Vec<PathBuf>, cwd: PathBuf) -> Self {
        Self {
            goroot: goroot.map(|p| clean_path(&p)),
            gopath: gopath.iter().map(|p| clean_path(p)).collect(),
            cwd: clean_path(&cwd),
        }
    }

    /// Reads `$GOROOT`, `$GOPATH` and the working directory of the process.
    ///
    /// When `$GOROOT` is unset the installed toolchain is asked for its own
    /// (`go env GOROOT`). When `$GOPATH` is unset or empty it defaults to
    /// `$HOME/go`. Relative entries are ignored.
    pub fn from_env() -> io::Result<Self> {
        let cwd = env::current_dir()?;

        let goroot = env::var_os("GOROOT")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .filter(|p| p.is_absolute())
            .or_else(toolchain_goroot);

        let mut gopath: Vec<PathBuf> = env::var_os("GOPATH")
            .map(|v| env::split_paths(&v).collect())
            .unwrap_or_default();
        gopath.retain(|p| p.is_absolute());
        if gopath.is_empty() {
            if let Some(home) = env::var_os("HOME").filter(|h| !h.is_empty()) {
                gopath.push(Path::new(&home).join("go"));
            }
        }

        Ok(Self::new(goroot, gopath, cwd))
    }

    /// Source roots in lookup order: `$GOROOT/src`, then each `$GOPATH` entry.
    pub fn source_roots(&self) -> Vec<SourceRoot> {
        let mut roots = Vec::new();
        if let Some(goroot) = &self.goroot {
            roots.push(SourceRoot {
                path: goroot.join("src"),
                origin: RootOrigin::Goroot,
            });
        }
        for entry in &self.gopath {
            // GOPATH set to GOROOT would list the same tree twice.
            if self.goroot.as_ref() == Some(entry) {
                continue;
            }
            roots.push(SourceRoot {
                path: entry.join("src"),
                origin: RootOrigin::Gopath,
            });
        }
        roots
    }
}

/// Runs `go env GOROOT`. A missing or failing toolchain yields `None`.
pub fn toolchain_goroot() -> Option<PathBuf> {
    let output = match Command::new("go").args(["env", "GOROOT"]).output() {
        Ok(output) => output,
        Err(err) => {
            debug!(error = %err, "no go toolchain to ask for GOROOT");
            return None;
        }
    };
    if !output.status.success() {
        debug!(status = %output.status, "go env GOROOT failed");
        return None;
    }
    parse_goroot(&String::from_utf8_lossy(&output.stdout))
}

fn parse_goroot(stdout: &str) -> Option<PathBuf> {
    let path = PathBuf::from(stdout.trim());
    path.is_absolute().then_some(path)
}
