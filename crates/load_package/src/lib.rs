// crates/load_package/src/lib.rs

use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

pub mod env;

pub use env::{GoEnv, RootOrigin, SourceRoot};

/// A resolved Go package.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackageInfo {
    /// Slash-separated import path, relative to `src_root`.
    pub import_path: String,
    /// Directory holding the package sources.
    pub dir: PathBuf,
    /// The `src` directory the package was resolved under.
    pub src_root: PathBuf,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("import {0:?}: invalid import path")]
    InvalidImportPath(String),
    #[error("import {0:?}: cannot import absolute path")]
    AbsolutePath(String),
    #[error("cannot determine import path for directory {} outside GOROOT/GOPATH", .0.display())]
    OutsideSourceRoots(PathBuf),
    #[error("cannot find package {name:?} in any of: {}", describe_searched(.searched))]
    NotFound {
        name: String,
        searched: Vec<(PathBuf, RootOrigin)>,
    },
    #[error("cannot find package {name:?} in: {}", .dir.display())]
    MissingDir { name: String, dir: PathBuf },
    #[error("no buildable Go source files in {}", .0.display())]
    NoGoFiles(PathBuf),
    #[error("cannot read package directory {}: {source}", .dir.display())]
    ReadDir {
        dir: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

fn describe_searched(searched: &[(PathBuf, RootOrigin)]) -> String {
    if searched.is_empty() {
        return "(no GOROOT or GOPATH configured)".to_string();
    }
    searched
        .iter()
        .map(|(dir, origin)| format!("{} (from {})", dir.display(), origin))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Turns a package identifier into a [`PackageInfo`].
pub trait PackageLoader {
    fn load(&self, name: &str) -> Result<PackageInfo, LoadError>;
}

impl PackageLoader for GoEnv {
    fn load(&self, name: &str) -> Result<PackageInfo, LoadError> {
        load_package(name, self)
    }
}

/// Resolves a package identifier (an import path or a `./relative` directory)
/// against the Go workspace described by `env`.
pub fn load_package(name: &str, env: &GoEnv) -> Result<PackageInfo, LoadError> {
    if name.is_empty() {
        return Err(LoadError::InvalidImportPath(String::new()));
    }
    if Path::new(name).is_absolute() || name.starts_with('/') {
        return Err(LoadError::AbsolutePath(name.to_string()));
    }

    let pkg = if is_local_import(name) {
        load_local(name, env)?
    } else {
        load_import_path(name, env)?
    };

    if !has_buildable_go_files(&pkg.dir)? {
        return Err(LoadError::NoGoFiles(pkg.dir));
    }

    debug!(
        import_path = %pkg.import_path,
        dir = %pkg.dir.display(),
        src_root = %pkg.src_root.display(),
        "resolved package"
    );
    Ok(pkg)
}

fn load_local(name: &str, env: &GoEnv) -> Result<PackageInfo, LoadError> {
    let dir = clean_path(&env.cwd.join(name));

    for root in env.source_roots() {
        let Some((pkg_dir, src_root)) = split_under(&dir, &root.path) else {
            continue;
        };
        let rel = pkg_dir.strip_prefix(&src_root).unwrap_or(Path::new(""));
        if rel.as_os_str().is_empty() {
            break;
        }
        let import_path = to_import_path(rel)
            .ok_or_else(|| LoadError::InvalidImportPath(rel.display().to_string()))?;
        if !pkg_dir.is_dir() {
            return Err(LoadError::MissingDir {
                name: name.to_string(),
                dir: pkg_dir,
            });
        }
        return Ok(PackageInfo {
            import_path,
            dir: pkg_dir,
            src_root,
        });
    }

    Err(LoadError::OutsideSourceRoots(dir))
}

/// Returns `(dir, root)` when `dir` lies inside `root`, either as written or
/// once both sides are resolved through symlinks. The two paths returned are
/// always in the same space, so `dir` keeps `root` as a prefix.
fn split_under(dir: &Path, root: &Path) -> Option<(PathBuf, PathBuf)> {
    if dir.starts_with(root) {
        return Some((dir.to_path_buf(), root.to_path_buf()));
    }
    let real_dir = fs::canonicalize(dir).ok()?;
    let real_root = fs::canonicalize(root).ok()?;
    if !real_dir.starts_with(&real_root) {
        return None;
    }
    debug!(
        dir = %real_dir.display(),
        src_root = %real_root.display(),
        "matched source root after resolving symlinks"
    );
    Some((real_dir, real_root))
}

fn load_import_path(name: &str, env: &GoEnv) -> Result<PackageInfo, LoadError> {
    if !is_valid_import_path(name) {
        return Err(LoadError::InvalidImportPath(name.to_string()));
    }

    let mut searched = Vec::new();
    for root in env.source_roots() {
        let dir = name.split('/').fold(root.path.clone(), |acc, elem| acc.join(elem));
        if dir.is_dir() {
            return Ok(PackageInfo {
                import_path: name.to_string(),
                dir,
                src_root: root.path,
            });
        }
        searched.push((dir, root.origin));
    }

    Err(LoadError::NotFound {
        name: name.to_string(),
        searched,
    })
}

/// Reports whether `name` names a directory relative to the working directory.
pub fn is_local_import(name: &str) -> bool {
    name == "." || name == ".." || name.starts_with("./") || name.starts_with("../")
}

/// Import paths are non-empty `/`-separated elements, none of them `.` or `..`.
pub fn is_valid_import_path(name: &str) -> bool {
    !name.is_empty()
        && !name.contains('\\')
        && name
            .split('/')
            .all(|elem| !elem.is_empty() && elem != "." && elem != "..")
}

fn to_import_path(rel: &Path) -> Option<String> {
    let mut elems = Vec::new();
    for comp in rel.components() {
        match comp {
            Component::Normal(part) => elems.push(part.to_str()?),
            _ => return None,
        }
    }
    Some(elems.join("/"))
}

/// Lexically cleans `path`: drops `.` components and folds `..` into its parent.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// A directory is a package when it holds at least one non-test `.go` file
/// whose name does not start with `_` or `.`. Symlinks count when they
/// resolve to a regular file; dangling ones are skipped.
pub fn has_buildable_go_files(dir: &Path) -> Result<bool, LoadError> {
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|source| LoadError::ReadDir {
            dir: dir.to_path_buf(),
            source,
        })?;
        let Some(file_name) = entry.file_name().to_str() else {
            continue;
        };
        if !is_buildable_go_name(file_name) {
            continue;
        }
        let file_type = entry.file_type();
        if file_type.is_file() {
            return Ok(true);
        }
        if file_type.is_symlink() {
            match fs::metadata(entry.path()) {
                Ok(meta) if meta.is_file() => return Ok(true),
                Ok(_) => {}
                Err(err) => {
                    debug!(path = %entry.path().display(), error = %err, "skipping unresolvable symlink");
                }
            }
        }
    }
    Ok(false)
}

fn is_buildable_go_name(file_name: &str) -> bool {
    file_name.ends_with(".go")
        && !file_name.ends_with("_test.go")
        && !file_name.starts_with('_')
        && !file_name.starts_with('.')
}
