// crates/get_vcs_root/src/lib.rs

use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use load_package::PackageInfo;

pub mod detect;

pub use detect::{FsDetector, Vcs, VcsDetector};

#[derive(Debug, Error)]
pub enum VcsRootError {
    #[error("package directory {} is not inside source root {}", .dir.display(), .src_root.display())]
    OutsideSourceRoot { dir: PathBuf, src_root: PathBuf },
    #[error("cannot detect version control in {}: {source}", .dir.display())]
    Detect {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Returns the import path of the repository that contains `pkg`.
///
/// Walks from the package directory towards its source root and stops at the
/// first directory `detector` recognises. The source root itself is never
/// queried; when the walk reaches it the package's own import path is used.
pub fn get_vcs_root(pkg: &PackageInfo, detector: &dyn VcsDetector) -> Result<String, VcsRootError> {
    if !pkg.dir.starts_with(&pkg.src_root) {
        return Err(VcsRootError::OutsideSourceRoot {
            dir: pkg.dir.clone(),
            src_root: pkg.src_root.clone(),
        });
    }

    let mut dir: &Path = &pkg.dir;
    while dir != pkg.src_root.as_path() {
        match detector.detect(dir) {
            Ok(Some(vcs)) => {
                debug!(dir = %dir.display(), %vcs, "found repository");
                break;
            }
            Ok(None) => {
                // `dir` is strictly below `src_root`, so a parent exists.
                dir = dir.parent().ok_or_else(|| VcsRootError::OutsideSourceRoot {
                    dir: pkg.dir.clone(),
                    src_root: pkg.src_root.clone(),
                })?;
            }
            Err(source) => {
                return Err(VcsRootError::Detect {
                    dir: dir.to_path_buf(),
                    source,
                })
            }
        }
    }

    let rel = dir.strip_prefix(&pkg.src_root).unwrap_or(Path::new(""));
    if rel.as_os_str().is_empty() {
        debug!(import_path = %pkg.import_path, "no repository below source root");
        return Ok(pkg.import_path.clone());
    }
    Ok(slash_path(rel))
}

fn slash_path(rel: &Path) -> String {
    rel.components()
        .filter_map(|comp| match comp {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
