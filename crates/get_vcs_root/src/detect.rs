// crates/get_vcs_root/src/detect.rs

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/// Version control systems recognised by their metadata directory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Vcs {
    Git,
    Svn,
    Hg,
    Bzr,
}

impl Vcs {
    /// Checked in this order.
    pub const ALL: [Vcs; 4] = [Vcs::Git, Vcs::Svn, Vcs::Hg, Vcs::Bzr];

    pub fn marker(self) -> &'static str {
        match self {
            Vcs::Git => ".git",
            Vcs::Svn => ".svn",
            Vcs::Hg => ".hg",
            Vcs::Bzr => ".bzr",
        }
    }
}

impl fmt::Display for Vcs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Vcs::Git => "git",
            Vcs::Svn => "svn",
            Vcs::Hg => "hg",
            Vcs::Bzr => "bzr",
        };
        f.write_str(name)
    }
}

/// Decides whether a directory is the root of a version control checkout.
pub trait VcsDetector {
    /// Returns `Ok(Some(vcs))` for a repository root, `Ok(None)` when `dir`
    /// is not one, and `Err` when detection itself failed.
    fn detect(&self, dir: &Path) -> io::Result<Option<Vcs>>;
}

/// Looks for `.git`, `.svn`, `.hg` or `.bzr` entries on disk.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsDetector;

impl VcsDetector for FsDetector {
    fn detect(&self, dir: &Path) -> io::Result<Option<Vcs>> {
        for vcs in Vcs::ALL {
            match fs::metadata(dir.join(vcs.marker())) {
                Ok(_) => return Ok(Some(vcs)),
                Err(err) if err.kind() == io::ErrorKind::NotFound => continue,
                Err(err) => return Err(err),
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use tempfile::tempdir;

    #[test]
    fn detects_git_directory() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        assert_eq!(FsDetector.detect(dir.path()).unwrap(), Some(Vcs::Git));
    }

    #[test]
    fn detects_git_file_of_a_worktree() {
        let dir = tempdir().unwrap();
        // Worktrees and submodules use a `.git` file instead of a directory.
        fs::write(dir.path().join(".git"), "gitdir: ../elsewhere\n").unwrap();
        assert_eq!(FsDetector.detect(dir.path()).unwrap(), Some(Vcs::Git));
    }

    #[test]
    fn detects_other_systems() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".hg")).unwrap();
        assert_eq!(FsDetector.detect(dir.path()).unwrap(), Some(Vcs::Hg));
    }

    #[test]
    fn git_wins_over_other_markers() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".svn")).unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        assert_eq!(FsDetector.detect(dir.path()).unwrap(), Some(Vcs::Git));
    }

    #[test]
    fn plain_directory_is_not_a_repository() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("main.go")).unwrap();
        assert_eq!(FsDetector.detect(dir.path()).unwrap(), None);
    }

    #[test]
    fn display_names() {
        assert_eq!(Vcs::Git.to_string(), "git");
        assert_eq!(Vcs::Bzr.marker(), ".bzr");
    }
}
