// crates/vanity/src/lib.rs

use anyhow::{Context, Result};
use std::io::{self, Write};
use tracing::{debug, info};

use get_vcs_root::{get_vcs_root, VcsDetector};
use load_package::PackageLoader;
use render_index::{write_index, VanityRecord};

pub mod cli;
pub mod config;
pub mod input;
pub mod logging;
pub mod output;

pub use config::Config;
pub use output::OutputWriter;

/// The two external capabilities the pipeline depends on.
pub struct Services<'a> {
    pub loader: &'a dyn PackageLoader,
    pub detector: &'a dyn VcsDetector,
}

/// Writes an index page for every identifier, in order, into `stream` or the
/// configured output directory. Stops at the first error.
///
/// Returns the number of pages written.
pub fn run<I, W>(config: &Config, services: &Services<'_>, identifiers: I, stream: W) -> Result<usize>
where
    I: IntoIterator<Item = io::Result<String>>,
    W: Write,
{
    debug!(
        replace = %config.replacer,
        output = ?config.output_dir,
        goroot = ?config.go_env.goroot,
        gopath = ?config.go_env.gopath,
        "configuration"
    );

    let mut out = OutputWriter::new(stream, config.output_dir.clone());
    let mut written = 0;
    for name in identifiers {
        let name = name.context("failed to read package list")?;
        write_package_index(&name, config, services, &mut out)?;
        written += 1;
    }

    info!(pages = written, "done");
    Ok(written)
}

/// Resolves one package, finds its repository root and renders its page.
pub fn write_package_index<W: Write>(
    name: &str,
    config: &Config,
    services: &Services<'_>,
    out: &mut OutputWriter<W>,
) -> Result<()> {
    debug!(package = name, "loading");
    let pkg = services.loader.load(name)?;
    let root = get_vcs_root(&pkg, services.detector)?;
    let repository = config.replacer.replace(&root);
    let record = VanityRecord::new(&pkg.import_path, &root, &repository);

    let target = out.index_path(&pkg.import_path);
    let describe = || match &target {
        Some(path) => path.display().to_string(),
        None => "standard output".to_string(),
    };

    let mut w = out
        .open(&pkg.import_path)
        .with_context(|| format!("cannot create {}", describe()))?;
    write_index(&mut w, &record)
        .and_then(|()| w.flush())
        .with_context(|| format!("cannot write {}", describe()))?;

    info!(
        import_path = %pkg.import_path,
        root = %root,
        repository = %repository,
        dest = %describe(),
        "wrote index"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use get_vcs_root::Vcs;
    use load_package::{GoEnv, LoadError, PackageInfo};
    use replace_import_paths::Replacer;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::tempdir;

    /// Resolves any valid import path under `/gopath/src` without touching disk.
    struct FakeLoader;

    impl PackageLoader for FakeLoader {
        fn load(&self, name: &str) -> Result<PackageInfo, LoadError> {
            if !load_package::is_valid_import_path(name) {
                return Err(LoadError::InvalidImportPath(name.to_string()));
            }
            Ok(PackageInfo {
                import_path: name.to_string(),
                dir: Path::new("/gopath/src").join(name),
                src_root: PathBuf::from("/gopath/src"),
            })
        }
    }

    /// Treats every directory exactly `depth` levels below the source root as a checkout.
    struct DepthDetector {
        depth: usize,
    }

    impl VcsDetector for DepthDetector {
        fn detect(&self, dir: &Path) -> io::Result<Option<Vcs>> {
            let rel = dir.strip_prefix("/gopath/src").unwrap();
            if rel.components().count() == self.depth {
                Ok(Some(Vcs::Git))
            } else {
                Ok(None)
            }
        }
    }

    fn config(replace: &str, output_dir: Option<PathBuf>) -> Config {
        Config {
            replacer: Replacer::parse(replace).unwrap(),
            output_dir,
            packages: Vec::new(),
            go_env: GoEnv::new(None, Vec::new(), PathBuf::from("/")),
            verbose: false,
        }
    }

    fn ids(names: &[&str]) -> Vec<io::Result<String>> {
        names.iter().map(|n| Ok(n.to_string())).collect()
    }

    #[test]
    fn renders_rewritten_repository() {
        let config = config("example.com/foo=github.com/bar", None);
        let services = Services {
            loader: &FakeLoader,
            detector: &DepthDetector { depth: 2 },
        };
        let mut stdout = Vec::new();
        let n = run(&config, &services, ids(&["example.com/foo"]), &mut stdout).unwrap();
        assert_eq!(n, 1);

        let html = String::from_utf8(stdout).unwrap();
        assert!(html.contains(
            "<meta name=\"go-import\" content=\"example.com/foo git https://github.com/bar.git\">"
        ));
    }

    #[test]
    fn subpackages_share_the_repository_root() {
        let config = config("example.com=github.com/bar", None);
        let services = Services {
            loader: &FakeLoader,
            detector: &DepthDetector { depth: 2 },
        };
        let mut stdout = Vec::new();
        run(&config, &services, ids(&["example.com/foo/cmd/tool"]), &mut stdout).unwrap();

        let html = String::from_utf8(stdout).unwrap();
        assert!(html.contains("content=\"example.com/foo git https://github.com/bar/foo.git\""));
        assert!(html.contains("https://godoc.org/example.com/foo/cmd/tool"));
    }

    #[test]
    fn stream_mode_concatenates_in_input_order() {
        let config = config("", None);
        let services = Services {
            loader: &FakeLoader,
            detector: &DepthDetector { depth: 2 },
        };
        let mut stdout = Vec::new();
        run(&config, &services, ids(&["a.io/one", "b.io/two"]), &mut stdout).unwrap();

        let html = String::from_utf8(stdout).unwrap();
        assert_eq!(html.matches("<!DOCTYPE html>").count(), 2);
        let first = html.find("a.io/one git https://a.io/one.git").unwrap();
        let second = html.find("b.io/two git https://b.io/two.git").unwrap();
        assert!(first < second);
        assert!(html.contains("</html>\n<!DOCTYPE html>"));
    }

    #[test]
    fn directory_mode_writes_one_file_per_package() {
        let tmp = tempdir().unwrap();
        let config = config("example.com=github.com/bar", Some(tmp.path().to_path_buf()));
        let services = Services {
            loader: &FakeLoader,
            detector: &DepthDetector { depth: 2 },
        };
        let mut stdout = Vec::new();
        run(
            &config,
            &services,
            ids(&["example.com/foo", "example.com/foo/sub"]),
            &mut stdout,
        )
        .unwrap();
        assert!(stdout.is_empty());

        let foo = fs::read_to_string(tmp.path().join("example.com/foo/index.html")).unwrap();
        let sub = fs::read_to_string(tmp.path().join("example.com/foo/sub/index.html")).unwrap();
        assert!(foo.contains("example.com/foo") && foo.contains("github.com/bar/foo"));
        assert!(sub.contains("https://godoc.org/example.com/foo/sub"));
    }

    #[test]
    fn stops_at_first_failing_package() {
        let config = config("", None);
        let services = Services {
            loader: &FakeLoader,
            detector: &DepthDetector { depth: 2 },
        };
        let mut stdout = Vec::new();
        let err = run(&config, &services, ids(&["a.io/one", "", "b.io/two"]), &mut stdout)
            .unwrap_err();
        assert_eq!(err.to_string(), "import \"\": invalid import path");

        let html = String::from_utf8(stdout).unwrap();
        assert!(html.contains("a.io/one"));
        assert!(!html.contains("b.io/two"));
    }

    #[test]
    fn input_errors_are_fatal() {
        let config = config("", None);
        let services = Services {
            loader: &FakeLoader,
            detector: &DepthDetector { depth: 2 },
        };
        let input = vec![Err(io::Error::new(io::ErrorKind::InvalidData, "bad utf-8"))];
        let err = run(&config, &services, input, io::sink()).unwrap_err();
        assert!(format!("{:#}", err).contains("failed to read package list"));
    }
}
