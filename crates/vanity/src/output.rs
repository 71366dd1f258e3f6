// crates/vanity/src/output.rs

use std::fs::{DirBuilder, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

pub const INDEX_FILE: &str = "index.html";

/// Hands out a writer per package: either the shared stream or a fresh
/// `<base>/<import path>/index.html`.
pub struct OutputWriter<W: Write> {
    stream: W,
    base_dir: Option<PathBuf>,
}

impl<W: Write> OutputWriter<W> {
    pub fn new(stream: W, base_dir: Option<PathBuf>) -> Self {
        Self { stream, base_dir }
    }

    /// Where the page for `import_path` goes, or `None` for the stream.
    pub fn index_path(&self, import_path: &str) -> Option<PathBuf> {
        self.base_dir
            .as_deref()
            .map(|base| package_dir(base, import_path).join(INDEX_FILE))
    }

    /// Opens the destination for `import_path`, creating directories as needed.
    ///
    /// Callers flush and drop the handle before opening the next one.
    pub fn open(&mut self, import_path: &str) -> io::Result<Box<dyn Write + '_>> {
        let Some(base) = self.base_dir.as_deref() else {
            return Ok(Box::new(&mut self.stream));
        };

        let dir = package_dir(base, import_path);
        create_dir_tree(&dir)?;
        let file = File::create(dir.join(INDEX_FILE))?;
        Ok(Box::new(BufWriter::new(file)))
    }
}

fn package_dir(base: &Path, import_path: &str) -> PathBuf {
    import_path
        .split('/')
        .fold(base.to_path_buf(), |acc, elem| acc.join(elem))
}

fn create_dir_tree(dir: &Path) -> io::Result<()> {
    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }
    builder.create(dir)
}
