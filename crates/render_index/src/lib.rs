// crates/render_index/src/lib.rs

use std::io::{self, Write};

pub mod escape;

use escape::escape_attr;

/// Documentation viewer the generated pages redirect to.
pub const DOC_BASE_URL: &str = "https://godoc.org/";

/// A GitHub-style repository: `https://<repository>.git` for cloning and
/// `blob/master` URLs for browsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GitHub {
    /// Import path of the repository root.
    pub import_path: String,
    /// Host and path of the actual repository, e.g. `github.com/user/repo`.
    pub repository: String,
}

impl GitHub {
    /// Content of the `go-import` meta tag.
    ///
    /// See: https://golang.org/cmd/go/#hdr-Remote_import_paths
    pub fn go_import(&self) -> String {
        format!("{} git https://{}.git", self.import_path, self.repository)
    }

    pub fn go_source_dir(&self) -> String {
        format!("https://{}/blob/master{{/dir}}", self.repository)
    }

    pub fn go_source_file(&self) -> String {
        format!("https://{}/blob/master{{/dir}}/{{file}}#L{{line}}", self.repository)
    }

    /// Content of the `go-source` meta tag.
    ///
    /// See: https://github.com/golang/gddo/wiki/Source-Code-Links
    pub fn go_source(&self) -> String {
        format!(
            "{} _ {} {}",
            self.import_path,
            self.go_source_dir(),
            self.go_source_file()
        )
    }
}

/// Everything a single `index.html` is rendered from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VanityRecord {
    /// Import path of the package the page is for.
    pub import_path: String,
    pub vcs: GitHub,
}

impl VanityRecord {
    pub fn new(import_path: &str, root_import_path: &str, repository: &str) -> Self {
        Self {
            import_path: import_path.to_string(),
            vcs: GitHub {
                import_path: root_import_path.to_string(),
                repository: repository.to_string(),
            },
        }
    }
}

/// Renders the index document for `record`.
pub fn render_index(record: &VanityRecord) -> String {
    let doc_url = format!("{}{}", DOC_BASE_URL, record.import_path);
    let doc_url = escape_attr(&doc_url);
    let go_import = record.vcs.go_import();
    let go_source = record.vcs.go_source();

    let mut html = String::with_capacity(512);
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    html.push_str("<meta http-equiv=\"Content-Type\" content=\"text/html; charset=utf-8\"/>\n");
    html.push_str(&format!(
        "<meta name=\"go-import\" content=\"{}\">\n",
        escape_attr(&go_import)
    ));
    html.push_str(&format!(
        "<meta name=\"go-source\" content=\"{}\">\n",
        escape_attr(&go_source)
    ));
    html.push_str(&format!(
        "<meta http-equiv=\"refresh\" content=\"0; url={}\">\n",
        doc_url
    ));
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!(
        "Nothing to see here; <a href=\"{}\">move along</a>.\n",
        doc_url
    ));
    html.push_str("</body>\n</html>\n");
    html
}

/// Renders `record` into `w`.
pub fn write_index<W: Write + ?Sized>(w: &mut W, record: &VanityRecord) -> io::Result<()> {
    w.write_all(render_index(record).as_bytes())
}
