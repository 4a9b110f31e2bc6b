//! Site builder: manifest + templates + Markdown sources → HTML pages.
//!
//! Building happens in two phases so that nothing is written unless every
//! input loads and renders:
//!
//! 1. [`Site::load`] parses both templates, reads the manifest, and renders
//!    each runbook's intro and source file.
//! 2. [`Site::write`] executes the index template into `index.html` and the
//!    topic template into one page per runbook.

use std::fs;
use std::path::{Component, Path, PathBuf};

use log::{debug, info};

use crate::error::{Error, Result};
use crate::manifest::Manifest;
use crate::markdown::{Markdown, RenderConfig};
use crate::template::Template;
use crate::util::decode_text;

/// Name of the generated index page.
pub const INDEX_PAGE: &str = "index.html";

/// Inputs for a site build.
#[derive(Debug, Clone)]
pub struct SiteOptions {
    /// Template for the index page, executed against the manifest.
    pub index_template: PathBuf,
    /// Template for each runbook page, executed against the runbook.
    pub topic_template: PathBuf,
    /// Manifest listing the runbooks.
    pub manifest: PathBuf,
    /// Markdown rendering settings.
    pub render: RenderConfig,
}

impl SiteOptions {
    /// Create options with the default render configuration.
    pub fn new(
        index_template: impl Into<PathBuf>,
        topic_template: impl Into<PathBuf>,
        manifest: impl Into<PathBuf>,
    ) -> Self {
        Self {
            index_template: index_template.into(),
            topic_template: topic_template.into(),
            manifest: manifest.into(),
            render: RenderConfig::default(),
        }
    }

    /// Set the render configuration.
    pub fn with_render(mut self, render: RenderConfig) -> Self {
        self.render = render;
        self
    }
}

/// A loaded and rendered site, ready to be written.
#[derive(Debug, Clone)]
pub struct Site {
    index: Template,
    topic: Template,
    manifest: Manifest,
}

impl Site {
    /// Load templates and manifest, and render every runbook.
    ///
    /// Runbook `source` paths are used as given (relative paths resolve
    /// against the current directory).
    pub fn load(options: &SiteOptions) -> Result<Self> {
        let index = Template::load(&options.index_template)?;
        let topic = Template::load(&options.topic_template)?;
        let mut manifest = Manifest::load(&options.manifest)?;

        let md = Markdown::with_config(options.render);
        for book in &mut manifest.runbooks {
            book.resolve_url();
            page_path(&book.url)?;
            book.intro = md.render(&book.intro);

            let bytes = fs::read(&book.source).map_err(|e| Error::io(&book.source, e))?;
            book.contents = md.render(&decode_text(&bytes));
            debug!("rendered {} ({} bytes of HTML)", book.source, book.contents.len());
        }

        Ok(Self {
            index,
            topic,
            manifest,
        })
    }

    /// The manifest with URLs resolved and HTML rendered.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Write the index page and every runbook page under `root`.
    ///
    /// Pages are written to `root/<url>`, creating parent directories as
    /// needed. Returns the written paths, index first.
    pub fn write(&self, root: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        let root = root.as_ref();
        let mut written = Vec::with_capacity(self.manifest.runbooks.len() + 1);

        let html = self.index.render(&self.manifest.to_context()?)?;
        written.push(write_page(root, INDEX_PAGE, &html)?);

        for book in &self.manifest.runbooks {
            let html = self.topic.render(&serde_json::to_value(book)?)?;
            written.push(write_page(root, &book.url, &html)?);
        }

        Ok(written)
    }
}

/// Output path for `url`, relative to the output directory. A leading `/`
/// is ignored; `..` components are rejected so every page stays inside.
fn page_path(url: &str) -> Result<&Path> {
    let relative = Path::new(url.trim_start_matches('/'));
    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
    {
        return Err(Error::PageUrl {
            url: url.to_string(),
        });
    }
    Ok(relative)
}

/// Write `html` to `root/url`.
fn write_page(root: &Path, url: &str, html: &str) -> Result<PathBuf> {
    let path = root.join(page_path(url)?);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    fs::write(&path, html).map_err(|e| Error::io(&path, e))?;
    info!("wrote {}", path.display());
    Ok(path)
}

/// Load and write a site in one step.
pub fn build(options: &SiteOptions, root: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    Site::load(options)?.write(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct Fixture {
        dir: TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                dir: TempDir::new().unwrap(),
            }
        }

        fn file(&self, name: &str, contents: &[u8]) -> PathBuf {
            let path = self.dir.path().join(name);
            fs::write(&path, contents).unwrap();
            path
        }

        fn options(&self, manifest: &str) -> SiteOptions {
            SiteOptions::new(
                self.file("index.tpl", b"{{range .Runbooks}}<a href=\"{{.URL}}\">{{.Title}}</a>{{.Intro}}{{end}}"),
                self.file("topic.tpl", b"<h1>{{.Title}}</h1>{{.Contents}}"),
                self.file("toc.yml", manifest.as_bytes()),
            )
        }
    }

    #[test]
    fn test_load_renders_intro_and_contents() {
        let fx = Fixture::new();
        let source = fx.file("db.md", b"Fail over -- carefully...");
        let manifest = format!(
            "runbooks:\n  - title: DB\n    intro: \"*Read* this (c)\"\n    source: {}\n",
            source.display()
        );

        let site = Site::load(&fx.options(&manifest)).unwrap();
        let book = &site.manifest().runbooks[0];
        assert_eq!(book.intro, "<p><em>Read</em> this ©</p>\n");
        assert_eq!(book.contents, "<p>Fail over – carefully…</p>\n");
        assert_eq!(book.url, format!("{}.html", source.display().to_string().trim_end_matches(".md")));
    }

    #[test]
    fn test_typographer_can_be_disabled() {
        let fx = Fixture::new();
        let source = fx.file("a.md", b"a -- b");
        let manifest = format!("runbooks:\n  - source: {}\n", source.display());
        let options = fx
            .options(&manifest)
            .with_render(RenderConfig::new().with_typographer(false));

        let site = Site::load(&options).unwrap();
        assert_eq!(site.manifest().runbooks[0].contents, "<p>a -- b</p>\n");
    }

    #[test]
    fn test_write_creates_pages() {
        let fx = Fixture::new();
        let source = fx.file("a.md", b"# Hello");
        let manifest = format!(
            "runbooks:\n  - title: A\n    url: nested/a.html\n    source: {}\n",
            source.display()
        );
        let out = fx.dir.path().join("out");

        let written = build(&fx.options(&manifest), &out).unwrap();
        assert_eq!(written, vec![out.join("index.html"), out.join("nested/a.html")]);
        assert_eq!(
            fs::read_to_string(out.join("index.html")).unwrap(),
            "<a href=\"nested/a.html\">A</a>"
        );
        assert_eq!(
            fs::read_to_string(out.join("nested/a.html")).unwrap(),
            "<h1>A</h1><h1>Hello</h1>\n"
        );
    }

    #[test]
    fn test_missing_source_reports_path() {
        let fx = Fixture::new();
        let manifest = "runbooks:\n  - source: /definitely/not/here.md\n";
        let err = Site::load(&fx.options(manifest)).unwrap_err();
        match err {
            Error::Io { path, .. } => assert_eq!(path, PathBuf::from("/definitely/not/here.md")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_page_path() {
        assert_eq!(page_path("a.html").unwrap(), Path::new("a.html"));
        assert_eq!(page_path("/x/a.html").unwrap(), Path::new("x/a.html"));
        assert_eq!(page_path("./a.html").unwrap(), Path::new("./a.html"));
        assert!(page_path("../a.html").is_err());
        assert!(page_path("x/../../a.html").is_err());
    }

    #[test]
    fn test_parent_dir_url_rejected_before_writing() {
        let fx = Fixture::new();
        let source = fx.file("a.md", b"hello");
        let manifest = format!(
            "runbooks:\n  - url: ../../escape.html\n    source: {}\n",
            source.display()
        );
        let out = fx.dir.path().join("out");

        let err = build(&fx.options(&manifest), &out).unwrap_err();
        match err {
            Error::PageUrl { url } => assert_eq!(url, "../../escape.html"),
            other => panic!("unexpected error: {other}"),
        }
        assert!(!out.exists());
    }

    #[test]
    fn test_windows_1252_source() {
        let fx = Fixture::new();
        let source = fx.file("w.md", b"caf\xE9 -- ok");
        let manifest = format!("runbooks:\n  - source: {}\n", source.display());
        let site = Site::load(&fx.options(&manifest)).unwrap();
        assert_eq!(site.manifest().runbooks[0].contents, "<p>café – ok</p>\n");
    }
}
