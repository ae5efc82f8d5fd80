use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use folio::{Document, Layout, Page, Site};
use folio::error::Result;
use folio::fstree::FsTree;
use folio::io::Source;
use folio::markdown::{self, STYLESHEET_PATH};
use folio::util::file_stem;

use crate::{INDEX_FILE, LAYOUT_DIR, PAGES_DIR, POSTS_DIR, PUBLIC_DIR};
use crate::config::Config;
use crate::util::dircheck;

#[derive(Debug)]
pub struct Leaflet {
    pub config: Config,
    pub tree: FsTree,
    pub source: PathBuf,
    pub output: PathBuf,
}

impl Leaflet {
    /// Loads the configuration in `site` and scans its source directory.
    pub fn new<P: AsRef<Path>>(site: P) -> Result<Self> {
        let site = site.as_ref();
        let config = Config::discover(site)?;
        let source = site.join(&config.settings.src);
        let output = site.join(&config.settings.dest);
        log::info!("| config | {}", config.path.display());

        let tree = FsTree::build_with(&source, Some(2))?;
        for dir in [LAYOUT_DIR, POSTS_DIR, PAGES_DIR, PUBLIC_DIR] {
            if dircheck(&tree, dir)?.is_none() {
                log::debug!("| discover | no `{dir}` directory in {}", source.display());
            }
        }

        Ok(Leaflet { config, tree, source, output })
    }

    /// Builds the site model from the source tree. Pages are added in the
    /// order posts, pages, plain pages, index: on an output path collision,
    /// the earliest wins.
    pub fn discover(&self, today: NaiveDate) -> Result<Site> {
        let settings = &self.config.settings;
        let stylesheet = match &settings.highlight_theme {
            Some(theme) => Some(Document::new(STYLESHEET_PATH, markdown::stylesheet(theme)?)),
            None => None,
        };

        let layouts = self.read_all(LAYOUT_DIR, "html")?
            .into_iter()
            .map(|(path, html)| Layout::new(&path, html));

        let mut site = Site::new().using(layouts);
        for (path, markdown) in self.read_all(POSTS_DIR, "md")? {
            for problem in format_problems(&markdown) {
                log::warn!("| discover | {path} | {problem}");
            }

            let mut post = Page::post(&path, markdown, today).with_dialect(settings.dialect);
            if let Some(stylesheet) = &stylesheet {
                post.attach(stylesheet.clone());
            }

            site.push(post);
        }

        for (path, markdown) in self.read_all(PAGES_DIR, "md")? {
            if Path::new(&path).file_name().map_or(false, |name| name == INDEX_FILE) {
                continue;
            }

            site.push(Page::page(&path, markdown).with_dialect(settings.dialect));
        }

        for (path, html) in self.read_all(PAGES_DIR, "html")? {
            let output = format!("/{}/index.html", file_stem(&path));
            site.push(Page::plain(&output, html, None));
        }

        if let Some(index) = self.tree.get(None, Path::new(PAGES_DIR).join(INDEX_FILE)) {
            site.push(Page::index(index.read()?).with_dialect(settings.dialect));
        }

        log::info!("| discover | {} layouts | {} pages | {} posts",
            site.layouts().len(), site.pages().len(), site.posts().count());

        Ok(site)
    }

    /// `(relative path, contents)` of every `ext` file directly in `dir`.
    fn read_all(&self, dir: &str, ext: &str) -> Result<Vec<(String, String)>> {
        self.tree.files_in(dir, ext)
            .into_iter()
            .map(|entry| {
                let path = entry.relative_path().to_string_lossy().into_owned();
                Ok((path, entry.read()?))
            })
            .collect()
    }
}

/// Departures from the `# Title`, blank line, date line layout of a post.
fn format_problems(markdown: &str) -> Vec<&'static str> {
    let mut lines = markdown.lines();
    let mut problems = vec![];
    if !lines.next().map_or(false, |line| line.starts_with("# ")) {
        problems.push("1st line must be `# <Title>`");
    }

    if !lines.next().map_or(true, |line| line.trim().is_empty()) {
        problems.push("2nd line must be empty");
    }

    if lines.next().map_or(true, |line| line.trim().is_empty()) {
        problems.push("3rd line needs a date");
    }

    problems
}
