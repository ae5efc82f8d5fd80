use std::path::Path;

use folio::error::Result;
use folio::io::Sink;
use folio::markdown::{stylesheet, DEFAULT_THEME, STYLESHEET_PATH};

macro_rules! sample {
    ($($path:literal),* $(,)?) => (
        &[$(($path, include_str!(concat!("../sample/", $path)))),*]
    )
}

const SAMPLE: &[(&str, &str)] = sample![
    "_config.yml",
    "_layouts/header.html",
    "_layouts/footer.html",
    "posts/first-post.md",
    "posts/second-post.md",
    "pages/index.md",
    "pages/about.md",
    "public/style.css",
    "public/felix.svg",
];

/// Writes the sample site into `dir`. Files that already exist are left
/// alone.
pub fn init(dir: &Path) -> Result<()> {
    let highlight = stylesheet(DEFAULT_THEME)?;
    let mut files: Vec<(&str, &str)> = SAMPLE.to_vec();
    files.push((STYLESHEET_PATH.trim_start_matches('/'), &highlight));

    for (path, data) in files {
        if dir.join(path).exists() {
            log::warn!("| init | {} | skipped, exists", dir.join(path).display());
            continue;
        }

        dir.write(&format!("/{path}"), data)?;
    }

    log::info!("| init | ok | {}", dir.display());
    Ok(())
}
