use std::path::Path;
use std::time::Instant;

use folio::error::Result;
use folio::markdown::SyntaxHighlight;

use crate::discover::Leaflet;

mod config;
mod discover;
mod render;
mod serve;
mod init;
mod util;

pub const CONFIG_FILES: &[&str] = &["_config.yml", "_config.yaml", "_config.toml"];
pub const LAYOUT_DIR: &str = "_layouts";
pub const POSTS_DIR: &str = "posts";
pub const PAGES_DIR: &str = "pages";
pub const PUBLIC_DIR: &str = "public";
pub const INDEX_FILE: &str = "index.md";

pub const DEFAULT_PORT: u16 = 8080;

mod flags {
    use std::path::PathBuf;

    xflags::xflags! {
        /// Compiles a directory of Markdown posts and pages into a static site.
        cmd leaflet {
            /// Builds the site into its output directory.
            cmd build {
                /// The site directory, containing `_config.yml`.
                optional -s, --site site: PathBuf
            }

            /// Creates a sample site in DIR.
            cmd init {
                required dir: PathBuf
            }

            /// Builds the site, then serves the output on localhost.
            cmd serve {
                /// The port to listen on (default 8080).
                optional -p, --port port: u16
                /// The site directory, containing `_config.yml`.
                optional -s, --site site: PathBuf
            }
        }
    }
}

fn build(site: Option<&Path>) -> Result<Leaflet> {
    let start = Instant::now();
    SyntaxHighlight::warm_up();

    let leaflet = Leaflet::new(site.unwrap_or(Path::new(".")))?;
    let today = chrono::Local::now().date_naive();
    let site = folio::time!("discover", leaflet.discover(today)?);
    let written = folio::time!("render", leaflet.render(site)?);

    log::info!("| build | ok | {written} documents in {} | {}ms",
        leaflet.output.display(), start.elapsed().as_millis());

    Ok(leaflet)
}

fn main() {
    use flags::LeafletCmd;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let result = match flags::Leaflet::from_env_or_exit().subcommand {
        LeafletCmd::Build(cmd) => build(cmd.site.as_deref()).map(|_| ()),
        LeafletCmd::Init(cmd) => init::init(&cmd.dir),
        LeafletCmd::Serve(cmd) => build(cmd.site.as_deref()).and_then(|leaflet| {
            serve::serve(&leaflet.output, cmd.port.unwrap_or(DEFAULT_PORT))
        }),
    };

    if let Err(e) = result {
        log::error!("\n{e}");
        std::process::exit(1);
    }
}
