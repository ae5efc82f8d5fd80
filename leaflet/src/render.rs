use folio::{err, Site};
use folio::error::Result;
use folio::io::Sink;
use folio::markdown::Markdown;

use crate::PUBLIC_DIR;
use crate::discover::Leaflet;
use crate::util::{clear_dir, copy_dir};

impl Leaflet {
    /// Compiles `site` into the output directory, then copies `public/` over
    /// it. Returns the number of documents written.
    pub fn render(&self, mut site: Site) -> Result<usize> {
        let (source, output) = (self.source.canonicalize()?, &self.output);
        if output.exists() && source.starts_with(output.canonicalize()?) {
            return err! {
                "refusing to clear an output directory that contains the sources",
                "output directory" => output.display(),
                "source directory" => source.display(),
            };
        }

        clear_dir(output)?;
        let documents = site.compile(&self.config.variables, &Markdown::default())?;
        let written = output.write_all(&documents)?;

        let public = self.source.join(PUBLIC_DIR);
        if public.is_dir() {
            let copied = copy_dir(&public, &output.join(PUBLIC_DIR))?;
            log::debug!("| render | copied {copied} public files");
        }

        Ok(written)
    }
}
