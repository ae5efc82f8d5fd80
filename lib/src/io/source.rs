use std::fs;
use std::path::Path;
use std::fmt::Debug;

use crate::error::{Chainable, Result};
use crate::fstree::Entry;

/// Something that yields the text of one source document.
pub trait Source: Debug {
    fn read(self) -> Result<String>;

    fn path(&self) -> Option<&Path> {
        None
    }
}

impl Source for String {
    fn read(self) -> Result<String> {
        Ok(self)
    }
}

impl Source for &str {
    fn read(self) -> Result<String> {
        Ok(self.to_string())
    }
}

impl Source for &Path {
    fn read(self) -> Result<String> {
        fs::read_to_string(self).chain(error! {
            "failed to read source file",
            "file path" => self.display()
        })
    }

    fn path(&self) -> Option<&Path> {
        Some(self)
    }
}

impl Source for &Entry {
    fn read(self) -> Result<String> {
        self.path.as_ref().read()
    }

    fn path(&self) -> Option<&Path> {
        Some(&*self.path)
    }
}
