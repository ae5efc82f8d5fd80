use std::fs;
use std::path::{Path, PathBuf};
use std::fmt::Debug;
use std::sync::Mutex;

use crate::error::{Chainable, Result};
use crate::taxonomy::Document;

/// A destination for compiled documents.
pub trait Sink: Debug {
    /// Writes `data` at the virtual `path` (always `/`-rooted).
    fn write(&self, path: &str, data: &str) -> Result<()>;

    fn write_document(&self, document: &Document) -> Result<()> {
        self.write(&document.path, document.data())
    }

    fn write_all<'a, I>(&self, documents: I) -> Result<usize>
        where I: IntoIterator<Item = &'a Document>, Self: Sized
    {
        documents.into_iter().try_fold(0, |n, doc| self.write_document(doc).map(|_| n + 1))
    }
}

/// A directory on disk: `/a/b.html` is written to `<dir>/a/b.html`. Parent
/// directories are created and existing files are overwritten.
impl Sink for Path {
    fn write(&self, path: &str, data: &str) -> Result<()> {
        let relative = path.trim_start_matches('/');
        if relative.split('/').any(|c| c == "..") {
            return err! {
                "document path escapes the output directory",
                "document path" => path,
            };
        }

        let target = self.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).chain_with(|| error! {
                "failed to create output directory",
                "directory" => parent.display(),
            })?;
        }

        fs::write(&target, data).chain_with(|| error! {
            "failed to open/create file for writing",
            "file path" => target.display(),
        })?;

        log::debug!("| write | {}", target.display());
        Ok(())
    }
}

impl Sink for PathBuf {
    fn write(&self, path: &str, data: &str) -> Result<()> {
        self.as_path().write(path, data)
    }
}

impl<T: Sink + ?Sized> Sink for &T {
    fn write(&self, path: &str, data: &str) -> Result<()> {
        T::write(self, path, data)
    }
}

/// Collects `(path, data)` pairs in memory.
#[derive(Debug, Default)]
pub struct Memory {
    written: Mutex<Vec<(String, String)>>,
}

impl Memory {
    pub fn new() -> Self {
        Memory::default()
    }

    pub fn into_inner(self) -> Vec<(String, String)> {
        self.written.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

impl Sink for Memory {
    fn write(&self, path: &str, data: &str) -> Result<()> {
        let mut written = self.written.lock().unwrap_or_else(|e| e.into_inner());
        written.push((path.to_string(), data.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directories_are_created_and_files_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        root.write("/posts/a/index.html", "one").unwrap();
        root.write("/posts/a/index.html", "two").unwrap();
        let written = fs::read_to_string(root.join("posts/a/index.html")).unwrap();
        assert_eq!(written, "two");
    }

    #[test]
    fn escaping_paths_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(dir.path().write("/../outside.html", "x").is_err());
        assert!(!dir.path().parent().unwrap().join("outside.html").exists());
    }

    #[test]
    fn memory_keeps_write_order() {
        let docs = [
            Document::new("/b.html", "b".to_string()),
            Document::empty("/a.html"),
        ];

        let memory = Memory::new();
        assert_eq!(memory.write_all(&docs).unwrap(), 2);
        assert_eq!(memory.into_inner(), [
            ("/b.html".to_string(), "b".to_string()),
            ("/a.html".to_string(), String::new()),
        ]);
    }
}
