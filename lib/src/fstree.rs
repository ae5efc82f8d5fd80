use std::sync::Arc;
use std::path::Path;
use std::{fs, fmt};

use rustc_hash::FxHashMap;

use crate::error::Result;

#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct EntryId(pub(crate) usize);

/// A snapshot of a source directory.
#[derive(Debug)]
pub struct FsTree {
    entries: Vec<Entry>,
    map: FxHashMap<Arc<Path>, EntryId>,
}

#[derive(Debug)]
pub struct Entry {
    pub id: EntryId,
    pub path: Arc<Path>,
    pub file_name: String,
    pub file_type: fs::FileType,
    pub parent: Option<EntryId>,
    pub children: Vec<EntryId>,
    pub depth: usize,
}

impl FsTree {
    fn new() -> Self {
        Self {
            map: FxHashMap::default(),
            entries: vec![],
        }
    }

    /// Walks everything under `root`, skipping hidden files.
    pub fn build<P: AsRef<Path>>(root: P) -> Result<Self> {
        Self::build_with(root, None)
    }

    /// Walks `root` no deeper than `max_depth` levels, if given.
    pub fn build_with<P: AsRef<Path>>(root: P, max_depth: Option<usize>) -> Result<Self> {
        let root = root.as_ref();
        let mut walker = jwalk::WalkDir::new(root)
            .follow_links(true)
            .skip_hidden(true)
            .sort(true);

        if let Some(depth) = max_depth {
            walker = walker.max_depth(depth);
        }

        let mut tree = FsTree::new();
        for entry in walker {
            match entry {
                Ok(entry) => { tree.insert(entry); },
                Err(e) => log::warn!("| discover | skipping unreadable entry: {e}"),
            }
        }

        if tree.len() == 0 {
            return err! {
                "file system tree discovery yielded zero files",
                "search root" => root.display(),
            }
        }

        Ok(tree)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn root(&self) -> &Entry {
        &self[self.root_id()]
    }

    pub fn root_id(&self) -> EntryId {
        EntryId(0)
    }

    /// The entry at `path`, relative to `root` or to the tree root.
    #[inline]
    pub fn get<R, P>(&self, root: R, path: P) -> Option<&Entry>
        where R: Into<Option<EntryId>>, P: AsRef<Path>
    {
        let root = root.into().unwrap_or(self.root_id());
        let full_path = self[root].path.join(path.as_ref());
        self.map.get(&*full_path).map(|&id| &self[id])
    }

    /// Files directly inside the directory `dir` (relative to the tree root)
    /// whose extension is `ext`, in file name order. Empty if `dir` doesn't
    /// exist or isn't a directory.
    pub fn files_in<P: AsRef<Path>>(&self, dir: P, ext: &str) -> Vec<&Entry> {
        let Some(dir) = self.get(None, dir).filter(|e| e.file_type.is_dir()) else {
            return vec![];
        };

        let mut files: Vec<&Entry> = dir.children.iter()
            .map(|&id| &self[id])
            .filter(|e| e.file_type.is_file() && e.file_ext() == Some(ext))
            .collect();

        files.sort_by(|a, b| a.file_name.cmp(&b.file_name));
        files
    }

    fn insert(&mut self, entry: jwalk::DirEntry<((), ())>) -> EntryId {
        let entry = Entry {
            id: EntryId(self.entries.len()),
            path: Arc::from(entry.path().into_boxed_path()),
            file_type: entry.file_type,
            file_name: entry.file_name.to_string_lossy().into_owned(),
            parent: self.map.get(&*entry.parent_path).cloned(),
            children: vec![],
            depth: entry.depth,
        };

        self.map.insert(entry.path.clone(), entry.id);
        if let Some(parent) = entry.parent {
            self.entries[parent.0].children.push(entry.id);
        }

        let id = entry.id;
        self.entries.push(entry);
        id
    }
}

impl Entry {
    /// File name without the extension.
    pub fn file_stem(&self) -> &str {
        crate::util::file_stem(&self.file_name)
    }

    /// The extension after the last `.`, if any.
    pub fn file_ext(&self) -> Option<&str> {
        match self.file_name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => Some(ext),
            _ => None,
        }
    }

    /// Path relative to the root of the tree containing `self`.
    pub fn relative_path(&self) -> &Path {
        let mut components = self.path.components();
        for _ in 0..(self.path.components().count() - self.depth) {
            components.next();
        }

        components.as_path()
    }
}

impl std::ops::Index<EntryId> for FsTree {
    type Output = Entry;

    fn index(&self, index: EntryId) -> &Self::Output {
        &self.entries[index.0]
    }
}

impl fmt::Debug for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        for (path, text) in [
            ("posts/b.md", "# B"),
            ("posts/a.md", "# A"),
            ("posts/notes.txt", "skip"),
            ("posts/.draft.md", "hidden"),
            ("pages/index.md", "home"),
            ("_layouts/header.html", "<h>"),
        ] {
            let path = root.join(path);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, text).unwrap();
        }

        dir
    }

    #[test]
    fn files_in_filters_by_extension_and_sorts() {
        let dir = site();
        let tree = FsTree::build(dir.path()).unwrap();

        let posts: Vec<_> = tree.files_in("posts", "md").iter().map(|e| e.file_stem()).collect();
        assert_eq!(posts, ["a", "b"]);
        assert!(tree.files_in("missing", "md").is_empty());
        assert!(tree.files_in("posts/a.md", "md").is_empty());
    }

    #[test]
    fn relative_paths() {
        let dir = site();
        let tree = FsTree::build(dir.path()).unwrap();
        let header = tree.get(None, "_layouts/header.html").unwrap();
        assert_eq!(header.relative_path(), Path::new("_layouts/header.html"));
        assert_eq!(header.file_ext(), Some("html"));
        assert_eq!(tree.root().depth, 0);
    }

    #[test]
    fn max_depth_limits_the_walk() {
        let dir = site();
        let tree = FsTree::build_with(dir.path(), Some(1)).unwrap();
        assert!(tree.get(None, "posts").is_some());
        assert!(tree.get(None, "posts/a.md").is_none());
    }
}
