use std::fs;
use std::path::Path;

use folio::{err, error};
use folio::error::{Chainable, Result};
use folio::fstree::{EntryId, FsTree};

/// The id of the directory at `path`, if there is one. Anything else at
/// `path` is an error.
#[track_caller]
pub fn dircheck<P: AsRef<Path>>(tree: &FsTree, path: P) -> Result<Option<EntryId>> {
    let path = path.as_ref();
    match tree.get(None, path) {
        Some(e) if e.file_type.is_dir() => Ok(Some(e.id)),
        Some(e) => err! {
            format!("`{}` must be a directory", path.display()),
            "path is not a directory" => e.path.display(),
        },
        None => Ok(None),
    }
}

/// Removes everything inside `dir`, keeping `dir` itself.
pub fn clear_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        return Ok(());
    }

    let entries = fs::read_dir(dir).chain_with(|| error! {
        "failed to read output directory",
        "directory" => dir.display(),
    })?;

    for entry in entries {
        let path = entry?.path();
        let result = match path.is_dir() {
            true => fs::remove_dir_all(&path),
            false => fs::remove_file(&path),
        };

        result.chain_with(|| error! {
            "failed to clear output directory",
            "path" => path.display(),
        })?;
    }

    Ok(())
}

/// Copies the contents of `from` into `to`, recursively, replacing existing
/// files. Returns the number of files copied.
pub fn copy_dir(from: &Path, to: &Path) -> Result<usize> {
    fs::create_dir_all(to).chain_with(|| error! {
        "failed to create directory",
        "directory" => to.display(),
    })?;

    let mut copied = 0;
    for entry in fs::read_dir(from)? {
        let entry = entry?;
        let (source, target) = (entry.path(), to.join(entry.file_name()));
        if entry.file_type()?.is_dir() {
            copied += copy_dir(&source, &target)?;
            continue;
        }

        fs::copy(&source, &target).chain_with(|| error! {
            "failed to copy file",
            "source path" => source.display(),
            "destination path" => target.display(),
        })?;

        log::debug!("| copy | {}", target.display());
        copied += 1;
    }

    Ok(copied)
}
