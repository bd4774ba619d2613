//! Copying plugin trees into place.
//!
//! Copies merge into the destination: files present in the source replace
//! their counterparts, and anything else already at the destination is left
//! alone. A non-empty destination is only written to when `overwrite` is set.

use crate::error::DittoError;
use crate::layout::BINARIES_DIR;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

/// Copy the whole plugin tree at `src` to `dst`. Returns `dst`.
pub fn copy_plugin(src: &Path, dst: &Path, overwrite: bool) -> Result<PathBuf> {
    copy_tree(src, dst, overwrite, None)
}

/// Like [`copy_plugin`], but any directory named `Binaries` is skipped along
/// with everything beneath it.
pub fn copy_plugin_no_binaries(src: &Path, dst: &Path, overwrite: bool) -> Result<PathBuf> {
    copy_tree(src, dst, overwrite, Some(BINARIES_DIR))
}

fn copy_tree(src: &Path, dst: &Path, overwrite: bool, skip_dir: Option<&str>) -> Result<PathBuf> {
    if !src.is_dir() {
        anyhow::bail!("Plugin source is not a directory: {:?}", src);
    }
    if !overwrite && has_entries(dst)? {
        return Err(DittoError::DestinationConflict {
            path: dst.to_path_buf(),
        }
        .into());
    }

    fs::create_dir_all(dst).context(format!("Failed to create directory: {:?}", dst))?;

    let walker = WalkDir::new(src)
        .min_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_entry(|entry| !is_skipped_dir(entry, skip_dir));

    let mut copied = 0usize;
    for entry in walker {
        let entry = entry.context(format!("Failed to walk plugin tree: {:?}", src))?;
        let relative = entry.path().strip_prefix(src)?;
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .context(format!("Failed to create directory: {:?}", target))?;
        } else {
            debug!(from = ?entry.path(), to = ?target, "Copying file");
            fs::copy(entry.path(), &target)
                .context(format!("Failed to copy {:?} to {:?}", entry.path(), target))?;
            copied += 1;
        }
    }

    info!(
        from = ?src,
        to = ?dst,
        files = copied,
        skipped = skip_dir.unwrap_or(""),
        "Copied plugin"
    );
    Ok(dst.to_path_buf())
}

fn is_skipped_dir(entry: &DirEntry, skip_dir: Option<&str>) -> bool {
    match skip_dir {
        Some(name) => {
            entry.depth() > 0 && entry.file_type().is_dir() && entry.file_name() == name
        }
        None => false,
    }
}

/// A destination conflicts if it is a non-empty directory or something other
/// than a directory.
fn has_entries(dst: &Path) -> Result<bool> {
    if !dst.exists() {
        return Ok(false);
    }
    if !dst.is_dir() {
        return Ok(true);
    }
    let mut entries =
        fs::read_dir(dst).context(format!("Failed to read directory: {:?}", dst))?;
    Ok(entries.next().is_some())
}
