//! Discovery of marketplace plugins inside an engine installation.
//!
//! Marketplace plugins live one folder deep under
//! `<install>/Engine/Plugins/Marketplace`, each folder holding its `.uplugin`
//! descriptor directly beneath it.

use crate::layout::{ENGINE_DIR, MARKETPLACE_DIR, PLUGINS_DIR, UPLUGIN_EXT};
use crate::predicate::{is_engine_install, is_plugin_descriptor};
use anyhow::{Context, Result};
use glob::Pattern;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// `<install>/Engine/Plugins/Marketplace`
pub fn marketplace_dir(install_root: &Path) -> PathBuf {
    install_root
        .join(ENGINE_DIR)
        .join(PLUGINS_DIR)
        .join(MARKETPLACE_DIR)
}

/// Returns the root folder of every marketplace plugin under `install_root`.
///
/// Returns an empty list if `install_root` is not an engine installation.
/// Order follows the glob walk and should not be relied upon.
pub fn marketplace_plugins(install_root: &Path) -> Vec<PathBuf> {
    if !is_engine_install(install_root) {
        debug!(path = ?install_root, "Not an engine install, skipping plugin discovery");
        return Vec::new();
    }

    let marketplace = marketplace_dir(install_root);
    let pattern = format!(
        "{}/*/*.{}",
        Pattern::escape(&marketplace.to_string_lossy()),
        UPLUGIN_EXT
    );

    let entries = match glob::glob(&pattern) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(pattern = %pattern, error = %e, "Invalid marketplace plugin pattern");
            return Vec::new();
        }
    };

    let mut plugins = Vec::new();
    for entry in entries {
        match entry {
            Ok(descriptor) => {
                if let Some(plugin_root) = descriptor.parent() {
                    plugins.push(plugin_root.to_path_buf());
                }
            }
            Err(e) => {
                warn!(error = %e, "Skipping unreadable marketplace entry");
            }
        }
    }

    debug!(path = ?marketplace, count = plugins.len(), "Discovered marketplace plugins");
    plugins
}

/// Lists the `.uplugin` files directly inside `dir`, sorted by path.
pub fn find_plugin_descriptors(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).context(format!("Failed to read directory: {:?}", dir))?;

    let mut descriptors = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && is_plugin_descriptor(&path) {
            descriptors.push(path);
        }
    }
    descriptors.sort();

    Ok(descriptors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn fake_install(root: &Path) {
        fs::create_dir_all(root.join("Engine/Binaries/Win64")).unwrap();
        fs::create_dir_all(root.join("Engine/Build")).unwrap();
        fs::write(root.join("Engine/Build/Build.version"), "{}").unwrap();
    }

    #[test]
    fn test_marketplace_plugins_requires_install() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("NotAnInstall");
        let plugin = root.join("Engine/Plugins/Marketplace/Foo");
        fs::create_dir_all(&plugin).unwrap();
        fs::write(plugin.join("Foo.uplugin"), "{}").unwrap();

        assert!(marketplace_plugins(&root).is_empty());
    }

    #[test]
    fn test_marketplace_plugins_returns_plugin_roots() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("UE [5.3]");
        fake_install(&root);

        let marketplace = marketplace_dir(&root);
        for name in ["Alpha", "Beta"] {
            let dir = marketplace.join(name);
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join(format!("{}.uplugin", name)), "{}").unwrap();
        }
        // Too deep and no descriptor: both ignored.
        fs::create_dir_all(marketplace.join("Gamma/Nested")).unwrap();
        fs::write(marketplace.join("Gamma/Nested/Nested.uplugin"), "{}").unwrap();
        fs::create_dir_all(marketplace.join("Empty")).unwrap();

        let mut found = marketplace_plugins(&root);
        found.sort();
        assert_eq!(found, vec![marketplace.join("Alpha"), marketplace.join("Beta")]);
    }

    #[test]
    fn test_find_plugin_descriptors() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("B.uplugin"), "{}").unwrap();
        fs::write(temp.path().join("A.uplugin"), "{}").unwrap();
        fs::write(temp.path().join("README.md"), "").unwrap();
        fs::create_dir(temp.path().join("Dir.uplugin")).unwrap();

        let found = find_plugin_descriptors(temp.path()).unwrap();
        assert_eq!(
            found,
            vec![temp.path().join("A.uplugin"), temp.path().join("B.uplugin")]
        );
    }

    #[test]
    fn test_find_plugin_descriptors_missing_dir() {
        let temp = TempDir::new().unwrap();
        assert!(find_plugin_descriptors(&temp.path().join("missing")).is_err());
    }
}
