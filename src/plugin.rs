use crate::error::DittoError;
use crate::layout::{file_name, BUILD_DIR, BUILD_VERSION_FILE, ENGINE_DIR, PLUGINS_DIR, UPROJECT_EXT};
use crate::manifest::{read_json, BuildVersion, PluginDescriptor, ProjectDescriptor};
use crate::operations::{copy_plugin, copy_plugin_no_binaries};
use crate::predicate::{is_engine_install, is_project};
use crate::registry::{find_plugin_descriptors, marketplace_dir, marketplace_plugins};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Top-level folder of an engine installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineInstallRoot {
    path: PathBuf,
}

impl EngineInstallRoot {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !is_engine_install(&path) {
            return Err(DittoError::NotAnEngineInstall(path).into());
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn engine_dir(&self) -> PathBuf {
        self.path.join(ENGINE_DIR)
    }

    pub fn marketplace_dir(&self) -> PathBuf {
        marketplace_dir(&self.path)
    }

    /// Parses `Engine/Build/Build.version`.
    pub fn build_version(&self) -> Result<BuildVersion> {
        read_json(&self.engine_dir().join(BUILD_DIR).join(BUILD_VERSION_FILE))
    }

    pub fn marketplace_plugins(&self) -> Vec<PathBuf> {
        marketplace_plugins(&self.path)
    }
}

/// A project folder holding a `<Name>.uproject` named after the folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRoot {
    path: PathBuf,
    name: String,
}

impl ProjectRoot {
    /// Unlike [`is_project`], construction also requires the descriptor to exist.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());
        let name = match name {
            Some(name) if is_project(&path) => name,
            _ => return Err(DittoError::NotAProject(path).into()),
        };
        if !path.join(file_name(&name, UPROJECT_EXT)).is_file() {
            return Err(DittoError::NotAProject(path).into());
        }
        Ok(Self { path, name })
    }

    /// Wraps a project tree this crate has just written. The shape check is
    /// skipped because it rejects relative roots such as `./Game`.
    pub(crate) fn from_built(path: PathBuf, name: &str) -> Self {
        Self {
            path,
            name: name.to_string(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn descriptor_path(&self) -> PathBuf {
        self.path.join(file_name(&self.name, UPROJECT_EXT))
    }

    pub fn plugins_dir(&self) -> PathBuf {
        self.path.join(PLUGINS_DIR)
    }

    pub fn descriptor(&self) -> Result<ProjectDescriptor> {
        read_json(&self.descriptor_path())
    }
}

/// A plugin folder and whether its `Binaries` should travel with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plugin {
    root: PathBuf,
    name: String,
    descriptor: PathBuf,
    copy_binaries: bool,
}

impl Plugin {
    /// `root` must hold exactly one `.uplugin` file directly beneath it.
    pub fn new(root: impl Into<PathBuf>, copy_binaries: bool) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(DittoError::NotAPlugin {
                path: root,
                found: 0,
            }
            .into());
        }

        let mut descriptors = find_plugin_descriptors(&root)?;
        if descriptors.len() != 1 {
            return Err(DittoError::NotAPlugin {
                path: root,
                found: descriptors.len(),
            }
            .into());
        }
        let descriptor = descriptors.remove(0);

        let name = root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .context(format!("Plugin root has no folder name: {:?}", root))?;

        Ok(Self {
            root,
            name,
            descriptor,
            copy_binaries,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Folder name of the plugin root.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn copy_binaries(&self) -> bool {
        self.copy_binaries
    }

    pub fn descriptor_path(&self) -> &Path {
        &self.descriptor
    }

    pub fn descriptor(&self) -> Result<PluginDescriptor> {
        read_json(&self.descriptor)
    }

    /// Copies the plugin to `dst`, leaving out `Binaries` unless `copy_binaries` is set.
    pub fn copy_to(&self, dst: &Path, overwrite: bool) -> Result<PathBuf> {
        if self.copy_binaries {
            copy_plugin(&self.root, dst, overwrite)
        } else {
            copy_plugin_no_binaries(&self.root, dst, overwrite)
        }
    }

    /// Copies the plugin to `<project>/Plugins/<name>`.
    pub fn copy_into_project(&self, project: &ProjectRoot, overwrite: bool) -> Result<PathBuf> {
        self.copy_to(&project.plugins_dir().join(&self.name), overwrite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn plugin_error(result: Result<Plugin>) -> Option<usize> {
        match result.unwrap_err().downcast_ref::<DittoError>() {
            Some(DittoError::NotAPlugin { found, .. }) => Some(*found),
            _ => None,
        }
    }

    #[test]
    fn test_engine_install_root_rejects_plain_folder() {
        let temp = TempDir::new().unwrap();
        let err = EngineInstallRoot::new(temp.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DittoError>(),
            Some(DittoError::NotAnEngineInstall(_))
        ));
    }

    #[test]
    fn test_project_root_requires_descriptor_on_disk() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("Game");
        fs::create_dir(&root).unwrap();

        assert!(is_project(&root));
        assert!(ProjectRoot::new(&root).is_err());

        fs::write(root.join("Game.uproject"), "{}").unwrap();
        let project = ProjectRoot::new(&root).unwrap();
        assert_eq!(project.name(), "Game");
        assert_eq!(project.plugins_dir(), root.join("Plugins"));
    }

    #[test]
    fn test_project_root_rejects_mismatched_descriptor() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("Game");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("Other.uproject"), "{}").unwrap();

        assert!(ProjectRoot::new(&root).is_err());
    }

    #[test]
    fn test_plugin_requires_exactly_one_descriptor() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("Foo");

        assert_eq!(plugin_error(Plugin::new(&root, true)), Some(0));

        fs::create_dir(&root).unwrap();
        assert_eq!(plugin_error(Plugin::new(&root, true)), Some(0));

        fs::write(root.join("Foo.uplugin"), "{}").unwrap();
        let plugin = Plugin::new(&root, false).unwrap();
        assert_eq!(plugin.name(), "Foo");
        assert_eq!(plugin.descriptor_path(), root.join("Foo.uplugin"));
        assert!(!plugin.copy_binaries());

        fs::write(root.join("Bar.uplugin"), "{}").unwrap();
        assert_eq!(plugin_error(Plugin::new(&root, false)), Some(2));
    }

    #[test]
    fn test_plugin_copy_to_honors_copy_binaries() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("Foo");
        fs::create_dir_all(root.join("Binaries/Win64")).unwrap();
        fs::write(root.join("Binaries/Win64/Foo.dll"), "").unwrap();
        fs::write(root.join("Foo.uplugin"), "{}").unwrap();

        let with = Plugin::new(&root, true)
            .unwrap()
            .copy_to(&temp.path().join("With"), false)
            .unwrap();
        let without = Plugin::new(&root, false)
            .unwrap()
            .copy_to(&temp.path().join("Without"), false)
            .unwrap();

        assert!(with.join("Binaries/Win64/Foo.dll").is_file());
        assert!(!without.join("Binaries").exists());
        assert!(without.join("Foo.uplugin").is_file());
    }
}
