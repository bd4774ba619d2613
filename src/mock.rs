//! Mock engine installations, plugins and projects for tests.
//!
//! Install and project builders are destructive: whatever already sits at the
//! target is removed first, so every run produces the same fresh tree.

use crate::layout::{
    file_name, BINARIES_DIR, BUILD_DIR, BUILD_RULES_EXT, BUILD_VERSION_FILE, CONFIG_DIR,
    CONFIG_EXT, CONTENT_DIR, CPP_HEADER_EXT, CPP_SOURCE_EXT, EDITOR_MODULES_FILE, ENGINE_DIR,
    PLUGINS_DIR, PRIVATE_DIR, PUBLIC_DIR, SOURCE_DIR, UPLUGIN_EXT, UPROJECT_EXT,
    WIN64_PLATFORM_DIR,
};
use crate::manifest::{
    write_empty_file, write_json, write_module_stub_source, BuildVersion, Indent, ModulesManifest,
    PluginDescriptor, ProjectDescriptor, MOCK_BUILD_ID,
};
use crate::plugin::{EngineInstallRoot, ProjectRoot};
use crate::registry::marketplace_dir;
use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const MOCK_INSTALL_NAME: &str = "FakeUnrealInstall";
pub const MOCK_PROJECT_NAME: &str = "FakeUnrealProject";

/// Base names of the plugins placed in every mock install's marketplace folder.
pub const MOCK_MARKETPLACE_PLUGINS: [&str; 3] =
    ["FakeMarketplaceZero", "FakeMarketplaceOne", "FakeMarketplaceTwo"];

const MOCK_ENGINE_MODULES: [&str; 2] = ["ExampleEnginePlugin", "ExampleEnginePluginEditor"];

/// Builds `<parent>/<base>Plugin` with a runtime module `<base>Plugin` and an
/// editor module `<base>PluginEditor`. Returns the plugin root.
pub fn build_mock_plugin(parent: &Path, plugin_base_name: &str) -> Result<PathBuf> {
    let module_name = format!("{}Plugin", plugin_base_name);
    let editor_module_name = format!("{}Editor", module_name);

    let plugin_root = parent.join(&module_name);
    let binaries_dir = plugin_root.join(BINARIES_DIR).join(WIN64_PLATFORM_DIR);
    let source_dir = plugin_root.join(SOURCE_DIR);

    make_dir(&binaries_dir, true)?;
    write_json(
        &binaries_dir.join(EDITOR_MODULES_FILE),
        &ModulesManifest::new(MOCK_BUILD_ID, &[module_name.as_str(), editor_module_name.as_str()]),
        Indent::Spaces(4),
        None,
    )?;
    build_mock_module(&source_dir, &module_name)?;
    build_mock_module(&source_dir, &editor_module_name)?;
    write_json(
        &plugin_root.join(file_name(&module_name, UPLUGIN_EXT)),
        &PluginDescriptor::mock(&module_name, &editor_module_name),
        Indent::Tab,
        None,
    )?;

    debug!(path = ?plugin_root, "Built mock plugin");
    Ok(plugin_root)
}

/// Rebuilds `<parent>/<install_name>` as an engine install holding the three
/// [`MOCK_MARKETPLACE_PLUGINS`].
pub fn build_mock_install(parent: &Path, install_name: &str) -> Result<EngineInstallRoot> {
    rebuild(&parent.join(install_name), |root| {
        let engine_dir = root.join(ENGINE_DIR);
        let binaries_dir = engine_dir.join(BINARIES_DIR).join(WIN64_PLATFORM_DIR);
        let build_dir = engine_dir.join(BUILD_DIR);
        let marketplace = marketplace_dir(root);

        make_dir(&binaries_dir, true)?;
        make_dir(&build_dir, false)?;
        // Real Build.version files end with two blank lines.
        write_json(
            &build_dir.join(BUILD_VERSION_FILE),
            &BuildVersion::mock(),
            Indent::Tab,
            Some("\n\n"),
        )?;
        make_dir(&marketplace, true)?;
        write_json(
            &binaries_dir.join(EDITOR_MODULES_FILE),
            &ModulesManifest::new(MOCK_BUILD_ID, &MOCK_ENGINE_MODULES),
            Indent::Spaces(4),
            None,
        )?;
        for base_name in MOCK_MARKETPLACE_PLUGINS {
            build_mock_plugin(&marketplace, base_name)?;
        }

        info!(path = ?root, "Built mock engine install");
        EngineInstallRoot::new(root)
    })
}

/// Rebuilds `<parent>/<project_name>` as a project with default config files,
/// empty `Plugins` and `Content` folders and a `.uproject` descriptor.
pub fn build_mock_project(parent: &Path, project_name: &str) -> Result<ProjectRoot> {
    rebuild(&parent.join(project_name), |root| {
        let config_dir = root.join(CONFIG_DIR);
        let engine_config = format!("Default{}", ENGINE_DIR);

        make_dir(&config_dir, true)?;
        for config_stem in ["DefaultEditor", engine_config.as_str(), "DefaultGame"] {
            write_empty_file(&config_dir.join(file_name(config_stem, CONFIG_EXT)))?;
        }
        make_dir(&root.join(PLUGINS_DIR), false)?;
        make_dir(&root.join(CONTENT_DIR), false)?;
        write_json(
            &root.join(file_name(project_name, UPROJECT_EXT)),
            &ProjectDescriptor::mock(),
            Indent::Tab,
            None,
        )?;

        info!(path = ?root, "Built mock project");
        Ok(ProjectRoot::from_built(root.to_path_buf(), project_name))
    })
}

/// Removes the tree at `root`. A missing tree is not an error.
pub fn clear_tree(root: &Path) -> Result<()> {
    info!(path = ?root, exists = root.exists(), "Removing previous mock tree");
    match fs::remove_dir_all(root) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).context(format!("Failed to remove directory: {:?}", root)),
    }
}

/// Clear-then-construct. Concurrent builders must hold a lock on `root` across both steps.
fn rebuild<T>(root: &Path, construct: impl FnOnce(&Path) -> Result<T>) -> Result<T> {
    clear_tree(root)?;
    construct(root)
}

/// `Source/<Module>/{Private,Public}` with placeholder sources and a rules stub.
fn build_mock_module(source_dir: &Path, module_name: &str) -> Result<()> {
    let module_dir = source_dir.join(module_name);
    let private_dir = module_dir.join(PRIVATE_DIR);
    let public_dir = module_dir.join(PUBLIC_DIR);
    let source_stem = format!("{}Module", module_name);

    make_dir(&private_dir, true)?;
    write_empty_file(&private_dir.join(file_name(&source_stem, CPP_SOURCE_EXT)))?;
    make_dir(&public_dir, false)?;
    write_empty_file(&public_dir.join(file_name(&source_stem, CPP_HEADER_EXT)))?;
    write_module_stub_source(
        &module_dir.join(file_name(module_name, BUILD_RULES_EXT)),
        module_name,
    )
}

fn make_dir(path: &Path, parents: bool) -> Result<()> {
    debug!(path = ?path, parents, "Creating directory");
    let result = if parents {
        fs::create_dir_all(path)
    } else {
        fs::create_dir(path)
    };
    result.context(format!("Failed to create directory: {:?}", path))
}
