//! Folder, file and extension names that make up the Unreal Engine on-disk conventions.
//!
//! Every path-shape contract in the crate is built from these names, so the
//! predicates, the mock builders and discovery always agree on what an
//! installation, a project and a plugin look like.

pub const ENGINE_DIR: &str = "Engine";
pub const BINARIES_DIR: &str = "Binaries";
pub const WIN64_PLATFORM_DIR: &str = "Win64";
pub const BUILD_DIR: &str = "Build";
pub const BUILD_VERSION_FILE: &str = "Build.version";
pub const EDITOR_MODULES_FILE: &str = "UnrealEditor.modules";

pub const PLUGINS_DIR: &str = "Plugins";
pub const MARKETPLACE_DIR: &str = "Marketplace";
pub const CONFIG_DIR: &str = "Config";
pub const CONTENT_DIR: &str = "Content";
pub const SOURCE_DIR: &str = "Source";
pub const PRIVATE_DIR: &str = "Private";
pub const PUBLIC_DIR: &str = "Public";

pub const UPLUGIN_EXT: &str = "uplugin";
pub const UPROJECT_EXT: &str = "uproject";
pub const CONFIG_EXT: &str = "ini";
pub const CPP_SOURCE_EXT: &str = "cpp";
pub const CPP_HEADER_EXT: &str = "h";
pub const BUILD_RULES_EXT: &str = "Build.cs";

pub const EDITOR_BINARY_PREFIX: &str = "UnrealEditor-";
pub const DLL_EXT: &str = "dll";

/// `<name>.<ext>`
pub fn file_name(stem: &str, ext: &str) -> String {
    format!("{}.{}", stem, ext)
}

/// Name of the editor binary built for a module, e.g. `UnrealEditor-Foo.dll`.
pub fn editor_binary_name(module_name: &str) -> String {
    format!("{}{}.{}", EDITOR_BINARY_PREFIX, module_name, DLL_EXT)
}
