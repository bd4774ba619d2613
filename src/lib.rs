//! Ditto Core Library
//!
//! Discovers Unreal Engine installations and projects on disk, builds mock
//! installation trees for testing, and copies plugin trees into projects.
//!
//! # Modules
//!
//! ## Path predicates (`predicate` module)
//! - `is_engine_install()` - Recognise an installation root by its `Engine/Binaries` and `Build.version`
//! - `is_project()` - Recognise a project folder by its same-named `.uproject`
//!
//! ## Discovery (`registry` module)
//! - `marketplace_plugins()` - List plugin roots under `Engine/Plugins/Marketplace`
//!
//! ## Copying (`operations` module)
//! - `copy_plugin()` - Copy a plugin tree
//! - `copy_plugin_no_binaries()` - Copy a plugin tree without any `Binaries` folder
//!
//! ## Manifests (`manifest` module)
//! - `write_json()` / `read_json()` - Engine-style JSON documents with configurable indentation
//! - Typed `Build.version`, `.modules`, `.uplugin` and `.uproject` documents
//!
//! ## Mock trees (`mock` module)
//! - `build_mock_install()` - A fake installation with three marketplace plugins
//! - `build_mock_project()` - A fake project
//!
//! ## Data Structures (`plugin` module)
//! - `EngineInstallRoot`, `ProjectRoot`, `Plugin` - Only constructible from paths that pass validation

pub mod error;
pub mod layout;
pub mod logging;
pub mod manifest;
pub mod mock;
pub mod operations;
pub mod plugin;
pub mod predicate;
pub mod registry;

pub use error::DittoError;
pub use plugin::{EngineInstallRoot, Plugin, ProjectRoot};
