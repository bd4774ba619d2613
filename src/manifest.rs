//! JSON manifests and placeholder sources in the formats Unreal tooling writes.
//!
//! The typed documents keep their fields in the same order as the files the
//! engine produces, so a serialized mock is laid out like the real thing.

use crate::layout::editor_binary_name;
use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::ser::{Formatter, PrettyFormatter};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Build id stamped into mock `.modules` files.
pub const MOCK_BUILD_ID: &str = "27405482";

/// Indentation used when pretty-printing a manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    Spaces(usize),
    Tab,
}

impl Indent {
    fn as_bytes(&self) -> Vec<u8> {
        match self {
            Indent::Spaces(count) => vec![b' '; *count],
            Indent::Tab => vec![b'\t'],
        }
    }
}

/// `Engine/Build/Build.version`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BuildVersion {
    pub major_version: u32,
    pub minor_version: u32,
    pub patch_version: u32,
    pub changelist: u64,
    pub compatible_changelist: u64,
    pub is_licensee_version: u32,
    pub is_promoted_build: u32,
    pub branch_name: String,
}

impl BuildVersion {
    pub fn mock() -> Self {
        Self {
            major_version: 5,
            minor_version: 3,
            patch_version: 2,
            changelist: 0,
            compatible_changelist: 27405482,
            is_licensee_version: 0,
            is_promoted_build: 0,
            branch_name: "UE5".to_string(),
        }
    }
}

/// `Binaries/<Platform>/UnrealEditor.modules`: module name to editor binary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModulesManifest {
    pub build_id: String,
    pub modules: IndexMap<String, String>,
}

impl ModulesManifest {
    pub fn new(build_id: &str, module_names: &[&str]) -> Self {
        Self {
            build_id: build_id.to_string(),
            modules: module_names
                .iter()
                .map(|name| (name.to_string(), editor_binary_name(name)))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModuleType {
    Runtime,
    Editor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadingPhase {
    Default,
    PostEngineInit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModuleDescriptor {
    pub name: String,
    #[serde(rename = "Type")]
    pub module_type: ModuleType,
    pub loading_phase: LoadingPhase,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_dependencies: Vec<String>,
}

impl ModuleDescriptor {
    pub fn new(name: &str, module_type: ModuleType, loading_phase: LoadingPhase) -> Self {
        Self {
            name: name.to_string(),
            module_type,
            loading_phase,
            additional_dependencies: Vec::new(),
        }
    }
}

/// `<Plugin>/<Plugin>.uplugin`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PluginDescriptor {
    pub file_version: u32,
    pub version: u32,
    pub version_name: String,
    pub friendly_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub created_by: String,
    #[serde(rename = "CreatedByURL", default)]
    pub created_by_url: String,
    #[serde(rename = "DocsURL", default)]
    pub docs_url: String,
    #[serde(rename = "MarketplaceURL", default)]
    pub marketplace_url: String,
    #[serde(rename = "SupportURL", default)]
    pub support_url: String,
    #[serde(default)]
    pub can_contain_content: bool,
    #[serde(default)]
    pub is_beta_version: bool,
    #[serde(default)]
    pub is_experimental_version: bool,
    #[serde(default)]
    pub installed: bool,
    #[serde(default)]
    pub modules: Vec<ModuleDescriptor>,
}

impl PluginDescriptor {
    /// Descriptor for a mock marketplace plugin with a runtime and an editor module.
    pub fn mock(runtime_module: &str, editor_module: &str) -> Self {
        Self {
            file_version: 3,
            version: 1,
            version_name: "1.0".to_string(),
            friendly_name: runtime_module.to_string(),
            description: "Example Engine Marketplace Plugin used for Testing Ditto".to_string(),
            category: "Other".to_string(),
            created_by: "Andrew Bell".to_string(),
            created_by_url: String::new(),
            docs_url: String::new(),
            marketplace_url: String::new(),
            support_url: String::new(),
            can_contain_content: false,
            is_beta_version: false,
            is_experimental_version: false,
            installed: false,
            modules: vec![
                ModuleDescriptor::new(runtime_module, ModuleType::Runtime, LoadingPhase::Default),
                ModuleDescriptor::new(editor_module, ModuleType::Editor, LoadingPhase::Default),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PluginReference {
    pub name: String,
    pub enabled: bool,
}

/// `<Project>/<Project>.uproject`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProjectDescriptor {
    pub file_version: u32,
    pub engine_association: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub modules: Vec<ModuleDescriptor>,
    #[serde(default)]
    pub plugins: Vec<PluginReference>,
    #[serde(default)]
    pub target_platforms: Vec<String>,
}

impl ProjectDescriptor {
    pub fn mock() -> Self {
        let mut runtime =
            ModuleDescriptor::new("EpicExample", ModuleType::Runtime, LoadingPhase::Default);
        runtime.additional_dependencies = vec!["Engine".to_string()];

        Self {
            file_version: 3,
            engine_association: "5.3".to_string(),
            category: String::new(),
            description: String::new(),
            modules: vec![
                runtime,
                ModuleDescriptor::new(
                    "EpicExampleEditor",
                    ModuleType::Editor,
                    LoadingPhase::PostEngineInit,
                ),
            ],
            plugins: vec![
                PluginReference {
                    name: "BlankPlugin".to_string(),
                    enabled: true,
                },
                PluginReference {
                    name: "ScriptPlugin".to_string(),
                    enabled: true,
                },
            ],
            target_platforms: vec!["Windows".to_string()],
        }
    }
}

/// Create (or truncate) a zero-byte file. The parent directory must exist.
pub fn write_empty_file(path: &Path) -> Result<()> {
    File::create(path).context(format!("Failed to create file: {:?}", path))?;
    Ok(())
}

/// Pretty-print `data` to `path`, then append `extra_text` verbatim.
///
/// Keys keep their insertion order and non-ASCII characters are written as
/// `\uXXXX` escapes, as the engine's Python tooling does.
///
/// Some engine-written manifests end with extra blank lines; `extra_text`
/// exists to reproduce that.
pub fn write_json<T>(path: &Path, data: &T, indent: Indent, extra_text: Option<&str>) -> Result<()>
where
    T: Serialize + ?Sized,
{
    let file = File::create(path).context(format!("Failed to create file: {:?}", path))?;
    let mut writer = BufWriter::new(file);

    let indent = indent.as_bytes();
    let formatter = AsciiFormatter(PrettyFormatter::with_indent(&indent));
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
    data.serialize(&mut serializer)
        .context(format!("Failed to serialize JSON to {:?}", path))?;

    if let Some(extra) = extra_text {
        writer
            .write_all(extra.as_bytes())
            .context(format!("Failed to write file: {:?}", path))?;
    }
    writer
        .flush()
        .context(format!("Failed to write file: {:?}", path))?;

    Ok(())
}

/// Pretty printing with every non-ASCII character escaped.
struct AsciiFormatter<'a>(PrettyFormatter<'a>);

impl Formatter for AsciiFormatter<'_> {
    fn begin_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_array(writer)
    }

    fn end_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.0.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_object(writer)
    }

    fn end_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.0.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object_value(writer)
    }

    fn write_string_fragment<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        if fragment.is_ascii() {
            return writer.write_all(fragment.as_bytes());
        }
        let mut units = [0u16; 2];
        for ch in fragment.chars() {
            if ch.is_ascii() {
                writer.write_all(&[ch as u8])?;
            } else {
                for unit in ch.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }
        Ok(())
    }
}

/// Read and deserialize a JSON manifest.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content =
        fs::read_to_string(path).context(format!("Failed to read file: {:?}", path))?;
    let data = serde_json::from_str(&content)
        .context(format!("Failed to parse JSON in {:?}", path))?;
    Ok(data)
}

/// Write a `<Module>.Build.cs` rules stub for `module_name`.
pub fn write_module_stub_source(path: &Path, module_name: &str) -> Result<()> {
    fs::write(path, module_stub_source(module_name))
        .context(format!("Failed to write build rules: {:?}", path))?;
    Ok(())
}

fn module_stub_source(module_name: &str) -> String {
    format!(
        "// Fake Copyright Notice 2024\n\
         \n\
         using UnrealBuildTool;\n\
         \n\
         public class {name} : ModuleRules\n\
         {{\n\
         \tpublic {name}(ReadOnlyTargetRules Target) : base (Target)\n\
         \t{{\n\
         \t\tPCHUsage = PCHUsageMode.UseExplicitOrSharedPCHs;\n\
         \n\
         \t\tPublicDependencyModuleNames.AddRange(new [] {{ \"Core\", \"Engine\", \"InputCore\" }});\n\
         \n\
         \t\tPrivateDependencyModuleNames.AddRange(new [] {{ \"CoreUObject\", \"RenderCore\" }});\n\
         \t}}\n\
         }}\n",
        name = module_name
    )
}
