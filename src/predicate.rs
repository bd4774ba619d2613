//! Path-shape predicates for Unreal Engine installations and projects.
//!
//! Matching works like a relative glob applied from the right: every pattern
//! segment must match the corresponding trailing component of the path, and
//! any ancestors beyond the pattern are ignored. So `*/Engine/Build/Build.version`
//! matches `/opt/UE_5.3/Engine/Build/Build.version` but not `Engine/Build/Build.version`.
//!
//! The two root predicates are deliberately not symmetric. [`is_engine_install`]
//! requires `Engine/Binaries` to exist on disk, while [`is_project`] is a pure
//! structural test that never touches the filesystem.

use crate::layout::{
    file_name, BINARIES_DIR, BUILD_DIR, BUILD_VERSION_FILE, ENGINE_DIR, UPLUGIN_EXT, UPROJECT_EXT,
};
use glob::Pattern;
use std::path::{Component, Path, PathBuf};

/// Returns true if `root` looks like the top-level folder of an engine installation.
///
/// Mirrors how the engine's own desktop platform code recognises a root: an
/// `Engine/Binaries` folder plus an `Engine/Build/Build.version` file. Only the
/// binaries folder is checked for existence; the version file is matched by shape.
pub fn is_engine_install(root: &Path) -> bool {
    let engine_dir = root.join(ENGINE_DIR);

    // Without binaries the candidate collapses to a sentinel that can never match.
    let build_version = if engine_dir.join(BINARIES_DIR).exists() {
        engine_dir.join(BUILD_DIR).join(BUILD_VERSION_FILE)
    } else {
        PathBuf::from(".")
    };

    matches_from_right(
        &build_version,
        &suffix_pattern(&[ENGINE_DIR, BUILD_DIR], BUILD_VERSION_FILE),
    )
}

/// Returns true if `root/<name>.uproject` has the shape `*/<name>/<name>.uproject`,
/// where `<name>` is the final component of `root`.
///
/// No existence check is made: `/nonexistent/Foo` is a project by shape.
pub fn is_project(root: &Path) -> bool {
    let name = match root.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => return false,
    };
    let descriptor_name = file_name(&name, UPROJECT_EXT);
    let descriptor = root.join(&descriptor_name);

    matches_from_right(&descriptor, &suffix_pattern(&[&name], &descriptor_name))
}

/// Returns true if the final component of `path` matches `*.uplugin`.
pub fn is_plugin_descriptor(path: &Path) -> bool {
    matches_from_right(path, &[format!("*.{}", UPLUGIN_EXT)])
}

/// Matches `base/filename` against `*/<dir_segments..>/<filename>`.
///
/// When `base` does not exist the candidate is `base` itself, which only matches
/// if its own path happens to end in the pattern.
pub fn match_file_path_in_folder(base: &Path, filename: &str, dir_segments: &[&str]) -> bool {
    let candidate = if base.exists() {
        base.join(filename)
    } else {
        base.to_path_buf()
    };
    matches_from_right(&candidate, &suffix_pattern(dir_segments, filename))
}

/// `["*", dirs.., file]` with every literal segment escaped.
fn suffix_pattern(dirs: &[&str], file: &str) -> Vec<String> {
    std::iter::once("*".to_string())
        .chain(dirs.iter().map(|dir| Pattern::escape(dir)))
        .chain(std::iter::once(Pattern::escape(file)))
        .collect()
}

fn matches_from_right(path: &Path, pattern: &[String]) -> bool {
    let parts: Vec<String> = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();

    if pattern.is_empty() || pattern.len() > parts.len() {
        return false;
    }

    parts
        .iter()
        .rev()
        .zip(pattern.iter().rev())
        .all(|(part, segment)| match Pattern::new(segment) {
            Ok(pattern) => pattern.matches(part),
            Err(_) => false,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_engine_install_requires_binaries() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("UE_5.3");
        fs::create_dir_all(root.join("Engine/Build")).unwrap();
        fs::write(root.join("Engine/Build/Build.version"), "{}").unwrap();

        assert!(!is_engine_install(&root));

        fs::create_dir_all(root.join("Engine/Binaries")).unwrap();
        assert!(is_engine_install(&root));
    }

    #[test]
    fn test_engine_install_version_file_is_matched_by_shape() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("BinariesOnly");
        fs::create_dir_all(root.join("Engine/Binaries")).unwrap();

        assert!(is_engine_install(&root));
    }

    #[test]
    fn test_engine_install_missing_root() {
        assert!(!is_engine_install(Path::new("/definitely/not/here")));
        assert!(!is_engine_install(Path::new("")));
    }

    #[test]
    fn test_project_is_structural() {
        assert!(is_project(Path::new("/nonexistent/Foo")));
        assert!(is_project(Path::new("relative/Foo")));
        assert!(!is_project(Path::new("Foo")));
        assert!(!is_project(Path::new("/")));
        assert!(!is_project(Path::new("..")));
    }

    #[test]
    fn test_project_existing_folder() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("Shooter");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("Shooter.uproject"), "{}").unwrap();

        assert!(is_project(&root));
    }

    #[test]
    fn test_project_name_with_glob_characters() {
        assert!(is_project(Path::new("/projects/Game[1]")));
        assert!(is_project(Path::new("/projects/What*")));
    }

    #[test]
    fn test_plugin_descriptor() {
        assert!(is_plugin_descriptor(Path::new("/a/Foo/Foo.uplugin")));
        assert!(is_plugin_descriptor(Path::new("Foo.uplugin")));
        assert!(!is_plugin_descriptor(Path::new("/a/Foo/Foo.uproject")));
        assert!(!is_plugin_descriptor(Path::new("/a/Foo.uplugin/readme.txt")));
    }

    #[test]
    fn test_match_file_path_in_folder() {
        let temp = TempDir::new().unwrap();
        let base = temp.path().join("Config");
        fs::create_dir(&base).unwrap();

        assert!(match_file_path_in_folder(&base, "DefaultGame.ini", &["Config"]));
        assert!(!match_file_path_in_folder(&base, "DefaultGame.ini", &["Content"]));

        // Missing base: the base path itself is the candidate.
        let missing = temp.path().join("Config/DefaultGame.ini/nope");
        assert!(!match_file_path_in_folder(&missing, "DefaultGame.ini", &["Config"]));
        let coincidental = temp.path().join("Missing/Config/DefaultGame.ini");
        assert!(match_file_path_in_folder(&coincidental, "DefaultGame.ini", &["Config"]));
    }
}
