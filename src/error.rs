use std::path::PathBuf;
use thiserror::Error;

/// Failures callers are expected to tell apart from plain IO errors.
///
/// These travel inside `anyhow::Error`; use `err.downcast_ref::<DittoError>()`
/// to inspect them.
#[derive(Debug, Error)]
pub enum DittoError {
    #[error("destination already exists and is not empty: {}", path.display())]
    DestinationConflict { path: PathBuf },
    #[error("not an Unreal Engine installation: {}", .0.display())]
    NotAnEngineInstall(PathBuf),
    #[error("not an Unreal project: {}", .0.display())]
    NotAProject(PathBuf),
    #[error("expected exactly one .uplugin file in {}, found {found}", path.display())]
    NotAPlugin { path: PathBuf, found: usize },
}
