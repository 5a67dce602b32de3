//! Profile discovery and loading from disk

use crate::error::RegistryError;
use cip_gatekeeper::DomainProfile;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Whether a file name is a loadable profile document
///
/// Underscore-prefixed files and anything named like a schema are skipped.
fn is_profile_document(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    is_yaml && !name.starts_with('_') && !name.contains("schema")
}

/// Find every profile document under `directory`, sorted by path
///
/// A directory that does not exist yields no paths.
pub fn profile_paths(directory: impl AsRef<Path>) -> Result<Vec<PathBuf>, RegistryError> {
    let directory = directory.as_ref();
    if !directory.exists() {
        warn!("Profile directory {} does not exist", directory.display());
        return Ok(Vec::new());
    }

    let mut paths = Vec::new();
    for entry in WalkDir::new(directory) {
        let entry = entry?;
        if entry.file_type().is_file() && is_profile_document(entry.path()) {
            paths.push(entry.into_path());
        }
    }
    paths.sort();
    Ok(paths)
}

/// Read and validate one profile document
pub fn load_profile_file(path: impl AsRef<Path>) -> Result<DomainProfile, RegistryError> {
    let path = path.as_ref();
    debug!("Loading profile {}", path.display());
    cip_gatekeeper::validate_file(path).map_err(|source| RegistryError::Load {
        path: path.to_path_buf(),
        source,
    })
}

/// Load every profile document under `directory`
///
/// The first document that fails aborts the load.
pub fn load_profiles_from_directory(
    directory: impl AsRef<Path>,
) -> Result<Vec<DomainProfile>, RegistryError> {
    let directory = directory.as_ref();
    let profiles = profile_paths(directory)?
        .iter()
        .map(load_profile_file)
        .collect::<Result<Vec<_>, _>>()?;

    info!(
        "Loaded {} profile(s) from {}",
        profiles.len(),
        directory.display()
    );
    Ok(profiles)
}
