//! # File I/O Module
//!
//! Project file operations:
//! - **Atomic saves**: Write to .tmp, sync, rename to prevent corruption
//! - **Validated loads**: Schema version and every section are checked
//!
//! ## File Format
//!
//! Projects are saved as `.rcs` files containing JSON.
//!
//! ## Example
//!
//! ```rust,no_run
//! use rc_core::file_io::{save_project, load_project};
//! use rc_core::project::Project;
//! use std::path::Path;
//!
//! let project = Project::new("Engineer", "25-001", "Client");
//! let path = Path::new("sections.rcs");
//! save_project(&project, path).unwrap();
//! let loaded = load_project(path).unwrap();
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use log::debug;

use crate::errors::{CalcError, CalcResult};
use crate::project::{Project, SCHEMA_VERSION};

/// Save a project to a file with atomic write semantics.
///
/// 1. Serialize project to JSON
/// 2. Write to a temporary file (.tmp)
/// 3. Sync to disk (fsync)
/// 4. Rename .tmp to the target (atomic on most filesystems)
pub fn save_project(project: &Project, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(project).map_err(|e| CalcError::SerializationError {
        reason: e.to_string(),
    })?;

    let tmp_path = path.with_extension("rcs.tmp");

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    debug!("saved {} sections to {}", project.item_count(), path.display());
    Ok(())
}

/// Load a project from a file.
///
/// # Returns
///
/// * `Err(CalcError::VersionMismatch)` - File version is incompatible
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::FileError)` - I/O error
/// * `Err(CalcError::InvalidInput)` - A stored section or setting is invalid
pub fn load_project(path: &Path) -> CalcResult<Project> {
    let mut file = File::open(path).map_err(|e| {
        CalcError::file_error("open", path.display().to_string(), e.to_string())
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| {
        CalcError::file_error("read", path.display().to_string(), e.to_string())
    })?;

    let project = parse_project(&contents).map_err(|e| match e {
        CalcError::SerializationError { reason } => CalcError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), reason),
        },
        other => other,
    })?;

    debug!("loaded {} sections from {}", project.item_count(), path.display());
    Ok(project)
}

/// Parse and validate a project from JSON text.
pub fn parse_project(json: &str) -> CalcResult<Project> {
    let project: Project = serde_json::from_str(json).map_err(|e| CalcError::SerializationError {
        reason: e.to_string(),
    })?;

    validate_version(&project.meta.version)?;
    project.settings.validate()?;
    for section in project.items.values() {
        section.validate()?;
    }
    Ok(project)
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file_parts: Vec<u32> = file_version.split('.').filter_map(|p| p.parse().ok()).collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION.split('.').filter_map(|p| p.parse().ok()).collect();

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(mismatch());
    }

    // Major version must match
    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    // In 0.x a newer minor version may contain breaking changes
    if current_parts[0] == 0 && file_parts.len() > 1 && current_parts.len() > 1 && file_parts[1] > current_parts[1] {
        return Err(mismatch());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::Section;
    use crate::materials::{Concrete, RebarMaterial};
    use crate::reinforcement::{ReinforcementGroup, ReinforcementLayer};
    use std::env::temp_dir;
    use std::path::PathBuf;

    fn temp_project_path(name: &str) -> PathBuf {
        temp_dir().join(format!("rc_core_test_{}_{}.rcs", name, std::process::id()))
    }

    fn sample_project() -> Project {
        let mut project = Project::new("Test Engineer", "TEST-001", "Test Client");
        let steel = ReinforcementGroup::new(
            RebarMaterial::hysd(415.0).unwrap(),
            vec![ReinforcementLayer::uniform(3, 16.0, -35.0).unwrap()],
        )
        .unwrap();
        let beam = Section::rectangular_beam("B1", 230.0, 450.0, Concrete::grade(20.0).unwrap(), steel).unwrap();
        project.add_item(beam).unwrap();
        project
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_project_path("roundtrip");

        let project = sample_project();
        save_project(&project, &path).unwrap();

        let loaded = load_project(&path).unwrap();
        assert_eq!(loaded.meta.job_id, "TEST-001");
        assert_eq!(loaded.items, project.items);
        assert_eq!(loaded.settings, project.settings);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_save_creates_no_tmp_file() {
        let path = temp_project_path("atomic");
        let tmp_path = path.with_extension("rcs.tmp");

        save_project(&sample_project(), &path).unwrap();
        assert!(!tmp_path.exists());
        assert!(path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file() {
        let path = temp_project_path("missing");
        assert!(matches!(load_project(&path), Err(CalcError::FileError { .. })));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(parse_project("{not json"), Err(CalcError::SerializationError { .. })));
    }

    #[test]
    fn test_invalid_section_rejected_on_load() {
        let mut project = sample_project();
        for section in project.items.values_mut() {
            section.clear_cover = -10.0;
        }
        let json = serde_json::to_string(&project).unwrap();
        assert!(matches!(parse_project(&json), Err(CalcError::InvalidInput { .. })));
    }

    #[test]
    fn test_settings_default_when_omitted() {
        let mut value = serde_json::to_value(sample_project()).unwrap();
        value.as_object_mut().unwrap().remove("settings");
        let project = parse_project(&value.to_string()).unwrap();
        assert_eq!(project.settings.solver.max_iterations, 200);
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.5").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("garbage").is_err());
    }
}
