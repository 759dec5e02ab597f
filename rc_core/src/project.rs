//! # Project Data Structures
//!
//! The `Project` struct is the root container for a set of sections and the
//! settings they are analysed with. Projects serialize to `.rcs` files as
//! human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (version, engineer, job info, timestamps)
//! ├── settings: AnalysisSettings (code, εmax, solver knobs)
//! └── items: HashMap<Uuid, Section> (all sections)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use rc_core::project::Project;
//!
//! let project = Project::new("Jane Engineer", "25-042", "ACME Corp");
//! let json = serde_json::to_string_pretty(&project).unwrap();
//! assert!(json.contains("IS 456:2000"));
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::{Section, SectionAnalysis, SolverSettings};
use crate::equations::stress_block::EC_ULTIMATE;
use crate::errors::{CalcError, CalcResult};

/// Current schema version for .rcs files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub meta: ProjectMetadata,

    #[serde(default)]
    pub settings: AnalysisSettings,

    /// All sections, keyed by UUID
    pub items: HashMap<Uuid, Section>,
}

impl Project {
    /// Create a new empty project.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rc_core::project::Project;
    ///
    /// let project = Project::new("John Doe", "25-001", "Client Corp");
    /// assert_eq!(project.meta.engineer, "John Doe");
    /// ```
    pub fn new(engineer: impl Into<String>, job_id: impl Into<String>, client: impl Into<String>) -> Self {
        let now = Utc::now();
        Project {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                engineer: engineer.into(),
                job_id: job_id.into(),
                client: client.into(),
                created: now,
                modified: now,
            },
            settings: AnalysisSettings::default(),
            items: HashMap::new(),
        }
    }

    /// Validate and add a section. Returns the UUID assigned to it.
    pub fn add_item(&mut self, section: Section) -> CalcResult<Uuid> {
        section.validate()?;
        let id = Uuid::new_v4();
        self.items.insert(id, section);
        self.touch();
        Ok(id)
    }

    /// Remove a section by UUID.
    pub fn remove_item(&mut self, id: &Uuid) -> Option<Section> {
        let item = self.items.remove(id);
        if item.is_some() {
            self.touch();
        }
        item
    }

    pub fn get_item(&self, id: &Uuid) -> Option<&Section> {
        self.items.get(id)
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Sections ordered by label, for stable reports
    pub fn sections_by_label(&self) -> Vec<(&Uuid, &Section)> {
        let mut sections: Vec<_> = self.items.iter().collect();
        sections.sort_by(|a, b| a.1.label.cmp(&b.1.label));
        sections
    }

    /// Analyse every section with the project settings.
    ///
    /// One failing section does not stop the others.
    pub fn analyse_all(&self) -> Vec<(Uuid, CalcResult<SectionAnalysis>)> {
        self.sections_by_label()
            .into_iter()
            .map(|(id, section)| (*id, section.analyse(&self.settings)))
            .collect()
    }
}

impl Default for Project {
    fn default() -> Self {
        Project::new("", "", "")
    }
}

/// Project metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,
    pub engineer: String,
    pub job_id: String,
    pub client: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

/// Analysis settings shared by all sections of a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Design code label
    pub code: String,
    /// Strain at the highly compressed edge in flexure
    pub ec_max: f64,
    pub solver: SolverSettings,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        AnalysisSettings {
            code: "IS 456:2000".to_string(),
            ec_max: EC_ULTIMATE,
            solver: SolverSettings::default(),
        }
    }
}

impl AnalysisSettings {
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.ec_max > 0.0 && self.ec_max <= EC_ULTIMATE) {
            return Err(CalcError::strain_out_of_range(self.ec_max, 0.0, EC_ULTIMATE));
        }
        self.solver.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::{Concrete, RebarMaterial};
    use crate::reinforcement::{ReinforcementGroup, ReinforcementLayer};

    fn beam(label: &str) -> Section {
        let steel = ReinforcementGroup::new(
            RebarMaterial::hysd(415.0).unwrap(),
            vec![ReinforcementLayer::uniform(3, 16.0, -35.0).unwrap()],
        )
        .unwrap();
        Section::rectangular_beam(label, 230.0, 450.0, Concrete::grade(20.0).unwrap(), steel).unwrap()
    }

    #[test]
    fn test_project_creation() {
        let project = Project::new("John Doe", "25-001", "Acme Corp");
        assert_eq!(project.meta.engineer, "John Doe");
        assert_eq!(project.meta.version, SCHEMA_VERSION);
        assert_eq!(project.settings.code, "IS 456:2000");
        assert_eq!(project.settings.ec_max, EC_ULTIMATE);
    }

    #[test]
    fn test_add_remove_item() {
        let mut project = Project::new("Engineer", "25-001", "Client");
        let id = project.add_item(beam("B-1")).unwrap();
        assert_eq!(project.item_count(), 1);
        assert_eq!(project.get_item(&id).map(|s| s.label.as_str()), Some("B-1"));

        assert!(project.remove_item(&id).is_some());
        assert_eq!(project.item_count(), 0);
    }

    #[test]
    fn test_add_rejects_invalid_section() {
        let mut project = Project::default();
        let mut section = beam("B-1");
        section.clear_cover = -1.0;
        assert!(project.add_item(section).is_err());
        assert_eq!(project.item_count(), 0);
    }

    #[test]
    fn test_analyse_all_in_label_order() {
        let mut project = Project::default();
        project.add_item(beam("B-2")).unwrap();
        project.add_item(beam("B-1")).unwrap();
        let results = project.analyse_all();
        let labels: Vec<_> = results
            .iter()
            .map(|(_, r)| r.as_ref().unwrap().label.clone())
            .collect();
        assert_eq!(labels, vec!["B-1", "B-2"]);
    }

    #[test]
    fn test_settings_validation() {
        let settings = AnalysisSettings {
            ec_max: 0.005,
            ..AnalysisSettings::default()
        };
        assert!(matches!(settings.validate(), Err(CalcError::StrainOutOfRange { .. })));
    }

    #[test]
    fn test_project_serialization() {
        let mut project = Project::new("Jane Engineer", "25-042", "Test Client");
        project.add_item(beam("B-1")).unwrap();
        let json = serde_json::to_string_pretty(&project).unwrap();
        assert!(json.contains("Jane Engineer"));

        let roundtrip: Project = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.meta.engineer, "Jane Engineer");
        assert_eq!(roundtrip.item_count(), 1);
    }
}
