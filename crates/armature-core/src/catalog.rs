//! Read-only catalog of project records shown in the detail modals.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

const BUILTIN: &str = include_str!("../data/projects.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    Pdf,
    Github,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectLink {
    #[serde(rename = "type")]
    pub kind: LinkKind,
    pub url: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub achievement: String,
    pub img: String,
    #[serde(default)]
    pub img2: Option<String>,
    #[serde(default)]
    pub link: Option<ProjectLink>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectCatalog {
    records: Vec<ProjectRecord>,
}

impl ProjectCatalog {
    /// The catalog compiled into the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN)
    }

    /// Parses a JSON array of records; identifiers must be unique and non-empty.
    pub fn from_json(source: &str) -> Result<Self> {
        let records: Vec<ProjectRecord> = serde_json::from_str(source)?;
        for (index, record) in records.iter().enumerate() {
            if record.id.is_empty() {
                return Err(CoreError::invalid_config(format!(
                    "project record {index} has an empty id"
                )));
            }
            if records[..index].iter().any(|other| other.id == record.id) {
                return Err(CoreError::invalid_config(format!(
                    "duplicate project id {:?}",
                    record.id
                )));
            }
        }
        Ok(Self { records })
    }

    pub fn get(&self, id: &str) -> Option<&ProjectRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Records in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &ProjectRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_has_projects_and_internships() {
        let catalog = ProjectCatalog::builtin().unwrap();
        assert_eq!(catalog.len(), 9);
        let proj1 = catalog.get("proj1").unwrap();
        assert_eq!(proj1.title, "Tone Control/Karaoke Mixer Circuit");
        assert_eq!(proj1.link.as_ref().map(|link| link.kind), Some(LinkKind::Pdf));
        assert_eq!(
            catalog.get("proj2").and_then(|p| p.link.as_ref()).map(|l| l.kind),
            Some(LinkKind::Github)
        );
        assert!(catalog.get("proj4").unwrap().link.is_none());
        assert_eq!(
            catalog.get("proj5").unwrap().img2.as_deref(),
            Some("assets/project5_2-img.jpeg")
        );
        assert!(!catalog.contains("doesnotexist"));
        let order: Vec<&str> = catalog.iter().map(|p| p.id.as_str()).take(2).collect();
        assert_eq!(order, vec!["proj1", "proj2"]);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let source = r#"[
            {"id": "a", "title": "A", "img": "a.png"},
            {"id": "a", "title": "B", "img": "b.png"}
        ]"#;
        assert!(matches!(
            ProjectCatalog::from_json(source),
            Err(CoreError::InvalidConfig(_))
        ));
    }

    #[test]
    fn malformed_json_is_a_catalog_error() {
        assert!(matches!(
            ProjectCatalog::from_json("{"),
            Err(CoreError::Catalog(_))
        ));
    }
}
