//! Resolved dependency metadata of the host project
//!
//! The list is read-only and keeps declaration order, which detection relies on.

use serde::{Deserialize, Serialize};

/// A single resolved build dependency
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyRecord {
    #[serde(alias = "group_id", alias = "group")]
    pub group_id: String,
    #[serde(alias = "artifact_id", alias = "artifact")]
    pub artifact_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl DependencyRecord {
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: None,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Version, if declared and non-empty
    pub fn declared_version(&self) -> Option<&str> {
        self.version.as_deref().filter(|v| !v.trim().is_empty())
    }

    /// Parse one entry of a dependency list report
    ///
    /// Accepted shapes are `group:artifact:type:version`,
    /// `group:artifact:type:version:scope` and
    /// `group:artifact:type:classifier:version:scope`, optionally prefixed by a
    /// `[INFO]` log marker and followed by trailing annotations.
    pub fn from_report_line(line: &str) -> Option<Self> {
        let line = line.trim();
        let line = line.strip_prefix("[INFO]").unwrap_or(line).trim();
        let coordinates = line.split_whitespace().next()?;

        let parts: Vec<&str> = coordinates.split(':').collect();
        if parts.iter().any(|p| p.is_empty()) {
            return None;
        }
        let version = match parts.len() {
            4 | 5 => parts[3],
            6 => parts[4],
            _ => return None,
        };

        Some(DependencyRecord::new(parts[0], parts[1]).with_version(version))
    }
}

/// Ordered, read-only view over the resolved dependencies
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DependencyList {
    records: Vec<DependencyRecord>,
}

impl DependencyList {
    pub fn new(records: Vec<DependencyRecord>) -> Self {
        Self { records }
    }

    /// Build a list from dependency report text, skipping lines that are not entries
    pub fn from_report(text: &str) -> Self {
        let records = text
            .lines()
            .filter_map(DependencyRecord::from_report_line)
            .collect();
        Self { records }
    }

    /// Records in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &DependencyRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn any_in_group(&self, group_id: &str) -> bool {
        self.records.iter().any(|d| d.group_id == group_id)
    }
}

impl FromIterator<DependencyRecord> for DependencyList {
    fn from_iter<I: IntoIterator<Item = DependencyRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a DependencyList {
    type Item = &'a DependencyRecord;
    type IntoIter = std::slice::Iter<'a, DependencyRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
