//! Location and loading of the API description document
//!
//! Local documents are read as JSON or YAML. YAML tags are checked against an
//! explicit allow-list of core schema tags; any other tag rejects the document
//! instead of being trusted.

use crate::error::{Error, Result};
use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;
use yaml_rust2::parser::{Event, EventReceiver, Parser};

/// YAML core schema tags a document may carry
pub const ALLOWED_YAML_TAGS: &[&str] = &[
    "str",
    "int",
    "float",
    "bool",
    "null",
    "map",
    "seq",
    "binary",
    "timestamp",
];

const YAML_TAG_PREFIX: &str = "tag:yaml.org,2002:";

/// Where the API description lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecSource {
    Local(PathBuf),
    Remote(Url),
}

impl SpecSource {
    /// Classify a specification URI
    ///
    /// Absolute URLs other than `file:` are remote; everything else, including
    /// Windows drive paths, is a local path.
    pub fn resolve(uri: &str) -> Self {
        match Url::parse(uri) {
            Ok(url) if url.scheme() == "file" => url
                .to_file_path()
                .map(SpecSource::Local)
                .unwrap_or_else(|_| SpecSource::Local(PathBuf::from(uri))),
            Ok(url) if url.scheme().len() > 1 => SpecSource::Remote(url),
            _ => SpecSource::Local(PathBuf::from(uri)),
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, SpecSource::Remote(_))
    }
}

/// A loaded API description
#[derive(Debug, Clone, PartialEq)]
pub struct ApiDocument {
    pub path: PathBuf,
    pub content: JsonValue,
}

impl ApiDocument {
    /// Load a local document, picking JSON or YAML from the extension
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::SpecNotFound(path.to_path_buf()));
        }
        let text = fs::read_to_string(path)?;

        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        );
        let content = if is_yaml {
            check_yaml_tags(&text)?;
            let yaml: YamlValue = serde_yaml::from_str(&text)?;
            serde_json::to_value(untag(yaml))?
        } else {
            serde_json::from_str(&text)?
        };

        Ok(Self {
            path: path.to_path_buf(),
            content,
        })
    }

    pub fn title(&self) -> Option<&str> {
        self.content.pointer("/info/title")?.as_str()
    }

    /// `openapi` (3.x) or `swagger` (2.0) version field
    pub fn version(&self) -> Option<&str> {
        self.content
            .get("openapi")
            .or_else(|| self.content.get("swagger"))?
            .as_str()
    }
}

fn is_allowed_tag(tag: &str) -> bool {
    tag.strip_prefix(YAML_TAG_PREFIX)
        .is_some_and(|name| ALLOWED_YAML_TAGS.contains(&name))
}

/// Full tag URI; `!!` is shorthand for the core schema prefix
fn expand_tag(handle: &str, suffix: &str) -> String {
    match handle {
        "!!" => format!("{YAML_TAG_PREFIX}{suffix}"),
        _ => format!("{handle}{suffix}"),
    }
}

/// Records the first tag outside the allow-list
#[derive(Default)]
struct TagCheck {
    rejected: Option<String>,
}

impl EventReceiver for TagCheck {
    fn on_event(&mut self, event: Event) {
        if self.rejected.is_some() {
            return;
        }
        let tag = match event {
            Event::Scalar(_, _, _, tag) | Event::SequenceStart(_, tag) | Event::MappingStart(_, tag) => tag,
            _ => None,
        };
        if let Some(tag) = tag {
            let expanded = expand_tag(&tag.handle, &tag.suffix);
            if !is_allowed_tag(&expanded) {
                self.rejected = Some(expanded);
            }
        }
    }
}

/// Reject documents carrying tags outside the core schema
///
/// Runs on raw parser events, since tags are already resolved (and global
/// ones dropped) once the document is deserialized.
fn check_yaml_tags(text: &str) -> Result<()> {
    let mut check = TagCheck::default();
    Parser::new(text.chars())
        .load(&mut check, true)
        .map_err(|e| Error::SpecRejected(format!("invalid YAML: {e}")))?;
    match check.rejected {
        Some(tag) => Err(Error::SpecRejected(format!("YAML tag {tag} is not allowed"))),
        None => Ok(()),
    }
}

/// Strip tags left on the value tree; they were checked before deserializing
fn untag(value: YamlValue) -> YamlValue {
    match value {
        YamlValue::Tagged(tagged) => untag(tagged.value),
        YamlValue::Sequence(items) => YamlValue::Sequence(items.into_iter().map(untag).collect()),
        YamlValue::Mapping(mapping) => YamlValue::Mapping(
            mapping
                .into_iter()
                .map(|(key, value)| (untag(key), untag(value)))
                .collect(),
        ),
        other => other,
    }
}
