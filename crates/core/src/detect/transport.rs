//! Transport component matching and the fallback used when none is found

use super::{COMPANION_VARIANT_GROUP, CORE_GROUP, DetectionResult};

/// Known transport components, highest priority first
pub const TRANSPORT_COMPONENTS: &[&str] = &[
    "platform-http",
    "servlet",
    "jetty",
    "undertow",
    "netty-http",
    "coap",
];

const ARTIFACT_PREFIX: &str = "camel-";

/// Transport used when detection comes up empty
pub const DEFAULT_TRANSPORT: &str = "platform-http";

/// First transport whose artifact prefix `artifact_id` starts with
pub(crate) fn match_artifact(artifact_id: &str) -> Option<&'static str> {
    TRANSPORT_COMPONENTS.iter().copied().find(|name| {
        artifact_id
            .strip_prefix(ARTIFACT_PREFIX)
            .is_some_and(|rest| rest.starts_with(*name))
    })
}

/// Dependency the user should add to get the fallback transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackDependency {
    pub group_id: &'static str,
    pub artifact_id: &'static str,
    pub version: Option<String>,
}

impl FallbackDependency {
    pub fn for_detection(detection: &DetectionResult) -> Self {
        let (group_id, artifact_id) = if detection.has_companion_framework {
            (COMPANION_VARIANT_GROUP, "camel-platform-http-starter")
        } else {
            (CORE_GROUP, "camel-platform-http")
        };
        Self {
            group_id,
            artifact_id,
            version: detection.framework_version.clone(),
        }
    }

    /// Dependency declaration ready to paste into the build descriptor
    pub fn declaration_snippet(&self) -> String {
        let mut snippet = format!(
            "\n\t\t<dependency>\n\t\t\t<groupId>{}</groupId>\n\t\t\t<artifactId>{}</artifactId>",
            self.group_id, self.artifact_id
        );
        if let Some(version) = &self.version {
            snippet.push_str(&format!("\n\t\t\t<version>{version}</version>"));
        }
        snippet.push_str("\n\t\t</dependency>\n");
        snippet
    }
}

/// The transport a run will use
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportChoice {
    pub component: String,
    /// Set when the component is the fallback rather than a detected one
    pub fallback: Option<FallbackDependency>,
}

impl TransportChoice {
    pub fn from_detection(detection: &DetectionResult) -> Self {
        match &detection.transport_component {
            Some(component) => Self {
                component: component.clone(),
                fallback: None,
            },
            None => Self {
                component: DEFAULT_TRANSPORT.to_string(),
                fallback: Some(FallbackDependency::for_detection(detection)),
            },
        }
    }

    pub fn is_detected(&self) -> bool {
        self.fallback.is_none()
    }

    /// Advisory text for a fallback choice
    pub fn remediation(&self) -> Option<String> {
        self.fallback.as_ref().map(|dep| {
            format!(
                "Add the following dependency in the Maven pom.xml file:\n{}\n",
                dep.declaration_snippet()
            )
        })
    }

    /// Log what was chosen; advisory only
    pub fn report(&self) {
        match self.remediation() {
            None => tracing::info!(
                "Detected Rest component from classpath: {}",
                self.component
            ),
            Some(advice) => {
                tracing::info!(
                    "Cannot detect Rest component from classpath. Will use {} as Rest component.",
                    self.component
                );
                tracing::info!("{}", advice);
            }
        }
    }
}
