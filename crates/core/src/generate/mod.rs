//! Model generation through an external tool

mod config;
mod orchestrator;
mod tool;

pub use config::{ConfigValue, GenerationConfig};
pub use orchestrator::{LoadedStrategy, Orchestrator, RunOutcome, RunReport};
pub use tool::{
    CODEGEN_ARTIFACT_ID, CODEGEN_GROUP_ID, CommandTool, DEFAULT_CODEGEN_VERSION, ExecutionEnvironment,
    GENERATE_GOAL, GenerationTool, Session, ToolCoordinates, ToolInvocation,
};

use std::collections::BTreeMap;

/// Option inside `configOptions` that is always forced on
pub const HIDE_GENERATION_TIMESTAMP: &str = "hideGenerationTimestamp";

/// Declared model generation parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelParams {
    pub input_spec: String,
    pub language: String,
    pub output: Option<String>,
    pub model_package: Option<String>,
    pub model_name_prefix: Option<String>,
    pub model_name_suffix: Option<String>,
    pub with_xml: Option<String>,
    pub config_options: Option<BTreeMap<String, String>>,
}

impl ModelParams {
    /// Configuration tree for a models-only run
    ///
    /// API, test, documentation and supporting-file generation are switched
    /// off; `hideGenerationTimestamp` is always `true` whatever the caller set.
    pub fn to_config(&self) -> GenerationConfig {
        let mut config = GenerationConfig::new();
        config.set_scalar("inputSpec", self.input_spec.as_str());
        config.set_scalar("language", self.language.as_str());

        for flag in [
            "generateApis",
            "generateModelTests",
            "generateModelDocumentation",
            "generateSupportingFiles",
        ] {
            config.set_scalar(flag, "false");
        }

        config.set_optional("output", self.output.as_deref());
        config.set_optional("modelPackage", self.model_package.as_deref());
        config.set_optional("modelNamePrefix", self.model_name_prefix.as_deref());
        config.set_optional("modelNameSuffix", self.model_name_suffix.as_deref());
        config.set_optional("withXml", self.with_xml.as_deref());

        let mut options: GenerationConfig = self
            .config_options
            .iter()
            .flatten()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        options.set_scalar(HIDE_GENERATION_TIMESTAMP, "true");
        config.set_group("configOptions", options);

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> ModelParams {
        ModelParams {
            input_spec: "src/spec/openapi.json".to_string(),
            language: "java".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_assembly_order() {
        let config = ModelParams {
            output: Some("target/generated-sources/openapi".to_string()),
            with_xml: Some("false".to_string()),
            ..params()
        }
        .to_config();

        assert_eq!(
            config.keys().collect::<Vec<_>>(),
            vec![
                "inputSpec",
                "language",
                "generateApis",
                "generateModelTests",
                "generateModelDocumentation",
                "generateSupportingFiles",
                "output",
                "withXml",
                "configOptions",
            ]
        );
    }

    #[test]
    fn test_stub_flags_are_off() {
        let config = params().to_config();
        for flag in [
            "generateApis",
            "generateModelTests",
            "generateModelDocumentation",
            "generateSupportingFiles",
        ] {
            assert_eq!(config.scalar(flag), Some("false"), "{flag}");
        }
    }

    #[test]
    fn test_absent_params_are_omitted() {
        let config = params().to_config();
        for key in ["output", "modelPackage", "modelNamePrefix", "modelNameSuffix", "withXml"] {
            assert!(!config.contains_key(key), "{key} should be omitted");
        }
        let options = config.group("configOptions").unwrap();
        assert_eq!(options.len(), 1);
        assert_eq!(options.scalar(HIDE_GENERATION_TIMESTAMP), Some("true"));
    }

    #[test]
    fn test_hide_timestamp_overrides_caller() {
        let config = ModelParams {
            config_options: Some(BTreeMap::from([
                ("dateLibrary".to_string(), "java8".to_string()),
                (HIDE_GENERATION_TIMESTAMP.to_string(), "false".to_string()),
            ])),
            ..params()
        }
        .to_config();

        let options = config.group("configOptions").unwrap();
        assert_eq!(options.scalar(HIDE_GENERATION_TIMESTAMP), Some("true"));
        assert_eq!(options.scalar("dateLibrary"), Some("java8"));
    }
}
