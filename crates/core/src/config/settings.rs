use crate::{
    auth::{self, AuthMap},
    error::{Error, Result},
    generate::{CommandTool, DEFAULT_CODEGEN_VERSION, ModelParams},
    project::ProjectModel,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Settings file looked up in the project root
pub const CONFIG_FILE_NAME: &str = ".restgen.json";

/// Environment variable naming an explicit settings file
pub const CONFIG_ENV_VAR: &str = "RESTGEN_CONFIG";

/// How to launch the external generation tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            program: "mvn".to_string(),
            args: vec!["-B".to_string()],
        }
    }
}

/// Generation parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Location of the API description; `<base>/src/spec/openapi.json` when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specification_uri: Option<String>,
    /// `<build>/generated-sources/openapi` when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_package: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_name_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_name_suffix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_with_xml: Option<String>,
    pub language: String,
    pub codegen_version: String,
    pub skip: bool,
    /// Registered name of a destination generator strategy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_generator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_options: Option<BTreeMap<String, String>>,
    /// `key:value` pairs separated by commas, URL-encoded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<String>,
    pub tool: ToolSettings,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            specification_uri: None,
            model_output: None,
            model_package: None,
            model_name_prefix: None,
            model_name_suffix: None,
            model_with_xml: Some("false".to_string()),
            language: "java".to_string(),
            codegen_version: DEFAULT_CODEGEN_VERSION.to_string(),
            skip: false,
            destination_generator: None,
            config_options: None,
            auth: None,
            tool: ToolSettings::default(),
        }
    }
}

impl GeneratorSettings {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let settings = serde_json::from_str(&contents).map_err(|e| {
            Error::ConfigError(format!("Failed to parse {}: {e}", path.display()))
        })?;
        Ok(settings)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize settings: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Settings for the project rooted at `base_dir`
    ///
    /// `RESTGEN_CONFIG` takes precedence over `.restgen.json`; neither present
    /// means defaults.
    pub fn load_for_project(base_dir: &Path) -> Result<Self> {
        let explicit = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
        match Self::find_config_file(base_dir, explicit)? {
            Some(path) => {
                tracing::debug!("Loading settings from {:?}", path);
                Self::load_from_file(&path)
            }
            None => {
                tracing::debug!("No settings file for {:?}, using defaults", base_dir);
                Ok(Self::default())
            }
        }
    }

    /// An explicit path must exist; the conventional one is optional
    pub fn find_config_file(base_dir: &Path, explicit: Option<PathBuf>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(Error::ConfigError(format!(
                    "settings file {} named by {CONFIG_ENV_VAR} does not exist",
                    path.display()
                )));
            }
            return Ok(Some(path));
        }

        let path = base_dir.join(CONFIG_FILE_NAME);
        Ok(path.is_file().then_some(path))
    }

    pub fn specification_uri(&self, project: &ProjectModel) -> String {
        self.specification_uri.clone().unwrap_or_else(|| {
            project
                .base_dir
                .join("src")
                .join("spec")
                .join("openapi.json")
                .display()
                .to_string()
        })
    }

    pub fn model_output(&self, project: &ProjectModel) -> String {
        self.model_output.clone().unwrap_or_else(|| {
            project
                .build_dir
                .join("generated-sources")
                .join("openapi")
                .display()
                .to_string()
        })
    }

    pub fn auth_map(&self) -> AuthMap {
        auth::parse(self.auth.as_deref())
    }

    /// Model generation parameters for `language`
    pub fn model_params(&self, project: &ProjectModel, language: &str) -> ModelParams {
        ModelParams {
            input_spec: self.specification_uri(project),
            language: language.to_string(),
            output: Some(self.model_output(project)),
            model_package: self.model_package.clone(),
            model_name_prefix: self.model_name_prefix.clone(),
            model_name_suffix: self.model_name_suffix.clone(),
            with_xml: self.model_with_xml.clone(),
            config_options: self.config_options.clone(),
        }
    }

    pub fn command_tool(&self) -> CommandTool {
        CommandTool::new(self.tool.program.clone(), self.tool.args.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::DependencyList;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = GeneratorSettings::default();
        let project = ProjectModel::new("/work/petstore", DependencyList::default());

        assert_eq!(settings.language, "java");
        assert_eq!(settings.codegen_version, "3.0.54");
        assert_eq!(settings.model_with_xml.as_deref(), Some("false"));
        assert!(!settings.skip);
        assert_eq!(
            PathBuf::from(settings.specification_uri(&project)),
            PathBuf::from("/work/petstore/src/spec/openapi.json")
        );
        assert_eq!(
            PathBuf::from(settings.model_output(&project)),
            PathBuf::from("/work/petstore/target/generated-sources/openapi")
        );
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            r#"{
                "model_package": "com.example.model",
                "config_options": {"dateLibrary": "java8"},
                "tool": {"program": "./mvnw"}
            }"#,
        )
        .unwrap();

        let settings = GeneratorSettings::load_from_file(&path).unwrap();
        assert_eq!(settings.model_package.as_deref(), Some("com.example.model"));
        assert_eq!(settings.codegen_version, "3.0.54");
        assert_eq!(settings.tool.program, "./mvnw");
        assert_eq!(settings.tool.args, vec!["-B".to_string()]);
    }

    #[test]
    fn test_invalid_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "{ \"skip\": \"sometimes\" }").unwrap();

        assert!(matches!(
            GeneratorSettings::load_from_file(&path),
            Err(Error::ConfigError(_))
        ));
    }

    #[test]
    fn test_find_config_file() {
        let temp_dir = TempDir::new().unwrap();
        assert_eq!(GeneratorSettings::find_config_file(temp_dir.path(), None).unwrap(), None);

        let conventional = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(&conventional, "{}").unwrap();
        assert_eq!(
            GeneratorSettings::find_config_file(temp_dir.path(), None).unwrap(),
            Some(conventional)
        );

        let explicit = temp_dir.path().join("ci.json");
        fs::write(&explicit, "{}").unwrap();
        assert_eq!(
            GeneratorSettings::find_config_file(temp_dir.path(), Some(explicit.clone())).unwrap(),
            Some(explicit)
        );

        assert!(
            GeneratorSettings::find_config_file(temp_dir.path(), Some(temp_dir.path().join("nope.json")))
                .is_err()
        );
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        let settings = GeneratorSettings {
            skip: true,
            auth: Some("Authorization:Bearer+abc".to_string()),
            ..Default::default()
        };

        settings.save_to_file(&path).unwrap();
        let reloaded = GeneratorSettings::load_from_file(&path).unwrap();
        assert_eq!(reloaded, settings);
        assert_eq!(
            reloaded.auth_map().get("Authorization").map(String::as_str),
            Some("Bearer abc")
        );
    }

    #[test]
    fn test_model_params() {
        let project = ProjectModel::new("/work/petstore", DependencyList::default());
        let settings = GeneratorSettings {
            specification_uri: Some("api/petstore.yaml".to_string()),
            model_output: Some("target/models".to_string()),
            model_with_xml: None,
            ..Default::default()
        };

        let params = settings.model_params(&project, "spring");
        assert_eq!(params.input_spec, "api/petstore.yaml");
        assert_eq!(params.language, "spring");
        assert_eq!(params.output.as_deref(), Some("target/models"));
        assert_eq!(params.with_xml, None);
        assert_eq!(params.model_package, None);
    }
}
