//! Integration tests for environment detection over on-disk projects

use restgen_core::detect::{EnvironmentDetector, TransportChoice};
use restgen_core::project::ProjectModel;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_source(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

#[test]
fn test_toml_descriptor_with_dependency_report() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    fs::write(
        root.join("dependencies.txt"),
        "[INFO] The following files have been resolved:\n\
         [INFO]    org.apache.camel:camel-core-engine:jar:4.8.0:compile\n\
         [INFO]    org.apache.camel:camel-servlet:jar:4.8.0:compile\n\
         [INFO]    org.apache.camel:camel-jetty:jar:4.8.0:compile\n",
    )
    .unwrap();
    fs::write(
        root.join("restgen-project.toml"),
        r#"
source_roots = ["app/src", "lib/src"]
dependency_report = "dependencies.txt"

[[dependencies]]
groupId = "org.springframework.boot"
artifactId = "spring-boot-starter-web"
version = "3.3.0"
"#,
    )
    .unwrap();

    write_source(root, "app/src/A/Foo.java", "package com.example.foo;\npublic class Foo {}\n");
    write_source(
        root,
        "app/src/A/B/App.java",
        "package com.example.app;\n\n@SpringBootApplication\npublic class App {}\n",
    );
    write_source(
        root,
        "lib/src/Other.java",
        "package com.example.other;\n@SpringBootApplication\nclass Other {}\n",
    );

    let project = ProjectModel::discover(root).unwrap();
    let detection = EnvironmentDetector::for_project(&project).detect();

    assert_eq!(detection.framework_version.as_deref(), Some("4.8.0"));
    // servlet is declared before jetty
    assert_eq!(detection.transport_component.as_deref(), Some("servlet"));
    assert!(detection.has_companion_framework);
    assert_eq!(detection.entry_package.as_deref(), Some("com.example.app"));
}

#[test]
fn test_fallback_advice_for_companion_project() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("restgen-project.json"),
        r#"{"dependencies": [
            {"groupId": "org.apache.camel.springboot", "artifactId": "camel-spring-boot-starter", "version": "4.8.0"},
            {"groupId": "org.apache.camel", "artifactId": "camel-core", "version": "4.8.0"},
            {"groupId": "org.springframework.boot", "artifactId": "spring-boot-starter"}
        ]}"#,
    )
    .unwrap();

    let project = ProjectModel::discover(temp_dir.path()).unwrap();
    let (detection, choice) = EnvironmentDetector::for_project(&project).detect_with_transport();

    assert_eq!(detection.transport_component, None);
    assert_eq!(choice.component, "platform-http");
    assert_eq!(
        choice.remediation().unwrap(),
        "Add the following dependency in the Maven pom.xml file:\n\
         \n\t\t<dependency>\
         \n\t\t\t<groupId>org.apache.camel.springboot</groupId>\
         \n\t\t\t<artifactId>camel-platform-http-starter</artifactId>\
         \n\t\t\t<version>4.8.0</version>\
         \n\t\t</dependency>\n\n"
    );
    assert_eq!(TransportChoice::from_detection(&detection), choice);
}

#[test]
fn test_detection_is_repeatable() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("restgen-project.json"),
        r#"{"dependencies": [
            {"groupId": "org.apache.camel", "artifactId": "camel-netty-http", "version": "4.8.0"},
            {"groupId": "org.springframework.boot", "artifactId": "spring-boot"}
        ]}"#,
    )
    .unwrap();
    write_source(
        temp_dir.path(),
        "src/main/java/com/acme/Main.java",
        "package com.acme;\n@SpringBootApplication\npublic class Main {}\n",
    );

    let project = ProjectModel::discover(temp_dir.path()).unwrap();
    let detector = EnvironmentDetector::for_project(&project);
    let first = detector.detect();

    assert_eq!(first.transport_component.as_deref(), Some("netty-http"));
    assert_eq!(first.entry_package.as_deref(), Some("com.acme"));
    assert_eq!(detector.detect(), first);
}
