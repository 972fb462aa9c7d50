use restgen_core::{DetectionResult, ProjectModel, RunReport, TransportChoice};
use serde_json::{Value, json};

const NOT_FOUND: &str = "(not found)";

pub fn print_detection(project: &ProjectModel, detection: &DetectionResult, transport: &TransportChoice) {
    println!("🔍 Project: {}", project.base_dir.display());
    println!("{}", "=".repeat(80));
    print_detection_lines(detection, transport);

    if let Some(advice) = transport.remediation() {
        println!();
        print!("{advice}");
    }
}

pub fn print_run_report(report: &RunReport) {
    println!("{}", "=".repeat(80));
    print_detection_lines(&report.detection, &report.transport);
    if let Some(strategy) = &report.strategy {
        println!("   Destination generator: {}", strategy.name);
    }
    println!("✅ Generation complete");
}

fn print_detection_lines(detection: &DetectionResult, transport: &TransportChoice) {
    println!(
        "   Framework version: {}",
        detection.framework_version.as_deref().unwrap_or(NOT_FOUND)
    );
    println!(
        "   Transport: {} ({})",
        transport.component,
        if transport.is_detected() { "detected" } else { "fallback" }
    );
    println!(
        "   Companion framework: {}",
        if detection.has_companion_framework { "yes" } else { "no" }
    );
    println!(
        "   Entry package: {}",
        detection.entry_package.as_deref().unwrap_or(NOT_FOUND)
    );
}

pub fn detection_json(detection: &DetectionResult, transport: &TransportChoice) -> Value {
    json!({
        "frameworkVersion": detection.framework_version,
        "transportComponent": detection.transport_component,
        "hasCompanionFramework": detection.has_companion_framework,
        "entryPackage": detection.entry_package,
        "transport": transport.component,
        "fallback": transport.fallback.as_ref().map(|dep| json!({
            "groupId": dep.group_id,
            "artifactId": dep.artifact_id,
            "version": dep.version,
        })),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detection_json_fallback() {
        let detection = DetectionResult {
            framework_version: Some("4.4.0".to_string()),
            has_companion_framework: true,
            ..Default::default()
        };
        let transport = TransportChoice::from_detection(&detection);

        let value = detection_json(&detection, &transport);
        assert_eq!(value["transport"], "platform-http");
        assert_eq!(value["transportComponent"], Value::Null);
        assert_eq!(value["fallback"]["artifactId"], "camel-platform-http-starter");
        assert_eq!(value["fallback"]["version"], "4.4.0");
    }

    #[test]
    fn test_detection_json_detected() {
        let detection = DetectionResult {
            transport_component: Some("servlet".to_string()),
            ..Default::default()
        };
        let transport = TransportChoice::from_detection(&detection);

        let value = detection_json(&detection, &transport);
        assert_eq!(value["transport"], "servlet");
        assert_eq!(value["fallback"], Value::Null);
    }
}
