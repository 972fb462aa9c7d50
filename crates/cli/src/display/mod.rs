pub mod report;

pub use report::{detection_json, print_detection, print_run_report};
