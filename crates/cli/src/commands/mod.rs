pub mod detect;
pub mod generate;

pub use detect::detect_command;
pub use generate::{GenerateOptions, generate_command};
