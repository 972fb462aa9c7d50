pub mod project;

pub use project::{load_project, load_settings};
