//! Workspace root package; hosts the cross-crate integration tests in `tests/`.

pub use restgen_core::*;
