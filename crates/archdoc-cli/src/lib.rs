//! CLI library components for the documentation generator.

pub mod logging;
pub mod settings;
pub mod summary;
