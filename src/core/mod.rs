//! Core business logic - framework-agnostic settings and centre operations.

/// Anganwadi centre registry
pub mod center;
/// Settings document model: sections, defaults and validation
pub mod sections;
/// The singleton settings store
pub mod settings;
/// Export and import of the settings document
pub mod transfer;
