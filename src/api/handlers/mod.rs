//! HTTP API Request Handlers

/// Anganwadi centre handlers
pub mod centers;
/// Settings document handlers
pub mod settings;
/// Health check
pub mod system;

pub use centers::*;
pub use settings::*;
pub use system::*;
