//! HTTP API Request/Response Types

use serde::{Deserialize, Serialize};

/// Body of every error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human readable summary
    pub message: String,
    /// Detail of the underlying error
    pub error: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `true` while the server answers
    pub healthy: bool,
    /// Crate version
    pub version: String,
}

/// `PUT /api/settings/maintenance/modules/:moduleId` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleFlagRequest {
    /// New state of the module
    pub enabled: bool,
}

/// `POST /api/settings/upload-logo` body: path of the stored file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoRequest {
    /// Stored logo path
    pub logo: String,
}

/// `POST /api/centers` body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCenterRequest {
    /// Display name, must not be blank
    pub name: String,
    /// Optional government centre code
    #[serde(default)]
    pub code: Option<String>,
    /// District the centre belongs to
    #[serde(default)]
    pub district: String,
    /// Assigned worker, if any
    #[serde(default)]
    pub worker_id: Option<String>,
}

/// `PUT /api/centers/:id/worker` body; `null` clears the assignment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignWorkerRequest {
    /// Worker to assign
    #[serde(default)]
    pub worker_id: Option<String>,
}
