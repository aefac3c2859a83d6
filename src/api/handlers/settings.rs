//! Settings handlers: whole document, sections, module flags, logo,
//! export/import and reset.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::Value;
use tracing::debug;

use crate::api::{
    AppState,
    error::ApiResult,
    extract::JsonBody,
    types::{LogoRequest, ModuleFlagRequest},
};
use crate::core::{
    sections::{GeneralSettings, ModulesMap, SectionName, Settings},
    settings,
    transfer::{self, SettingsExport},
};

/// `GET /api/settings` - whole document, created with defaults if absent
pub async fn get_settings(State(state): State<AppState>) -> ApiResult<Json<Settings>> {
    let settings = settings::get_or_create_settings(&state.database).await?;
    Ok(Json(settings))
}

/// `PUT /api/settings` - replace every section given in the body
pub async fn update_settings(
    State(state): State<AppState>,
    JsonBody(document): JsonBody<Value>,
) -> ApiResult<Json<Settings>> {
    let settings = settings::replace_all_settings(&state.database, document).await?;
    Ok(Json(settings))
}

/// `GET /api/settings/:section`
pub async fn get_section(
    State(state): State<AppState>,
    Path(section): Path<String>,
) -> ApiResult<Json<Value>> {
    let name: SectionName = section.parse()?;
    let value = settings::get_section(&state.database, name).await?;
    Ok(Json(value))
}

/// `PUT /api/settings/:section` - shallow merge into one section
pub async fn update_section(
    State(state): State<AppState>,
    Path(section): Path<String>,
    JsonBody(patch): JsonBody<Value>,
) -> ApiResult<Json<Value>> {
    let name: SectionName = section.parse()?;
    debug!("HTTP section update: {}", name);
    let value = settings::replace_section(&state.database, name, patch).await?;
    Ok(Json(value))
}

/// `PUT /api/settings/maintenance/modules/:module_id`
pub async fn set_module(
    State(state): State<AppState>,
    Path(module_id): Path<String>,
    JsonBody(request): JsonBody<ModuleFlagRequest>,
) -> ApiResult<Json<ModulesMap>> {
    let modules =
        settings::set_module_flag(&state.database, &module_id, request.enabled).await?;
    Ok(Json(modules))
}

/// `POST /api/settings/upload-logo` - record the path of a stored logo
pub async fn upload_logo(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LogoRequest>,
) -> ApiResult<Json<GeneralSettings>> {
    let general = settings::set_logo(&state.database, &request.logo).await?;
    Ok(Json(general))
}

/// `POST /api/settings/reset`
pub async fn reset_settings(State(state): State<AppState>) -> ApiResult<Json<Settings>> {
    let settings = settings::reset_settings(&state.database).await?;
    Ok(Json(settings))
}

/// `GET /api/settings/export`
pub async fn export_settings(State(state): State<AppState>) -> ApiResult<Json<SettingsExport>> {
    let export = transfer::export_settings(&state.database).await?;
    Ok(Json(export))
}

/// `POST /api/settings/import`
pub async fn import_settings(
    State(state): State<AppState>,
    JsonBody(envelope): JsonBody<Value>,
) -> ApiResult<Json<Settings>> {
    let settings = transfer::import_settings(&state.database, envelope).await?;
    Ok(Json(settings))
}
