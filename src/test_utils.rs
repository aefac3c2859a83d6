//! Shared test utilities.
//!
//! Helpers for setting up in-memory test databases and seeding records with
//! sensible defaults.

use crate::{
    core::{
        center,
        sections::SectionName,
        settings::{get_or_create_settings, replace_section},
    },
    entities,
    errors::Result,
};
use sea_orm::DatabaseConnection;
use serde_json::json;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all database tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Materializes the default settings and sets `general.district`.
pub async fn seed_settings_with_district(db: &DatabaseConnection, district: &str) -> Result<()> {
    get_or_create_settings(db).await?;
    replace_section(db, SectionName::General, json!({ "district": district })).await?;
    Ok(())
}

/// Creates a test centre with sensible defaults.
///
/// # Defaults
/// * `code`: None
/// * `district`: "Kottayam"
/// * `worker_id`: None
pub async fn create_test_center(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::center::Model> {
    center::create_center(db, name.to_string(), None, "Kottayam".to_string(), None).await
}
