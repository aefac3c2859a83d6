//! Anganwadi center registry - minimal CRUD for centres and their workers.

use crate::{
    entities::{Center, center},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{info, instrument};

/// Lists every registered centre, ordered alphabetically by name.
pub async fn list_centers(db: &DatabaseConnection) -> Result<Vec<center::Model>> {
    Center::find()
        .order_by_asc(center::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a centre by id, failing with [`Error::CenterNotFound`] if missing.
pub async fn get_center(db: &DatabaseConnection, center_id: i64) -> Result<center::Model> {
    Center::find_by_id(center_id)
        .one(db)
        .await?
        .ok_or(Error::CenterNotFound { id: center_id })
}

/// Registers a new centre.
///
/// The name is trimmed and must not be empty. Blank codes and worker ids are
/// stored as absent.
#[instrument(skip(db))]
pub async fn create_center(
    db: &DatabaseConnection,
    name: String,
    code: Option<String>,
    district: String,
    worker_id: Option<String>,
) -> Result<center::Model> {
    if name.trim().is_empty() {
        return Err(Error::validation("center.name", "center name cannot be empty"));
    }

    let center = center::ActiveModel {
        name: Set(name.trim().to_string()),
        code: Set(non_blank(code)),
        district: Set(district.trim().to_string()),
        worker_id: Set(non_blank(worker_id)),
        created_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    };

    let result = center.insert(db).await?;
    info!("Registered center {} ({})", result.name, result.id);
    Ok(result)
}

/// Assigns a worker to a centre, or clears the assignment with `None`.
#[instrument(skip(db))]
pub async fn assign_worker(
    db: &DatabaseConnection,
    center_id: i64,
    worker_id: Option<String>,
) -> Result<center::Model> {
    let existing = get_center(db, center_id).await?;

    let mut active_model: center::ActiveModel = existing.into();
    active_model.worker_id = Set(non_blank(worker_id));
    let updated = active_model.update(db).await?;

    info!(
        "Center {} worker is now {:?}",
        updated.id, updated.worker_id
    );
    Ok(updated)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
