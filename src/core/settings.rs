//! Settings store - the singleton settings document.
//!
//! The document lives in the `system_settings` table under a fixed key.
//! Reading the whole document creates it with defaults when it is missing;
//! section reads and section writes do not. Every write is a read, an
//! in-memory change, a timestamp refresh and a full-document save, all inside
//! one database transaction.

use crate::{
    core::sections::{GeneralSettings, ModulesMap, SectionName, Settings},
    entities::{
        SystemSettings,
        system_settings::{self, SETTINGS_ID},
    },
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{Set, TransactionTrait, prelude::*, sea_query::OnConflict};
use serde_json::Value;
use tracing::{debug, info, instrument};

/// Whether a write may materialize the document when none exists yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Missing {
    Create,
    Fail,
}

/// Decodes the stored JSON document into [`Settings`].
pub fn decode_document(model: &system_settings::Model) -> Result<Settings> {
    serde_json::from_value(model.document.clone()).map_err(Into::into)
}

/// Fetches the raw settings row, if it has been created.
pub async fn find_settings_row<C>(db: &C) -> Result<Option<system_settings::Model>>
where
    C: ConnectionTrait,
{
    SystemSettings::find_by_id(SETTINGS_ID)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Returns the settings document, creating it with defaults if absent.
///
/// Callers never see "no settings": the first read materializes and saves
/// the defaults. Creation is an insert-if-absent, so two racing first reads
/// both end up returning the same single row.
#[instrument(skip(db))]
pub async fn get_or_create_settings(db: &DatabaseConnection) -> Result<Settings> {
    if let Some(model) = find_settings_row(db).await? {
        return decode_document(&model);
    }

    let defaults = Settings::default();
    let now = Utc::now().naive_utc();
    let row = system_settings::ActiveModel {
        id: Set(SETTINGS_ID.to_string()),
        document: Set(serde_json::to_value(&defaults)?),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let inserted = SystemSettings::insert(row)
        .on_conflict(
            OnConflict::column(system_settings::Column::Id)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

    if inserted == 0 {
        debug!("Settings were created concurrently, reading the stored copy");
    } else {
        info!("Created default settings document");
    }

    let model = find_settings_row(db)
        .await?
        .ok_or(Error::SettingsNotFound)?;
    decode_document(&model)
}

/// Replaces every section present in `document`.
///
/// Sections present in the payload replace the stored ones wholesale (missing
/// fields inside them take their defaults); sections absent from the payload
/// are kept. Keys that are not section names are ignored. When no document
/// exists yet one is built from the payload over the defaults.
#[instrument(skip(db, document))]
pub async fn replace_all_settings(db: &DatabaseConnection, document: Value) -> Result<Settings> {
    let Value::Object(sections) = document else {
        return Err(Error::validation("settings", "expected a JSON object"));
    };

    let settings = write_settings(db, Missing::Create, |settings| {
        for name in SectionName::ALL {
            if let Some(value) = sections.get(name.as_str()) {
                settings.set_section(name, value.clone())?;
            }
        }
        Ok(())
    })
    .await?;

    info!("Replaced settings document");
    Ok(settings)
}

/// Returns one section of the document.
///
/// Fails with [`Error::SettingsNotFound`] when the document does not exist;
/// this read never creates it.
#[instrument(skip(db))]
pub async fn get_section(db: &DatabaseConnection, name: SectionName) -> Result<Value> {
    let model = find_settings_row(db)
        .await?
        .ok_or(Error::SettingsNotFound)?;
    decode_document(&model)?.section(name)
}

/// Shallow-merges `patch` onto a section and returns the stored result.
///
/// Fails with [`Error::SettingsNotFound`] when the document does not exist.
#[instrument(skip(db, patch))]
pub async fn replace_section(
    db: &DatabaseConnection,
    name: SectionName,
    patch: Value,
) -> Result<Value> {
    let settings = write_settings(db, Missing::Fail, |settings| {
        settings.merge_section(name, patch)
    })
    .await?;

    info!("Updated settings section {}", name);
    settings.section(name)
}

/// Enables or disables a module, adding the module id if it is new.
///
/// Any module id is accepted. Returns the full module map after the write.
#[instrument(skip(db))]
pub async fn set_module_flag(
    db: &DatabaseConnection,
    module_id: &str,
    enabled: bool,
) -> Result<ModulesMap> {
    let settings = write_settings(db, Missing::Fail, |settings| {
        settings
            .maintenance
            .modules
            .insert(module_id.to_string(), enabled);
        Ok(())
    })
    .await?;

    info!("Set module {} enabled = {}", module_id, enabled);
    Ok(settings.maintenance.modules)
}

/// Resets the whole document to its defaults.
#[instrument(skip(db))]
pub async fn reset_settings(db: &DatabaseConnection) -> Result<Settings> {
    let settings = write_settings(db, Missing::Create, |settings| {
        *settings = Settings::default();
        Ok(())
    })
    .await?;

    info!("Reset settings to defaults");
    Ok(settings)
}

/// Points `general.logo` at an already stored file.
#[instrument(skip(db))]
pub async fn set_logo(db: &DatabaseConnection, path: &str) -> Result<GeneralSettings> {
    let path = path.trim();
    if path.is_empty() {
        return Err(Error::validation("general.logo", "logo path cannot be empty"));
    }

    let settings = write_settings(db, Missing::Create, |settings| {
        settings.general.logo = path.to_string();
        Ok(())
    })
    .await?;

    info!("Updated logo to {}", path);
    Ok(settings.general)
}

/// Read-modify-write of the document inside one transaction.
///
/// `change` runs on the in-memory copy; if it or the range checks fail the
/// transaction is dropped and the stored document is untouched.
async fn write_settings<F>(db: &DatabaseConnection, missing: Missing, change: F) -> Result<Settings>
where
    F: FnOnce(&mut Settings) -> Result<()>,
{
    let txn = db.begin().await?;

    let existing = find_settings_row(&txn).await?;
    let mut settings = match &existing {
        Some(model) => decode_document(model)?,
        None if missing == Missing::Create => Settings::default(),
        None => return Err(Error::SettingsNotFound),
    };

    let previous = settings.maintenance.last_update;
    change(&mut settings)?;
    settings.touch(previous);
    settings.validate()?;

    save_document(&txn, existing, &settings).await?;
    txn.commit().await?;

    Ok(settings)
}

/// Writes the full document, updating the row or inserting it.
///
/// A first write inserts with `ON CONFLICT DO NOTHING`; when another writer
/// created the row in the meantime that row is updated instead.
async fn save_document<C>(
    db: &C,
    existing: Option<system_settings::Model>,
    settings: &Settings,
) -> Result<()>
where
    C: ConnectionTrait,
{
    let document = serde_json::to_value(settings)?;
    let now = Utc::now().naive_utc();

    let model = match existing {
        Some(model) => model,
        None => {
            let new_row = system_settings::ActiveModel {
                id: Set(SETTINGS_ID.to_string()),
                document: Set(document.clone()),
                created_at: Set(now),
                updated_at: Set(now),
            };
            let inserted = SystemSettings::insert(new_row)
                .on_conflict(
                    OnConflict::column(system_settings::Column::Id)
                        .do_nothing()
                        .to_owned(),
                )
                .exec_without_returning(db)
                .await?;
            if inserted > 0 {
                return Ok(());
            }

            debug!("Settings row already exists, updating it instead");
            find_settings_row(db)
                .await?
                .ok_or(Error::SettingsNotFound)?
        }
    };

    let mut active_model: system_settings::ActiveModel = model.into();
    active_model.document = Set(document);
    active_model.updated_at = Set(now);
    active_model.update(db).await?;

    Ok(())
}
