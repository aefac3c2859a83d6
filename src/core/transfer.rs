//! Settings export and import.
//!
//! Exports wrap the stored document in an envelope carrying the export time
//! and format version. Imports accept the same envelope, drop the
//! storage-assigned identity fields and replace the document.

use crate::{
    core::settings::{decode_document, find_settings_row, get_or_create_settings, replace_all_settings},
    core::sections::Settings,
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument};

/// Version written into every export envelope.
pub const EXPORT_VERSION: &str = "1.0";

/// Fields assigned by storage that must not be written back on import.
const IDENTITY_FIELDS: [&str; 5] = ["id", "_id", "__v", "createdAt", "updatedAt"];

/// Export envelope: `{exportDate, version, settings}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsExport {
    /// When the export was produced
    pub export_date: DateTime<Utc>,
    /// Envelope format version
    pub version: String,
    /// The settings document, including its storage identity fields
    pub settings: Value,
}

/// Serializes the whole document into an export envelope.
///
/// Like a whole-document read, exporting creates the defaults if no document
/// exists yet.
#[instrument(skip(db))]
pub async fn export_settings(db: &DatabaseConnection) -> Result<SettingsExport> {
    get_or_create_settings(db).await?;
    let model = find_settings_row(db)
        .await?
        .ok_or(Error::SettingsNotFound)?;

    let mut settings = serde_json::to_value(decode_document(&model)?)?;
    if let Value::Object(fields) = &mut settings {
        fields.insert("id".to_string(), Value::String(model.id.clone()));
        fields.insert(
            "createdAt".to_string(),
            serde_json::to_value(model.created_at.and_utc())?,
        );
        fields.insert(
            "updatedAt".to_string(),
            serde_json::to_value(model.updated_at.and_utc())?,
        );
    }

    Ok(SettingsExport {
        export_date: Utc::now(),
        version: EXPORT_VERSION.to_string(),
        settings,
    })
}

/// Applies an export envelope as a whole-document replace.
#[instrument(skip(db, envelope))]
pub async fn import_settings(db: &DatabaseConnection, envelope: Value) -> Result<Settings> {
    let settings = strip_identity(envelope)?;
    let imported = replace_all_settings(db, settings).await?;
    info!("Imported settings document");
    Ok(imported)
}

/// Pulls `settings` out of an envelope and removes the identity fields.
fn strip_identity(envelope: Value) -> Result<Value> {
    let Value::Object(mut envelope) = envelope else {
        return Err(Error::validation("import", "expected a JSON object"));
    };
    let Some(Value::Object(mut settings)) = envelope.remove("settings") else {
        return Err(Error::validation(
            "import",
            "missing settings object in import envelope",
        ));
    };

    for field in IDENTITY_FIELDS {
        settings.remove(field);
    }
    Ok(Value::Object(settings))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::sections::{ReportFormat, SectionName};
    use crate::core::settings::{get_section, replace_section};
    use crate::test_utils::*;
    use serde_json::json;

    #[test]
    fn test_strip_identity() {
        let stripped = strip_identity(json!({
            "exportDate": "2024-06-01T10:00:00Z",
            "version": "1.0",
            "settings": {
                "_id": "665b1c2f9a1e4c0012345678",
                "__v": 3,
                "id": "global",
                "createdAt": "2024-01-01T00:00:00Z",
                "updatedAt": "2024-05-31T00:00:00Z",
                "general": { "district": "Alappuzha" }
            }
        }))
        .unwrap();

        assert_eq!(stripped, json!({ "general": { "district": "Alappuzha" } }));
    }

    #[test]
    fn test_strip_identity_requires_settings() {
        let err = strip_identity(json!({ "version": "1.0" })).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));

        let err = strip_identity(json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[tokio::test]
    async fn test_export_envelope() -> Result<()> {
        let db = setup_test_db().await?;
        seed_settings_with_district(&db, "Thrissur").await?;

        let export = export_settings(&db).await?;

        assert_eq!(export.version, EXPORT_VERSION);
        assert_eq!(export.settings["id"], "global");
        assert!(export.settings.get("createdAt").is_some());
        assert_eq!(export.settings["general"]["district"], "Thrissur");

        let wire = serde_json::to_value(&export)?;
        assert!(wire.get("exportDate").is_some());

        Ok(())
    }

    #[tokio::test]
    async fn test_export_then_import_elsewhere() -> Result<()> {
        let source = setup_test_db().await?;
        seed_settings_with_district(&source, "Thrissur").await?;
        replace_section(&source, SectionName::Reports, json!({ "defaultFormat": "csv" })).await?;
        let export = serde_json::to_value(export_settings(&source).await?)?;

        let target = setup_test_db().await?;
        let imported = import_settings(&target, export).await?;

        assert_eq!(imported.general.district, "Thrissur");
        assert_eq!(imported.reports.default_format, ReportFormat::Csv);
        let general = get_section(&target, SectionName::General).await?;
        assert_eq!(general["district"], "Thrissur");

        Ok(())
    }

    #[tokio::test]
    async fn test_import_rejects_invalid_document() -> Result<()> {
        let db = setup_test_db().await?;
        seed_settings_with_district(&db, "Palakkad").await?;

        let result = import_settings(
            &db,
            json!({ "settings": { "reports": { "defaultFormat": "docx" } } }),
        )
        .await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        let general = get_section(&db, SectionName::General).await?;
        assert_eq!(general["district"], "Palakkad");

        Ok(())
    }
}
