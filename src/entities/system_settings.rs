//! System settings entity - Stores the deployment-wide settings document.
//! Exactly one row is ever written, under [`SETTINGS_ID`]; the sections
//! live together in the `document` JSON column and are always written whole.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Fixed primary key of the singleton settings row
pub const SETTINGS_ID: &str = "global";

/// System settings database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "system_settings")]
pub struct Model {
    /// Always [`SETTINGS_ID`]
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// The full settings document, serialized from `core::sections::Settings`
    pub document: Json,
    /// When the row was first materialized
    pub created_at: DateTime,
    /// When the document was last written
    pub updated_at: DateTime,
}

/// `SystemSettings` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
