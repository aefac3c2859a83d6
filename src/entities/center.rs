//! Anganwadi center entity - A childcare centre and its assigned worker.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Anganwadi center database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[sea_orm(table_name = "anganwadi_centers")]
pub struct Model {
    /// Unique identifier for the centre
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name (e.g., "Kumaranalloor AWC 12")
    pub name: String,
    /// Optional government centre code
    pub code: Option<String>,
    /// District the centre belongs to
    pub district: String,
    /// Reference to the assigned Anganwadi worker, None if unassigned
    pub worker_id: Option<String>,
    /// When the centre was registered
    pub created_at: DateTime,
}

/// Centres have no relationships modelled in this crate
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
