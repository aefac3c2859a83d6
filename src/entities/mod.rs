//! Entity module - Contains all SeaORM entity definitions for the database.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod center;
pub mod system_settings;

// Re-export specific types to avoid conflicts
pub use center::{Column as CenterColumn, Entity as Center, Model as CenterModel};
pub use system_settings::{
    Column as SystemSettingsColumn, Entity as SystemSettings, Model as SystemSettingsModel,
};
