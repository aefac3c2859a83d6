//! Settings document model.
//!
//! The document is split into eight sections. Seven of them are strongly
//! typed structs whose missing fields fall back to their defaults and whose
//! enumerated fields only accept a fixed set of literals. `roles` (and
//! `health.nutritionStandards`) are free-form and use [`OpenMap`].

use crate::errors::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Value, json};
use std::{collections::BTreeMap, fmt, str::FromStr};

/// Schema-free key/value map for sections the document does not type.
pub type OpenMap = serde_json::Map<String, Value>;

/// Per-module enable flags, keyed by module id.
pub type ModulesMap = BTreeMap<String, bool>;

/// Names of the top-level sections of the settings document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SectionName {
    /// Deployment identity, locale and contact details
    General,
    /// Role → permissions map
    Roles,
    /// Email/SMS/push notification configuration
    Notifications,
    /// Health checkups and nutrition standards
    Health,
    /// Waste collection monitoring
    Waste,
    /// Session and password policy
    Security,
    /// Report format and scheduling
    Reports,
    /// Backups, maintenance mode and module toggles
    Maintenance,
}

impl SectionName {
    /// Every section, in document order.
    pub const ALL: [Self; 8] = [
        Self::General,
        Self::Roles,
        Self::Notifications,
        Self::Health,
        Self::Waste,
        Self::Security,
        Self::Reports,
        Self::Maintenance,
    ];

    /// Wire name of the section.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Roles => "roles",
            Self::Notifications => "notifications",
            Self::Health => "health",
            Self::Waste => "waste",
            Self::Security => "security",
            Self::Reports => "reports",
            Self::Maintenance => "maintenance",
        }
    }
}

impl fmt::Display for SectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| Error::SectionNotFound {
                name: s.to_string(),
            })
    }
}

/// Supported outgoing email providers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailProvider {
    /// Plain SMTP relay
    #[default]
    Smtp,
    /// SendGrid API
    Sendgrid,
    /// Amazon SES
    Ses,
    /// Mailgun API
    Mailgun,
}

/// Supported SMS gateways.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SmsProvider {
    /// Twilio
    #[default]
    Twilio,
    /// MSG91
    Msg91,
    /// Textlocal
    Textlocal,
}

/// How often waste bins are collected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionFrequency {
    /// Every day
    Daily,
    /// Once a week
    #[default]
    Weekly,
    /// Every two weeks
    Biweekly,
    /// Once a month
    Monthly,
}

/// File format for generated reports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// PDF document
    #[default]
    Pdf,
    /// Excel workbook
    Excel,
    /// Comma separated values
    Csv,
}

/// Recurrence used by report generation and backups.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Schedule {
    /// Every day
    Daily,
    /// Once a week
    Weekly,
    /// Once a month
    #[default]
    Monthly,
}

/// `general` section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneralSettings {
    /// Name shown in the app header
    pub system_name: String,
    /// Organization running the deployment
    pub organization_name: String,
    /// Path of the uploaded logo, empty when none was uploaded
    pub logo: String,
    /// District served
    pub district: String,
    /// State served
    pub state: String,
    /// Postal address of the office
    pub address: String,
    /// Support email
    pub contact_email: String,
    /// Support phone number
    pub contact_phone: String,
    /// IANA timezone name
    pub timezone: String,
    /// UI language code
    pub language: String,
    /// Display format for dates
    pub date_format: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            system_name: "SampoornaAangan".to_string(),
            organization_name: "Integrated Child Development Services".to_string(),
            logo: String::new(),
            district: String::new(),
            state: String::new(),
            address: String::new(),
            contact_email: String::new(),
            contact_phone: String::new(),
            timezone: "Asia/Kolkata".to_string(),
            language: "en".to_string(),
            date_format: "DD/MM/YYYY".to_string(),
        }
    }
}

/// Outgoing email configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmailConfig {
    /// Delivery provider
    pub provider: EmailProvider,
    /// SMTP host
    pub host: String,
    /// SMTP port
    pub port: u16,
    /// Use TLS
    pub secure: bool,
    /// Login for the provider
    pub username: String,
    /// Sender address
    pub from_address: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: EmailProvider::Smtp,
            host: String::new(),
            port: 587,
            secure: false,
            username: String::new(),
            from_address: String::new(),
        }
    }
}

/// SMS gateway configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SmsConfig {
    /// Delivery provider
    pub provider: SmsProvider,
    /// Registered SMS sender id
    pub sender_id: String,
}

/// `notifications` section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationSettings {
    /// Send email notifications
    pub email_enabled: bool,
    /// Send SMS notifications
    pub sms_enabled: bool,
    /// Send push notifications
    pub push_enabled: bool,
    /// Email delivery
    pub email_config: EmailConfig,
    /// SMS delivery
    pub sms_config: SmsConfig,
    /// Days ahead of a due checkup or vaccination to send a reminder
    pub reminder_days_before: u32,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email_enabled: true,
            sms_enabled: false,
            push_enabled: true,
            email_config: EmailConfig::default(),
            sms_config: SmsConfig::default(),
            reminder_days_before: 1,
        }
    }
}

/// `health` section.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HealthSettings {
    /// Days between routine checkups
    pub checkup_interval_days: u32,
    /// Remind about upcoming vaccinations
    pub vaccination_reminders: bool,
    /// Track growth measurements
    pub growth_monitoring: bool,
    /// Alert on malnutrition indicators
    pub malnutrition_alerts: bool,
    /// Age band → nutrition targets, deliberately untyped
    pub nutrition_standards: OpenMap,
}

impl Default for HealthSettings {
    fn default() -> Self {
        Self {
            checkup_interval_days: 30,
            vaccination_reminders: true,
            growth_monitoring: true,
            malnutrition_alerts: true,
            nutrition_standards: default_nutrition_standards(),
        }
    }
}

/// `waste` section.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WasteSettings {
    /// How often bins are collected
    pub collection_frequency: CollectionFrequency,
    /// Fill level (percent) at which a bin raises an alert
    pub alert_threshold: f64,
    /// Waste must be segregated at source
    pub segregation_required: bool,
    /// Recycling workflow enabled
    pub recycling_enabled: bool,
}

impl Default for WasteSettings {
    fn default() -> Self {
        Self {
            collection_frequency: CollectionFrequency::Weekly,
            alert_threshold: 80.0,
            segregation_required: true,
            recycling_enabled: true,
        }
    }
}

/// `security` section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SecuritySettings {
    /// Session lifetime in hours
    pub session_timeout: u32,
    /// Minimum password length
    pub password_min_length: u32,
    /// Passwords need a special character
    pub require_special_chars: bool,
    /// Failed logins before lockout
    pub max_login_attempts: u32,
    /// Lockout after too many failed logins, in minutes
    pub lockout_duration: u32,
    /// Require a second factor at login
    pub two_factor_enabled: bool,
}

impl Default for SecuritySettings {
    fn default() -> Self {
        Self {
            session_timeout: 24,
            password_min_length: 8,
            require_special_chars: true,
            max_login_attempts: 5,
            lockout_duration: 30,
            two_factor_enabled: false,
        }
    }
}

/// `reports` section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportSettings {
    /// Format used when none is requested
    pub default_format: ReportFormat,
    /// Generate reports on `schedule`
    pub auto_generate: bool,
    /// Generation schedule
    pub schedule: Schedule,
    /// Days a generated report is kept
    pub retention_days: u32,
    /// Addresses reports are mailed to
    pub recipients: Vec<String>,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            default_format: ReportFormat::Pdf,
            auto_generate: false,
            schedule: Schedule::Monthly,
            retention_days: 365,
            recipients: Vec::new(),
        }
    }
}

/// `maintenance` section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MaintenanceSettings {
    /// Take scheduled backups
    pub backup_enabled: bool,
    /// Backup schedule
    pub backup_frequency: Schedule,
    /// Days a backup is kept
    pub backup_retention_days: u32,
    /// Reject non-admin traffic
    pub maintenance_mode: bool,
    /// Message shown during maintenance
    pub maintenance_message: String,
    /// Module id to enabled flag
    pub modules: ModulesMap,
    /// Refreshed on every write of the document
    pub last_update: DateTime<Utc>,
    /// Application version
    pub version: String,
}

impl Default for MaintenanceSettings {
    fn default() -> Self {
        Self {
            backup_enabled: true,
            backup_frequency: Schedule::Daily,
            backup_retention_days: 30,
            maintenance_mode: false,
            maintenance_message: String::new(),
            modules: DEFAULT_MODULES
                .iter()
                .map(|module| ((*module).to_string(), true))
                .collect(),
            last_update: Utc::now(),
            version: "1.0.0".to_string(),
        }
    }
}

/// Modules enabled on a fresh deployment.
pub const DEFAULT_MODULES: [&str; 7] = [
    "attendance",
    "nutrition",
    "health",
    "waste",
    "reports",
    "schemes",
    "notifications",
];

/// The whole settings document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Branding and locale
    pub general: GeneralSettings,
    /// Role name to permissions, untyped
    pub roles: OpenMap,
    /// Notification channels
    pub notifications: NotificationSettings,
    /// Health monitoring
    pub health: HealthSettings,
    /// Waste management
    pub waste: WasteSettings,
    /// Login and password policy
    pub security: SecuritySettings,
    /// Report generation
    pub reports: ReportSettings,
    /// Backups, maintenance mode and modules
    pub maintenance: MaintenanceSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            general: GeneralSettings::default(),
            roles: default_roles(),
            notifications: NotificationSettings::default(),
            health: HealthSettings::default(),
            waste: WasteSettings::default(),
            security: SecuritySettings::default(),
            reports: ReportSettings::default(),
            maintenance: MaintenanceSettings::default(),
        }
    }
}

impl Settings {
    /// Serializes one section to its JSON form.
    pub fn section(&self, name: SectionName) -> Result<Value> {
        let value = match name {
            SectionName::General => serde_json::to_value(&self.general),
            SectionName::Roles => Ok(Value::Object(self.roles.clone())),
            SectionName::Notifications => serde_json::to_value(&self.notifications),
            SectionName::Health => serde_json::to_value(&self.health),
            SectionName::Waste => serde_json::to_value(&self.waste),
            SectionName::Security => serde_json::to_value(&self.security),
            SectionName::Reports => serde_json::to_value(&self.reports),
            SectionName::Maintenance => serde_json::to_value(&self.maintenance),
        }?;
        Ok(value)
    }

    /// Replaces one section wholesale with `value`.
    ///
    /// Fields missing from `value` take their defaults. A value that does not
    /// fit the section's declared types or enum literals is rejected with
    /// [`Error::Validation`] and `self` is left untouched.
    pub fn set_section(&mut self, name: SectionName, value: Value) -> Result<()> {
        match name {
            SectionName::General => self.general = decode(name, value)?,
            SectionName::Roles => self.roles = decode(name, value)?,
            SectionName::Notifications => self.notifications = decode(name, value)?,
            SectionName::Health => self.health = decode(name, value)?,
            SectionName::Waste => self.waste = decode(name, value)?,
            SectionName::Security => self.security = decode(name, value)?,
            SectionName::Reports => self.reports = decode(name, value)?,
            SectionName::Maintenance => self.maintenance = decode(name, value)?,
        }
        Ok(())
    }

    /// Shallow-merges `patch` onto a section.
    ///
    /// Top-level keys of `patch` overwrite the same keys of the stored
    /// section; everything else is kept. Nested objects under a touched key
    /// are replaced, not merged.
    pub fn merge_section(&mut self, name: SectionName, patch: Value) -> Result<()> {
        let Value::Object(patch) = patch else {
            return Err(Error::validation(name.as_str(), "expected a JSON object"));
        };
        let Value::Object(mut current) = self.section(name)? else {
            return Err(Error::validation(name.as_str(), "stored section is not an object"));
        };
        current.extend(patch);
        self.set_section(name, Value::Object(current))
    }

    /// Refreshes `maintenance.lastUpdate`, never moving it backwards.
    pub fn touch(&mut self, previous: DateTime<Utc>) {
        self.maintenance.last_update = Utc::now().max(previous);
    }

    /// Checks the numeric ranges serde cannot express.
    pub fn validate(&self) -> Result<()> {
        check_range(
            "security.sessionTimeout",
            self.security.session_timeout,
            1,
            720,
        )?;
        check_range(
            "security.passwordMinLength",
            self.security.password_min_length,
            6,
            128,
        )?;
        check_range(
            "security.maxLoginAttempts",
            self.security.max_login_attempts,
            1,
            u32::MAX,
        )?;
        check_range(
            "health.checkupIntervalDays",
            self.health.checkup_interval_days,
            1,
            u32::MAX,
        )?;
        check_range("reports.retentionDays", self.reports.retention_days, 1, u32::MAX)?;
        check_range(
            "maintenance.backupRetentionDays",
            self.maintenance.backup_retention_days,
            1,
            u32::MAX,
        )?;

        let threshold = self.waste.alert_threshold;
        if !(0.0..=100.0).contains(&threshold) {
            return Err(Error::validation(
                "waste.alertThreshold",
                format!("{threshold} is outside 0..=100"),
            ));
        }
        Ok(())
    }
}

fn decode<T: DeserializeOwned>(name: SectionName, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| Error::validation(name.as_str(), e.to_string()))
}

fn check_range(field: &str, value: u32, min: u32, max: u32) -> Result<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(Error::validation(
            field,
            format!("{value} is outside {min}..={max}"),
        ))
    }
}

fn default_roles() -> OpenMap {
    let roles = json!({
        "admin": { "permissions": ["all"] },
        "supervisor": {
            "permissions": ["view_centers", "view_reports", "manage_workers", "approve_schemes"]
        },
        "worker": {
            "permissions": ["manage_attendance", "manage_nutrition", "manage_health", "view_reports"]
        },
        "parent": { "permissions": ["view_child", "enroll_schemes"] }
    });
    match roles {
        Value::Object(map) => map,
        _ => OpenMap::new(),
    }
}

fn default_nutrition_standards() -> OpenMap {
    let standards = json!({
        "infant": { "ageMonths": "0-6", "calories": 500, "protein": 9 },
        "toddler": { "ageMonths": "7-36", "calories": 800, "protein": 13 },
        "preschool": { "ageMonths": "37-72", "calories": 1200, "protein": 18 },
        "pregnantWomen": { "calories": 2200, "protein": 55 },
        "lactatingMothers": { "calories": 2400, "protein": 63 }
    });
    match standards {
        Value::Object(map) => map,
        _ => OpenMap::new(),
    }
}
