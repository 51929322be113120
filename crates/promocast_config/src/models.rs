// --- File: crates/promocast_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8086,
        }
    }
}

/// Importance level of the notification channel.
///
/// Mirrors the platform importance scale; `Default` is what ordinary
/// promotional pushes use.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ChannelImportance {
    Min,
    Low,
    #[default]
    Default,
    High,
}

// --- Messaging Config ---
// Everything the composer and setup need; every field has a default so an
// empty config file is valid.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MessagingConfig {
    #[serde(default = "default_channel_id")]
    pub channel_id: String,
    #[serde(default = "default_channel_name")]
    pub channel_name: String,
    #[serde(default)]
    pub channel_importance: ChannelImportance,
    #[serde(default = "default_topic")]
    pub default_topic: String,
    /// `{package}` is replaced with the target app identifier.
    #[serde(default = "default_store_url_template")]
    pub store_url_template: String,
    #[serde(default = "default_image_timeout_secs")]
    pub image_timeout_secs: u64,
    /// Largest image body accepted, in bytes.
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: u64,
}

fn default_channel_id() -> String {
    "promocast_default".to_string()
}

fn default_channel_name() -> String {
    "Promotions".to_string()
}

fn default_topic() -> String {
    "all".to_string()
}

fn default_store_url_template() -> String {
    "https://play.google.com/store/apps/details?id={package}".to_string()
}

fn default_image_timeout_secs() -> u64 {
    30
}

fn default_max_image_bytes() -> u64 {
    5 * 1024 * 1024
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            channel_id: default_channel_id(),
            channel_name: default_channel_name(),
            channel_importance: ChannelImportance::default(),
            default_topic: default_topic(),
            store_url_template: default_store_url_template(),
            image_timeout_secs: default_image_timeout_secs(),
            max_image_bytes: default_max_image_bytes(),
        }
    }
}

// --- Firebase Config ---
// Service account key is read from `key_path` unless a pre-issued
// `access_token` is given; the registration token is the device token whose
// topic relations are managed.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct FirebaseConfig {
    pub key_path: Option<String>,
    pub access_token: Option<String>,
    pub registration_token: Option<String>,
}

// --- Installed Apps ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct InstalledApp {
    pub package: String,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    pub launch_activity: Option<String>,
}

fn enabled_by_default() -> bool {
    true
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub messaging: MessagingConfig,

    #[serde(default)]
    pub firebase: Option<FirebaseConfig>,

    #[serde(default)]
    pub apps: Vec<InstalledApp>,
}
