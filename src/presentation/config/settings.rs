use config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::application::services::{DispatchPolicy, PromptOptions};

use super::Environment;

/// Typed service configuration.
///
/// Sources, later ones winning: built-in defaults, optional
/// `appsettings.{environment}` file, `APP_` prefixed environment variables
/// with `__` between nesting levels (e.g. `APP_SERVER__PORT=8080`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub storage: StorageSettings,
    pub transcription: TranscriptionSettings,
    pub vision: VisionSettings,
    pub llm: LlmSettings,
    pub logging: LoggingSettings,
    pub analysis: AnalysisSettings,
}

impl Settings {
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(&environment.settings_file()).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// When set, `/api` routes other than media downloads require `X-API-Key`.
    pub api_key: Option<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageProviderSetting {
    Local,
    Memory,
    Azure,
    Gcs,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub provider: StorageProviderSetting,
    pub local_path: String,
    pub azure_account: Option<String>,
    pub azure_access_key: Option<String>,
    pub azure_container: Option<String>,
    pub gcs_bucket: Option<String>,
    pub gcs_service_account_path: Option<String>,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            provider: StorageProviderSetting::Local,
            local_path: "./data".to_string(),
            azure_account: None,
            azure_access_key: None,
            azure_container: None,
            gcs_bucket: None,
            gcs_service_account_path: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptionProviderSetting {
    #[serde(rename = "openai")]
    OpenAi,
    Azure,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TranscriptionSettings {
    pub provider: TranscriptionProviderSetting,
    /// Whisper model, or the deployment name for Azure.
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub api_version: Option<String>,
    pub language: Option<String>,
}

impl Default for TranscriptionSettings {
    fn default() -> Self {
        Self {
            provider: TranscriptionProviderSetting::OpenAi,
            model: "whisper-1".to_string(),
            api_key: None,
            base_url: None,
            api_version: None,
            language: Some("en".to_string()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VisionSettings {
    pub base_url: String,
    pub model: String,
    /// Falls back to the llm key when unset.
    pub api_key: Option<String>,
    pub max_tokens: usize,
}

impl Default for VisionSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key: None,
            max_tokens: 1024,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    /// `openai`, `azure` or `compatible`.
    pub provider: String,
    pub api_key: String,
    pub chat_model: String,
    pub base_url: Option<String>,
    pub azure_endpoint: Option<String>,
    pub azure_api_version: Option<String>,
    pub max_tokens: usize,
    pub temperature: f32,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            api_key: String::new(),
            chat_model: "gpt-4o-mini".to_string(),
            base_url: None,
            azure_endpoint: None,
            azure_api_version: None,
            max_tokens: 1024,
            temperature: 0.2,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info,deviation_analyzer=debug,tower_http=debug".to_string(),
            enable_json: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    pub dispatch: DispatchPolicy,
    pub repeat_transcripts_in_photo_evidence: bool,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            dispatch: DispatchPolicy::Unbounded,
            repeat_transcripts_in_photo_evidence: true,
        }
    }
}

impl AnalysisSettings {
    pub fn prompt_options(&self) -> PromptOptions {
        PromptOptions {
            repeat_transcripts_in_photo_evidence: self.repeat_transcripts_in_photo_evidence,
        }
    }
}
