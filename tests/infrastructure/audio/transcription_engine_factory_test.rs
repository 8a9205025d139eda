use deviation_analyzer::application::ports::TranscriptionError;
use deviation_analyzer::infrastructure::audio::TranscriptionEngineFactory;
use deviation_analyzer::presentation::config::{
    TranscriptionProviderSetting, TranscriptionSettings,
};

use crate::helpers::memory_store;

#[test]
fn given_openai_without_key_when_creating_then_configuration_error() {
    let settings = TranscriptionSettings::default();

    let result = TranscriptionEngineFactory::create(&settings, memory_store());

    assert!(matches!(result, Err(TranscriptionError::Configuration(_))));
}

#[test]
fn given_openai_with_key_when_creating_then_succeeds() {
    let settings = TranscriptionSettings {
        api_key: Some("sk-test".to_string()),
        ..Default::default()
    };

    assert!(TranscriptionEngineFactory::create(&settings, memory_store()).is_ok());
}

#[test]
fn given_azure_without_base_url_when_creating_then_configuration_error() {
    let settings = TranscriptionSettings {
        provider: TranscriptionProviderSetting::Azure,
        api_key: Some("key".to_string()),
        ..Default::default()
    };

    let result = TranscriptionEngineFactory::create(&settings, memory_store());

    assert!(matches!(result, Err(TranscriptionError::Configuration(_))));
}

#[test]
fn given_complete_azure_settings_when_creating_then_succeeds() {
    let settings = TranscriptionSettings {
        provider: TranscriptionProviderSetting::Azure,
        model: "whisper".to_string(),
        api_key: Some("key".to_string()),
        base_url: Some("https://example.openai.azure.com".to_string()),
        ..Default::default()
    };

    assert!(TranscriptionEngineFactory::create(&settings, memory_store()).is_ok());
}
