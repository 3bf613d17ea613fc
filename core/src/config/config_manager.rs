use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use super::{ConfigContentProvider, FileContentConfigProvider, Validate};

/// Lazily loads a YAML config through a content provider and caches it.
/// A missing config source yields the type's defaults.
pub struct ConfigManager<TProvider, TConfig>
where
    TProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    content_provider: TProvider,
    config: Arc<Mutex<Option<TConfig>>>,
}

impl<TConfig> ConfigManager<FileContentConfigProvider, TConfig>
where
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    pub fn from_yaml_file(file_path: &str) -> Self {
        Self::new(FileContentConfigProvider::new(file_path.to_string()))
    }
}

impl<TProvider, TConfig> ConfigManager<TProvider, TConfig>
where
    TProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    pub fn new(content_provider: TProvider) -> Self {
        Self {
            content_provider,
            config: Arc::new(Mutex::new(None)),
        }
    }

    pub fn get_config(&self) -> Result<TConfig, String> {
        let mut current = self.config.lock().unwrap();

        if let Some(config) = current.as_ref() {
            return Ok(config.clone());
        }

        let Some(content) = self.content_provider.get_config_content()? else {
            return Ok(TConfig::default());
        };

        let config: TConfig = serde_yaml_ng::from_str(&content)
            .map_err(|e| format!("Failed to deserialize config: {}", e))?;
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        *current = Some(config.clone());
        Ok(config)
    }

    pub fn set_config(&self, config: &TConfig) -> Result<(), String> {
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        let content = serde_yaml_ng::to_string(config)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;
        self.content_provider.set_config_content(&content)?;

        let mut current = self.config.lock().unwrap();
        *current = Some(config.clone());
        Ok(())
    }
}
