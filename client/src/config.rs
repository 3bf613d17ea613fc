use std::time::Duration;

use serde::{Deserialize, Serialize};

use tictactoe_core::config::{ConfigManager, Validate};
use tictactoe_core::game::{FirstPlayerMode, GameMode};
use tictactoe_core::session::SessionSettings;

const MAX_AI_MOVE_DELAY_MS: u64 = 10_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub mode: GameMode,
    pub first_player: FirstPlayerMode,
    pub ai_move_delay_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::PlayerVsPlayer,
            first_player: FirstPlayerMode::Host,
            ai_move_delay_ms: 500,
        }
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<(), String> {
        if self.ai_move_delay_ms > MAX_AI_MOVE_DELAY_MS {
            return Err(format!(
                "ai_move_delay_ms ({}) cannot exceed {}",
                self.ai_move_delay_ms, MAX_AI_MOVE_DELAY_MS
            ));
        }
        Ok(())
    }
}

impl ClientConfig {
    pub fn session_settings(&self, mode: GameMode) -> SessionSettings {
        SessionSettings {
            mode,
            first_player: self.first_player,
            ai_move_delay: Duration::from_millis(self.ai_move_delay_ms),
        }
    }
}

pub fn load_config(path: &str) -> Result<ClientConfig, String> {
    let manager: ConfigManager<_, ClientConfig> = ConfigManager::from_yaml_file(path);
    manager
        .get_config()
        .map_err(|e| format!("Failed to load config from {}: {}", path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ClientConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.mode, GameMode::PlayerVsPlayer);
        assert_eq!(config.first_player, FirstPlayerMode::Host);
        assert_eq!(config.ai_move_delay_ms, 500);
    }

    #[test]
    fn test_excessive_delay_is_rejected() {
        let config = ClientConfig {
            ai_move_delay_ms: 60_000,
            ..ClientConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_session_settings_use_the_requested_mode() {
        let config = ClientConfig {
            ai_move_delay_ms: 250,
            ..ClientConfig::default()
        };

        let settings = config.session_settings(GameMode::PlayerVsAi);
        assert_eq!(settings.mode, GameMode::PlayerVsAi);
        assert_eq!(settings.ai_move_delay, Duration::from_millis(250));
    }
}
