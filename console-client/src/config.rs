use serde::{Deserialize, Serialize};
use snake_common::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use snake_common::games::snake::SnakeConfig;
use snake_common::Username;

pub const DEFAULT_CONFIG_FILE_NAME: &str = "snake_console.yaml";

pub fn get_config_manager(
    path: &str,
) -> ConfigManager<FileContentConfigProvider, ConsoleConfig, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(path)
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Default)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub snake: SnakeConfig,
}

impl Validate for ConsoleConfig {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref name) = self.username {
            Username::parse(name)?;
        }
        self.snake.validate()
    }
}

impl ConsoleConfig {
    /// The command line wins over the config file.
    pub fn resolve_username(&self, from_args: Option<&str>) -> Result<Username, String> {
        match from_args.or(self.username.as_deref()) {
            Some(name) => Username::parse(name),
            None => Err("No username given: pass --username or set `username` in the config".to_string()),
        }
    }
}
