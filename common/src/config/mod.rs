mod content_provider;
mod manager;
mod serializer;

pub use content_provider::{ConfigContentProvider, FileContentConfigProvider, MemoryContentConfigProvider};
pub use manager::ConfigManager;
pub use serializer::{ConfigSerializer, YamlConfigSerializer};

/// Range checks a config must pass before it is used or written.
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}
