mod content_provider;
mod manager;
mod serializer;
mod simulation_config;

pub use content_provider::{ConfigContentProvider, FileContentConfigProvider, MemoryContentProvider};
pub use manager::ConfigManager;
pub use serializer::{ConfigSerializer, YamlConfigSerializer};
pub use simulation_config::{SimulationConfig, SpawnConfig};

pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}
