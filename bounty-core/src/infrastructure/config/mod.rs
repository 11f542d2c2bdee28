pub mod loader;
pub mod types;

pub use loader::{load_config, load_config_with_profile};
pub use types::{AppConfig, HttpConfig, LedgerConfig, TrackerConfig};
