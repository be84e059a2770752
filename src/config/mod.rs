// Configuration loading: a flat INI-style file mapped onto typed settings.

pub mod ini;
pub mod settings;

pub use ini::IniFile;
pub use settings::{AppConfig, CrawlerConfig, DatabaseConfig, LoggingConfig, ServerConfig};
