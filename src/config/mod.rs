//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, ClassifierConfig, Environment, LogFormat, LoggingConfig, MetricsConfig,
    ServerConfig, StorageConfig,
};
