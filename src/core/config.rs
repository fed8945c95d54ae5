//! Configuration management

use config::{Config as ConfigBuilder, ConfigError as BuilderError, Environment, File};
use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid server configuration: {0}")]
    InvalidServer(String),

    #[error("Invalid database configuration: {0}")]
    InvalidDatabase(String),

    #[error("Invalid logging configuration: {0}")]
    InvalidLogging(String),

    #[error("Invalid security configuration: {0}")]
    InvalidSecurity(String),

    #[error("Invalid storage configuration: {0}")]
    InvalidStorage(String),

    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Configuration file not found: {0}")]
    FileNotFound(String),
}

impl From<BuilderError> for ConfigError {
    fn from(err: BuilderError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub security: SecurityConfig,
    pub storage: StorageConfig,
}

impl Config {
    /// Load configuration with precedence: CLI args > Environment variables > Config file > Defaults
    pub fn load() -> Result<Self, ConfigError> {
        let cli_args = CliArgs::parse();

        let mut builder = Self::builder_with_defaults()?;

        // Load from config file if specified
        if let Some(config_path) = &cli_args.config {
            if !config_path.exists() {
                return Err(ConfigError::FileNotFound(
                    config_path.display().to_string(),
                ));
            }
            builder = builder.add_source(File::from(config_path.as_path()));
        }

        // Environment variables are prefixed with KICKS_ and use __ for nesting
        // Example: KICKS_SERVER__PORT=8080
        builder = builder.add_source(
            Environment::with_prefix("KICKS")
                .separator("__")
                .try_parsing(true),
        );

        // CLI arguments take the highest priority
        if let Some(host) = &cli_args.host {
            builder = builder.set_override("server.host", host.clone())?;
        }
        if let Some(port) = cli_args.port {
            builder = builder.set_override("server.port", port)?;
        }
        if let Some(db_path) = &cli_args.database {
            builder = builder.set_override("database.path", db_path.display().to_string())?;
        }
        if let Some(upload_dir) = &cli_args.upload_dir {
            builder =
                builder.set_override("storage.upload_dir", upload_dir.display().to_string())?;
        }
        if let Some(log_level) = &cli_args.log_level {
            builder = builder.set_override("logging.level", log_level.clone())?;
        }

        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a specific file path
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let config: Config = Self::builder_with_defaults()?
            .add_source(File::from(path))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    fn builder_with_defaults(
    ) -> Result<config::builder::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        let builder = ConfigBuilder::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3004)?
            .set_default("database.path", "./data/kicks-admin.db")?
            .set_default("database.connection_pool_size", 10)?
            .set_default("database.busy_timeout", 5000)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "text")?
            .set_default("logging.output", "stdout")?
            .set_default("security.jwt_secret", "change-this-secret-in-production")?
            .set_default("security.token_ttl_secs", 3600)?
            .set_default("security.allowed_origins", vec!["*"])?
            .set_default("storage.upload_dir", "./uploads")?;
        Ok(builder)
    }

    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.database.validate()?;
        self.logging.validate()?;
        self.security.validate()?;
        self.storage.validate()?;
        Ok(())
    }
}

/// Command-line arguments for configuration override
#[derive(Debug, Parser)]
#[command(name = "kicks-admin")]
#[command(about = "Kicks Admin Backend Server", long_about = None)]
pub struct CliArgs {
    /// Path to configuration file (TOML format)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Server host address
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Server port
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Database file path
    #[arg(short, long, value_name = "PATH")]
    pub database: Option<PathBuf>,

    /// Upload directory path
    #[arg(long, value_name = "DIR")]
    pub upload_dir: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.is_empty() {
            return Err(ConfigError::InvalidServer("host cannot be empty".to_string()));
        }

        if self.port == 0 {
            return Err(ConfigError::InvalidServer(
                "port must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub path: PathBuf,
    pub connection_pool_size: usize,
    pub busy_timeout: u64, // milliseconds
}

impl DatabaseConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidDatabase("path cannot be empty".to_string()));
        }

        if self.connection_pool_size == 0 {
            return Err(ConfigError::InvalidDatabase(
                "connection_pool_size must be greater than 0".to_string(),
            ));
        }

        if self.busy_timeout == 0 {
            return Err(ConfigError::InvalidDatabase(
                "busy_timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub output: String,
    pub log_file: Option<PathBuf>,
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let valid_levels = ["debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.level.as_str()) {
            return Err(ConfigError::InvalidLogging(format!(
                "level must be one of: {:?}",
                valid_levels
            )));
        }

        let valid_formats = ["json", "text"];
        if !valid_formats.contains(&self.format.as_str()) {
            return Err(ConfigError::InvalidLogging(format!(
                "format must be one of: {:?}",
                valid_formats
            )));
        }

        let valid_outputs = ["stdout", "file"];
        if !valid_outputs.contains(&self.output.as_str()) {
            return Err(ConfigError::InvalidLogging(format!(
                "output must be one of: {:?}",
                valid_outputs
            )));
        }

        if self.output == "file" && self.log_file.is_none() {
            return Err(ConfigError::InvalidLogging(
                "log_file must be specified when output is 'file'".to_string(),
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub token_ttl_secs: i64,
    pub allowed_origins: Vec<String>,
}

impl SecurityConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.is_empty() {
            return Err(ConfigError::InvalidSecurity(
                "jwt_secret cannot be empty".to_string(),
            ));
        }

        if self.token_ttl_secs <= 0 {
            return Err(ConfigError::InvalidSecurity(
                "token_ttl_secs must be greater than 0".to_string(),
            ));
        }

        if self.allowed_origins.is_empty() {
            return Err(ConfigError::InvalidSecurity(
                "allowed_origins cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub upload_dir: PathBuf,
}

impl StorageConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.upload_dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidStorage(
                "upload_dir cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3004,
            },
            database: DatabaseConfig {
                path: PathBuf::from("./data/test.db"),
                connection_pool_size: 5,
                busy_timeout: 5000,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "text".to_string(),
                output: "stdout".to_string(),
                log_file: None,
            },
            security: SecurityConfig {
                jwt_secret: "test-secret".to_string(),
                token_ttl_secs: 3600,
                allowed_origins: vec!["*".to_string()],
            },
            storage: StorageConfig {
                upload_dir: PathBuf::from("./uploads"),
            },
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(test_config().validate().is_ok());
    }

    #[test]
    fn test_invalid_port() {
        let mut config = test_config();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_jwt_secret() {
        let mut config = test_config();
        config.security.jwt_secret = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_positive_token_ttl() {
        let mut config = test_config();
        config.security.token_ttl_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = test_config();
        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_file_output_requires_log_file() {
        let mut config = test_config();
        config.logging.output = "file".to_string();
        config.logging.log_file = None;
        assert!(config.validate().is_err());
    }
}
