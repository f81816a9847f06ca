use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use jsonwebtoken::Algorithm;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
    pub grpc_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub algorithm: String,
    pub access_token_expire_minutes: i64,
    pub refresh_token_expire_days: i64,
}

impl JwtConfig {
    const MIN_SECRET_BYTES: usize = 32;
    const MAX_ACCESS_MINUTES: i64 = 24 * 60;
    const MAX_REFRESH_DAYS: i64 = 30;

    /// Validate the JWT section and resolve the signing algorithm.
    ///
    /// Rejects secrets below 32 bytes, lifetimes outside their bounds, and
    /// algorithms outside the HMAC whitelist.
    pub fn validate(&self) -> Result<Algorithm, ConfigError> {
        if self.secret.len() < Self::MIN_SECRET_BYTES {
            return Err(ConfigError::Message(format!(
                "jwt.secret must be at least {} bytes, got {}",
                Self::MIN_SECRET_BYTES,
                self.secret.len()
            )));
        }

        if !(1..=Self::MAX_ACCESS_MINUTES).contains(&self.access_token_expire_minutes) {
            return Err(ConfigError::Message(format!(
                "jwt.access_token_expire_minutes must be within 1..={}, got {}",
                Self::MAX_ACCESS_MINUTES,
                self.access_token_expire_minutes
            )));
        }

        if !(1..=Self::MAX_REFRESH_DAYS).contains(&self.refresh_token_expire_days) {
            return Err(ConfigError::Message(format!(
                "jwt.refresh_token_expire_days must be within 1..={}, got {}",
                Self::MAX_REFRESH_DAYS,
                self.refresh_token_expire_days
            )));
        }

        match self.algorithm.as_str() {
            "HS256" => Ok(Algorithm::HS256),
            "HS384" => Ok(Algorithm::HS384),
            "HS512" => Ok(Algorithm::HS512),
            other => Err(ConfigError::Message(format!(
                "jwt.algorithm must be one of HS256, HS384, HS512, got {}",
                other
            ))),
        }
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        // Invalid JWT settings must fail startup, not the first request
        config.jwt.validate()?;

        Ok(config)
    }
}
