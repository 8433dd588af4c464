//! HR service configuration.

use std::env;

use thiserror::Error;

use common::{DatabaseConfig, JwtConfig, ServiceConfig, StorageConfig};
use domain::MIN_JWT_SECRET_LENGTH;

/// Secret used when `JWT_SECRET` is unset in development.
const DEV_JWT_SECRET: &str = "dev-secret-key-minimum-32-chars!!";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable must be set outside development")]
    Missing(&'static str),

    #[error("JWT_SECRET must be at least {} characters long", MIN_JWT_SECRET_LENGTH)]
    WeakJwtSecret,
}

/// HR service configuration.
#[derive(Clone, Default)]
pub struct HrServiceConfig {
    pub service: ServiceConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub storage: StorageConfig,
    /// Expected value of the `x-api-key` header outside development
    pub api_key: Option<String>,
}

impl std::fmt::Debug for HrServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HrServiceConfig")
            .field("service", &self.service)
            .field("database_url", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiration_hours", &self.jwt.expiration_hours)
            .field("storage_bucket", &self.storage.bucket)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl HrServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let service = ServiceConfig {
            host: env::var("HOST").unwrap_or(defaults.service.host),
            port: parse_var("PORT").unwrap_or(defaults.service.port),
            app_env: env::var("APP_ENV").unwrap_or(defaults.service.app_env),
            ..defaults.service
        };
        let development = service.is_development();

        let secret = match env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) if development => {
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                DEV_JWT_SECRET.to_string()
            }
            Err(_) => return Err(ConfigError::Missing("JWT_SECRET")),
        };
        if secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(ConfigError::WeakJwtSecret);
        }

        let api_key = env::var("API_KEY").ok().filter(|key| !key.is_empty());
        if api_key.is_none() && !development {
            return Err(ConfigError::Missing("API_KEY"));
        }

        Ok(Self {
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").unwrap_or(defaults.database.url),
                max_connections: parse_var("DATABASE_MAX_CONNECTIONS")
                    .unwrap_or(defaults.database.max_connections),
                min_connections: parse_var("DATABASE_MIN_CONNECTIONS")
                    .unwrap_or(defaults.database.min_connections),
            },
            jwt: JwtConfig {
                secret,
                expiration_hours: parse_var("JWT_EXPIRATION_HOURS")
                    .unwrap_or(defaults.jwt.expiration_hours),
                issuer: env::var("JWT_ISSUER").unwrap_or(defaults.jwt.issuer),
                audience: env::var("JWT_AUDIENCE").unwrap_or(defaults.jwt.audience),
            },
            storage: StorageConfig {
                region: env::var("AWS_REGION").unwrap_or(defaults.storage.region),
                bucket: env::var("AWS_S3_BUCKET").unwrap_or(defaults.storage.bucket),
                access_key_id: env::var("AWS_ACCESS_KEY_ID").unwrap_or_default(),
                secret_access_key: env::var("AWS_SECRET_ACCESS_KEY").unwrap_or_default(),
                endpoint: env::var("AWS_S3_ENDPOINT").ok(),
                public_url: env::var("AWS_S3_PUBLIC_URL").ok(),
            },
            service,
            api_key,
        })
    }

    /// The API key layer is mounted only when this returns a key.
    pub fn required_api_key(&self) -> Option<&str> {
        if self.service.is_development() {
            None
        } else {
            self.api_key.as_deref()
        }
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.service.host, self.service.port)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}
