/// Configuration management for post-service
///
/// All settings come from environment variables; `main` loads a `.env` file
/// first when one is present.
use db_pool::env_utils::parse_env_with_default;
use db_pool::DbConfig;
use std::str::FromStr;

const SERVICE_NAME: &str = "post-service";

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Store backend configuration
    pub store: StoreConfig,
}

/// Application settings
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
    /// Number of HTTP worker threads
    pub workers: usize,
}

/// CORS configuration
#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins
    pub allowed_origins: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Postgres,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            other => Err(format!(
                "Unknown STORE_BACKEND '{}': expected 'memory' or 'postgres'",
                other
            )),
        }
    }
}

/// Store backend configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// User names inserted at startup (memory backend only)
    pub seed_users: Vec<String>,
    /// Pool settings (postgres backend only)
    pub database: DbConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let is_production = app_env.eq_ignore_ascii_case("production");

        let allowed_origins = match std::env::var("CORS_ALLOWED_ORIGINS") {
            Ok(value) => value,
            Err(_) if is_production => {
                return Err("CORS_ALLOWED_ORIGINS must be set in production".to_string())
            }
            Err(_) => "*".to_string(),
        };
        if is_production && allowed_origins.trim() == "*" {
            return Err("CORS_ALLOWED_ORIGINS cannot be '*' in production".to_string());
        }

        let backend = match std::env::var("STORE_BACKEND") {
            Ok(value) => value.parse()?,
            Err(_) => StoreBackend::Memory,
        };
        let database = DbConfig::from_env(SERVICE_NAME);
        if backend == StoreBackend::Postgres && database.database_url.is_empty() {
            return Err("DATABASE_URL must be set when STORE_BACKEND=postgres".to_string());
        }

        Ok(Config {
            app: AppConfig {
                env: app_env,
                host: std::env::var("POST_SERVICE_HOST")
                    .unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_with_default("POST_SERVICE_PORT", 5000),
                workers: parse_env_with_default("HTTP_WORKERS", 4),
            },
            cors: CorsConfig { allowed_origins },
            store: StoreConfig {
                backend,
                seed_users: parse_seed_users(),
                database,
            },
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.app.host, self.app.port)
    }
}

fn parse_seed_users() -> Vec<String> {
    std::env::var("SEED_USERS")
        .map(|raw| {
            raw.split(',')
                .map(|name| name.trim())
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
