use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::state::Role;

/// Main configuration structure for Gymflow
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GymflowConfig {
    /// Workout studio API
    pub api: ApiConfig,
    /// Session timing
    pub session: SessionConfig,
    /// Observability settings
    pub observability: ObservabilityConfig,
    /// Signed-in account used by the CLI
    pub account: AccountConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL of the studio API, without the trailing `/workouts`
    pub base_url: String,
    /// Bearer token (can be set via GYMFLOW_API_TOKEN)
    pub token: Option<String>,
    pub timeout_seconds: u64,
    /// How long fetched workouts stay cached
    pub cache_ttl_seconds: u64,
    pub rate_limit: RateLimitConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    pub requests_per_second: u32,
    pub burst_capacity: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Seconds of countdown before the first exercise
    pub startup_countdown_seconds: u32,
    /// Real-time length of one tick; 1000 in production
    pub tick_interval_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level, overridden by RUST_LOG
    pub log_level: String,
    /// Emit JSON log lines instead of compact text
    pub json_logs: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AccountConfig {
    pub user_id: Option<String>,
    pub name: Option<String>,
    pub role: Role,
    pub company_name: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/api".to_string(),
            token: None, // Read from GYMFLOW_API_TOKEN when not configured
            timeout_seconds: 30,
            cache_ttl_seconds: 300,
            rate_limit: RateLimitConfig {
                requests_per_second: 10,
                burst_capacity: 20,
            },
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            startup_countdown_seconds: crate::session::DEFAULT_STARTUP_COUNTDOWN,
            tick_interval_ms: crate::scheduler::DEFAULT_TICK_INTERVAL.as_millis() as u64,
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            json_logs: false,
        }
    }
}

impl GymflowConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Default values
    /// 2. Configuration files (gymflow.toml, .gymflow-rc)
    /// 3. Environment variables (GYMFLOW_API__BASE_URL, GYMFLOW_SESSION__TICK_INTERVAL_MS, ...)
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new("."), None)
    }

    /// Same layering as [`GymflowConfig::load`], rooted at `dir`.
    ///
    /// `env` replaces the process environment when given.
    pub fn load_from(dir: &Path, env: Option<HashMap<String, String>>) -> Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        let toml_path = dir.join("gymflow.toml");
        if toml_path.exists() {
            builder = builder.add_source(File::from(toml_path));
        }

        let rc_path = dir.join(".gymflow-rc");
        if rc_path.exists() {
            builder = builder.add_source(File::from(rc_path).format(config::FileFormat::Toml));
        }

        let token_override = match &env {
            Some(vars) => vars.get("GYMFLOW_API_TOKEN").cloned(),
            None => std::env::var("GYMFLOW_API_TOKEN").ok(),
        };

        builder = builder.add_source(
            Environment::with_prefix("GYMFLOW")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let mut gymflow_config: GymflowConfig = builder.build()?.try_deserialize()?;

        if gymflow_config.api.token.is_none() {
            gymflow_config.api.token = token_override.filter(|t| !t.trim().is_empty());
        }

        Ok(gymflow_config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let toml_content = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_content)?;
        Ok(())
    }

    /// Load .env file if it exists
    pub fn load_env_file() -> Result<()> {
        if Path::new(".env").exists() {
            dotenvy::dotenv()?;
            tracing::info!("Loaded environment variables from .env file");
        }
        Ok(())
    }
}

/// Global configuration instance
static CONFIG: std::sync::LazyLock<Result<GymflowConfig, anyhow::Error>> =
    std::sync::LazyLock::new(|| {
        let _ = GymflowConfig::load_env_file();
        GymflowConfig::load()
    });

/// Get the global configuration
pub fn config() -> Result<&'static GymflowConfig> {
    CONFIG
        .as_ref()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))
}

/// Initialize configuration (called at startup)
pub fn init_config() -> Result<()> {
    let _config = config()?;
    tracing::debug!("Configuration loaded successfully");
    Ok(())
}
