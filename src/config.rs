use std::env;

use crate::chart::layout::{ChartLayout, MARGIN};

#[derive(Debug, Clone)]
pub enum Deployment {
    Local,
    Dev,
    Stage,
    Prod,
}

impl Deployment {
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Self::Dev,
            "stage" | "staging" => Self::Stage,
            "prod" | "production" => Self::Prod,
            _ => Self::Local,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    // Data endpoint
    pub data_base_url: String,
    pub debug_mode: bool,
    pub fetch_timeout_seconds: u64,

    // Chart frame
    pub frame_width: u32,
    pub frame_height: u32,
    pub transition_ms: u64,

    // API settings
    pub api_host: String,
    pub api_port: u16,

    // Caching
    pub cache_ttl_seconds: u64,
    pub cache_max_entries: u64,

    // Application metadata
    pub deployment: Deployment,
}

/// Read `key` from the environment, falling back to `default` when unset or unparseable.
fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Parse an on/off setting: `true`/`1`/`yes`/`on` or `false`/`0`/`no`/`off`, any case.
#[must_use]
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Read an on/off setting from the environment, falling back to `default` when unset or unrecognised.
fn env_flag(key: &str, default: bool) -> bool {
    env::var(key)
        .ok()
        .and_then(|v| parse_flag(&v))
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidFrame` if the frame is too small to hold the plot area.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = Self {
            // Data endpoint
            data_base_url: env::var("DATA_BASE_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:5000".to_string()),
            debug_mode: env_flag("CHART_DEBUG", false),
            fetch_timeout_seconds: env_or("FETCH_TIMEOUT_SECONDS", 30),

            // Chart frame
            frame_width: env_or("FRAME_WIDTH", 600),
            frame_height: env_or("FRAME_HEIGHT", 480),
            transition_ms: env_or("TRANSITION_MS", 500),

            // API settings
            api_host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            api_port: env_or("API_PORT", 3000),

            // Caching
            cache_ttl_seconds: env_or("CACHE_TTL_SECONDS", 300),
            cache_max_entries: env_or("CACHE_MAX_ENTRIES", 256),

            // Application metadata
            deployment: Deployment::from_str(
                &env::var("DEPLOYMENT").unwrap_or_else(|_| "local".to_string()),
            ),
        };

        config.layout()?;
        Ok(config)
    }

    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }

    /// Chart geometry derived from the frame settings and the fixed margins.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidFrame` when the margins leave no plot area.
    pub fn layout(&self) -> Result<ChartLayout, ConfigError> {
        ChartLayout::new(
            self.frame_width,
            self.frame_height,
            MARGIN,
            self.transition_ms,
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid chart frame {width}x{height}: margins leave no plot area")]
    InvalidFrame { width: u32, height: u32 },
}
