//! API Configuration Module
//!
//! Configuration for CORS and request deadlines, loaded from environment
//! variables with sensible defaults for development.

use std::time::Duration;

// ============================================================================
// API CONFIGURATION
// ============================================================================

/// API configuration for CORS and exchange deadlines.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Allowed CORS origins (comma-separated in env var).
    /// Empty means allow all origins (dev mode).
    pub cors_origins: Vec<String>,

    /// Max age for CORS preflight cache in seconds.
    pub cors_max_age_secs: u64,

    /// Overall deadline for one chat exchange, covering every model call
    /// and tool execution within it.
    pub chat_timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            // CORS defaults: permissive for development
            cors_origins: Vec::new(), // Empty = allow all
            cors_max_age_secs: 86400, // 24 hours
            chat_timeout: Duration::from_secs(60),
        }
    }
}

impl ApiConfig {
    /// Create ApiConfig from environment variables.
    ///
    /// Environment variables:
    /// - `FLIGHTDECK_CORS_ORIGINS`: Comma-separated allowed origins (empty = allow all)
    /// - `FLIGHTDECK_CORS_MAX_AGE_SECS`: Preflight cache duration (default: 86400)
    /// - `FLIGHTDECK_CHAT_TIMEOUT_SECS`: Whole-exchange deadline (default: 60)
    pub fn from_env() -> Self {
        let cors_origins = std::env::var("FLIGHTDECK_CORS_ORIGINS")
            .ok()
            .map(|s| {
                s.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let cors_max_age_secs = std::env::var("FLIGHTDECK_CORS_MAX_AGE_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(86400);

        let chat_timeout = Duration::from_secs(
            std::env::var("FLIGHTDECK_CHAT_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(60),
        );

        Self {
            cors_origins,
            cors_max_age_secs,
            chat_timeout,
        }
    }

    /// Check if running in production mode (strict CORS).
    pub fn is_production(&self) -> bool {
        !self.cors_origins.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ApiConfig::default();
        assert!(config.cors_origins.is_empty());
        assert_eq!(config.cors_max_age_secs, 86400);
        assert_eq!(config.chat_timeout, Duration::from_secs(60));
        assert!(!config.is_production());
    }

    #[test]
    fn test_production_mode_detection() {
        let mut config = ApiConfig::default();
        config.cors_origins = vec!["https://flightdeck.example".to_string()];
        assert!(config.is_production());
    }
}
