//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Session configuration.
    #[serde(default)]
    pub session: SessionConfig,
}

/// Session store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Hard bound on profile resolution, in seconds.
    #[serde(default = "default_profile_timeout")]
    pub profile_timeout_secs: u64,
    /// Email granted the admin role when its profile has to be synthesized.
    #[serde(default = "default_bootstrap_admin_email")]
    pub bootstrap_admin_email: String,
    /// Key prefix under which session tokens are persisted locally.
    #[serde(default = "default_token_key_prefix")]
    pub token_key_prefix: String,
}

fn default_profile_timeout() -> u64 {
    8
}

fn default_bootstrap_admin_email() -> String {
    "admin@financeapp.com".to_string()
}

fn default_token_key_prefix() -> String {
    "kasbook-auth".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            profile_timeout_secs: default_profile_timeout(),
            bootstrap_admin_email: default_bootstrap_admin_email(),
            token_key_prefix: default_token_key_prefix(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("KASBOOK").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
