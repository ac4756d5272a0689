use std::time::Duration;

use axum::http::HeaderValue;
use config::{
    Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState,
};
use foerdercheck_application::AuthFlowSettings;
use secrecy::Secret;
use serde::Deserialize;

pub const ENV_PREFIX: &str = "FOERDERCHECK";
const DEFAULT_CONFIG_FILE: &str = "config/default";

/// Runtime configuration.
///
/// Values are read from an optional `config/default.*` file and then from
/// environment variables such as `FOERDERCHECK__AUTH__JWT_SECRET`.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub auth: AuthSettings,
    pub frontend_url: String,
    pub database: Option<DatabaseSettings>,
    pub redis: Option<RedisSettings>,
    pub supabase: SupabaseSettings,
    pub email_client: Option<EmailClientSettings>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub address: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub jwt_secret: Secret<String>,
    pub verification_ttl_seconds: i64,
    pub login_ttl_seconds: i64,
    pub session_ttl_seconds: i64,
    pub allowed_origins: AllowedOrigins,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: Secret<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedisSettings {
    pub host_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SupabaseSettings {
    pub base_url: String,
    pub service_role_key: Secret<String>,
    pub timeout_millis: u64,
}

impl SupabaseSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_millis)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailClientSettings {
    pub base_url: String,
    pub sender: String,
    pub auth_token: Secret<String>,
    pub timeout_millis: u64,
}

impl EmailClientSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_millis)
    }
}

/// Origins permitted by the CORS layer.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct AllowedOrigins(Vec<String>);

impl AllowedOrigins {
    pub fn new(origins: Vec<String>) -> Self {
        Self(origins)
    }

    pub fn contains(&self, origin: &HeaderValue) -> bool {
        origin
            .to_str()
            .map(|origin| self.0.iter().any(|allowed| allowed == origin))
            .unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::builder()?
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("auth.allowed_origins")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    fn builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Ok(Config::builder()
            .set_default("server.address", "0.0.0.0:8000")?
            .set_default("auth.verification_ttl_seconds", 86_400_i64)?
            .set_default("auth.login_ttl_seconds", 3_600_i64)?
            .set_default("auth.session_ttl_seconds", 86_400_i64)?
            .set_default("auth.allowed_origins", vec!["http://localhost:3000"])?
            .set_default("frontend_url", "http://localhost:3000")?
            .set_default("supabase.timeout_millis", 10_000_i64)?
            .add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false)))
    }

    /// Token lifetimes and link base handed to the auth flow.
    pub fn auth_flow_settings(&self) -> AuthFlowSettings {
        AuthFlowSettings {
            verification_ttl: chrono::Duration::seconds(self.auth.verification_ttl_seconds),
            login_ttl: chrono::Duration::seconds(self.auth.login_ttl_seconds),
            session_ttl: chrono::Duration::seconds(self.auth.session_ttl_seconds),
            frontend_url: self.frontend_url.trim_end_matches('/').to_owned(),
        }
    }
}
