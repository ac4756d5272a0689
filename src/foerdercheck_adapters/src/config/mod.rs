pub mod settings;

pub use settings::{
    AllowedOrigins, AuthSettings, DatabaseSettings, EmailClientSettings, RedisSettings,
    ServerSettings, Settings, SupabaseSettings,
};
