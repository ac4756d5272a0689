use std::sync::Arc;

use color_eyre::eyre::Result;
use foerdercheck::{
    AppService, AuthFlow, BearerTokenValidator, EligibilityRecordStore, Email, EmailClient,
    HashMapEligibilityRecordStore, HashSetVerifiedEmailRegistry, JwtTokenCodec, MockEmailClient,
    PostmarkEmailClient, RedisVerifiedEmailRegistry, SupabaseProvisioningGateway,
    VerifiedEmailRegistry, adapters::config::Settings, configure_postgresql, configure_redis,
};
use reqwest::Client as HttpClient;
use secrecy::ExposeSecret;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    // Load configuration
    let config = Settings::load()?;

    // Tokens
    let codec = JwtTokenCodec::new(config.auth.jwt_secret.clone());
    let validator = BearerTokenValidator::new(Arc::new(codec.clone()));

    // Verified email registry: Redis when configured, otherwise in memory
    let registry: Arc<dyn VerifiedEmailRegistry> = match &config.redis {
        Some(redis) => {
            let conn = configure_redis(&redis.host_name)?;
            Arc::new(RedisVerifiedEmailRegistry::new(conn))
        }
        None => {
            tracing::warn!("No Redis configured, verified emails are kept in memory");
            Arc::new(HashSetVerifiedEmailRegistry::new())
        }
    };

    // Record store: PostgreSQL when configured, otherwise in memory
    let record_store: Arc<dyn EligibilityRecordStore> = match &config.database {
        Some(database) => Arc::new(configure_postgresql(database.url.expose_secret()).await?),
        None => {
            tracing::warn!("No database configured, document checks are kept in memory");
            Arc::new(HashMapEligibilityRecordStore::new())
        }
    };

    // Email client
    let email_client: Arc<dyn EmailClient> = match &config.email_client {
        Some(settings) => {
            let http_client = HttpClient::builder().timeout(settings.timeout()).build()?;
            Arc::new(PostmarkEmailClient::new(
                settings.base_url.clone(),
                Email::parse(&settings.sender)?,
                settings.auth_token.clone(),
                http_client,
            ))
        }
        None => Arc::new(MockEmailClient::new()),
    };

    // Remote provisioning
    let gateway = SupabaseProvisioningGateway::new(
        config.supabase.base_url.clone(),
        config.supabase.service_role_key.clone(),
        HttpClient::builder()
            .timeout(config.supabase.timeout())
            .build()?,
    );

    let auth_flow = AuthFlow::new(codec, registry, email_client, config.auth_flow_settings());
    let app_service = AppService::new(auth_flow, validator, record_store, gateway);

    let allowed_origins = config.auth.allowed_origins.clone();

    let listener = tokio::net::TcpListener::bind(&config.server.address).await?;
    tracing::info!("Starting eligibility check API...");

    app_service
        .run_standalone(listener, Some(allowed_origins))
        .await?;

    Ok(())
}

pub fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}
