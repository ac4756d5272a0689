use axum::{
    Router,
    http::{
        HeaderValue, Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
        request,
    },
    routing::{get, post},
};
use foerdercheck_adapters::{
    auth_validation::BearerTokenValidator,
    config::AllowedOrigins,
    http::routes::{
        DocumentCheckState, check_eligibility, create_user, create_user_data, health,
        load_document_check, login, register, save_document_check, store_eligibility_data,
        validate_login, validate_token, verify_email,
    },
};
use foerdercheck_application::AuthFlow;
use foerdercheck_core::{
    EligibilityRecordStore, EmailClient, TokenCodec, UserProvisioningGateway,
    VerifiedEmailRegistry,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// The eligibility-check HTTP API.
pub struct AppService {
    router: Router,
}

impl AppService {
    /// Build the router. Each route group receives only the state it needs.
    pub fn new<C, V, E, R, G>(
        auth_flow: AuthFlow<C, V, E>,
        validator: BearerTokenValidator,
        record_store: R,
        gateway: G,
    ) -> Self
    where
        C: TokenCodec + Clone + 'static,
        V: VerifiedEmailRegistry + Clone + 'static,
        E: EmailClient + Clone + 'static,
        R: EligibilityRecordStore + Clone + 'static,
        G: UserProvisioningGateway + Clone + 'static,
    {
        let router = Router::new()
            .route("/", get(health))
            .route("/check-eligibility", post(check_eligibility))
            // Email-link auth runs on the flow alone
            .route("/auth/register", post(register::<C, V, E>))
            .route("/auth/verify-email/{token}", get(verify_email::<C, V, E>))
            .route("/auth/login", post(login::<C, V, E>))
            .route(
                "/auth/validate-login/{token}",
                get(validate_login::<C, V, E>),
            )
            .with_state(auth_flow)
            .route("/auth/validate", get(validate_token))
            .with_state(validator.clone())
            // Document check needs the record store and the bearer validator
            .route("/document-check/save", post(save_document_check::<R>))
            .route("/document-check/load", get(load_document_check::<R>))
            .with_state(DocumentCheckState {
                record_store,
                validator,
            })
            // Provisioning only needs the gateway
            .route("/user/create", post(create_user::<G>))
            .route("/user/create-data", post(create_user_data::<G>))
            .route("/user/store-eligibility", post(store_eligibility_data::<G>))
            .with_state(gateway);

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert into a router that can be nested into another application.
    pub fn as_nested_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([AUTHORIZATION, CONTENT_TYPE])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins.contains(origin)
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Serve the API on `listener` until the process stops.
    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.as_nested_router(allowed_origins);

        tracing::info!("Eligibility check API listening on {}", listener.local_addr()?);

        axum::serve(listener, router).await
    }
}
