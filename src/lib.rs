//! # Foerdercheck - Eligibility Check Backend
//!
//! Facade crate re-exporting the public APIs of the service components.
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `AuthToken`, `EligibilityRecord`, the eligibility calculator
//! - **Ports**: `TokenCodec`, `VerifiedEmailRegistry`, `EligibilityRecordStore`, `UserProvisioningGateway`
//! - **Use cases**: `AuthFlow`, `DocumentCheckUseCase`
//! - **Adapters**: `JwtTokenCodec`, `RedisVerifiedEmailRegistry`, `PostgresEligibilityRecordStore`,
//!   `SupabaseProvisioningGateway`, `PostmarkEmailClient`, etc.
//! - **Service**: `AppService`, the HTTP entry point

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use foerdercheck_core::*;
}

pub use foerdercheck_core::{
    AuthToken, EligibilityAnswers, EligibilityRecord, EligibilityRequest, EligibilityResult,
    EligibilityUpdate, Email, EmailError, OwnerId, RemoteUser, RemoteUserId, TokenPayload,
    TokenPurpose,
};

// ============================================================================
// Ports
// ============================================================================

pub use foerdercheck_core::{
    EligibilityRecordStore, EmailClient, ProvisioningError, RecordStoreError, RegistryError,
    TokenCodec, TokenError, UpstreamFailure, UserProvisioningGateway, VerifiedEmailRegistry,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use foerdercheck_application::*;
}

pub use foerdercheck_application::{
    AuthFlow, AuthFlowError, AuthFlowSettings, DocumentCheckUseCase, LoginSession,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// HTTP route handlers
    pub mod http {
        pub use foerdercheck_adapters::http::*;
    }

    /// Persistence implementations
    pub mod persistence {
        pub use foerdercheck_adapters::persistence::*;
    }

    /// Email client implementations
    pub mod email {
        pub use foerdercheck_adapters::email::*;
    }

    /// Bearer authentication
    pub mod auth {
        pub use foerdercheck_adapters::auth_validation::*;
    }

    /// Configuration
    pub mod config {
        pub use foerdercheck_adapters::config::*;
    }
}

pub use foerdercheck_adapters::{
    auth_validation::{BearerTokenValidator, Principal},
    email::{MockEmailClient, PostmarkEmailClient},
    gateway::SupabaseProvisioningGateway,
    persistence::{
        HashMapEligibilityRecordStore, HashSetVerifiedEmailRegistry,
        PostgresEligibilityRecordStore, RedisVerifiedEmailRegistry,
    },
    token::JwtTokenCodec,
};

// ============================================================================
// Service (Main Entry Point)
// ============================================================================

pub use foerdercheck_service::{
    AppService,
    helpers::{configure_postgresql, configure_redis, get_redis_client},
};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing the port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use http;
