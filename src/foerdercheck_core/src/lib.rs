pub mod clock;
pub mod domain;
pub mod ports;
pub mod strategies;

// Re-export commonly used types for convenience
pub use clock::{Clock, ManualClock, SystemClock};

pub use domain::{
    eligibility_check::{
        EligibilityDetails, EligibilityGroup, EligibilityRequest, EligibilityResult,
        IncomeLimits, calculate_limits, determine_eligibility,
    },
    eligibility_record::{
        EligibilityAnswers, EligibilityAnswersUpdate, EligibilityRecord, EligibilityUpdate,
        OwnerId,
    },
    email::{Email, EmailError},
    remote_user::{RemoteUser, RemoteUserId},
    token::{AuthToken, TokenPayload, TokenPurpose},
};

pub use ports::{
    repositories::{
        EligibilityRecordStore, RecordStoreError, RegistryError, VerifiedEmailRegistry,
    },
    services::{
        EmailClient, ProvisioningError, TokenCodec, TokenError, UpstreamFailure,
        UserProvisioningGateway,
    },
};

pub use strategies::auth_validator::AuthValidator;
