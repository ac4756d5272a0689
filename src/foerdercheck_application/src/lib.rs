pub mod notifications;
pub mod use_cases;

// Re-export for convenience
pub use use_cases::{
    auth_flow::{AuthFlow, AuthFlowError, AuthFlowSettings, LoginSession},
    document_check::DocumentCheckUseCase,
};
