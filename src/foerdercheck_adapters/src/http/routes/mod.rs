pub mod document_check;
pub mod eligibility;
pub mod error;
pub mod health;
pub mod login;
pub mod register;
pub mod user;
pub mod validate_login;
pub mod validate_token;
pub mod verify_email;

pub use document_check::{DocumentCheckState, load_document_check, save_document_check};
pub use eligibility::check_eligibility;
pub use error::{ApiError, ErrorResponse};
pub use health::health;
pub use login::{LoginRequest, LoginResponse, login};
pub use register::{RegisterRequest, RegisterResponse, register};
pub use user::{
    CreateUserDataRequest, CreateUserRequest, CreateUserResponse, StoreEligibilityRequest,
    create_user, create_user_data, store_eligibility_data,
};
pub use validate_login::{ValidateLoginResponse, validate_login};
pub use validate_token::{ValidateTokenResponse, validate_token};
pub use verify_email::{VerifyEmailResponse, verify_email};
