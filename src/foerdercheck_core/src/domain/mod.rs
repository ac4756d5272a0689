pub mod eligibility_check;
pub mod eligibility_record;
pub mod email;
pub mod remote_user;
pub mod token;
