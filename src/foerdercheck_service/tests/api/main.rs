mod auth;
mod document_check;
mod eligibility;
mod helpers;
mod user;
