pub mod auth_validation;
pub mod config;
pub mod email;
pub mod gateway;
pub mod http;
pub mod persistence;
pub mod token;
