pub mod auth_flow;
pub mod document_check;
