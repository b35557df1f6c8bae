/// Actor identity taken from the request
pub mod auth;
/// Mapping of scheduling errors to HTTP responses
pub mod error_handling;
