/// Authentication and session management
pub mod auth;
/// NoteDx API client
pub mod client;
/// Application configuration module
pub mod config;
/// Service traits implemented by the client
pub mod interfaces;
/// Rate limiter module for API request throttling
pub mod rate_limiter;
/// Service implementations for the client
pub mod services;
