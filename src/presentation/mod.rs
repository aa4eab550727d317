/// Account, API key and webhook models
pub mod account;
/// Note generation enumerations
pub mod note;
/// Serialization utilities for API responses
pub mod serialization;
/// Usage and billing report models
pub mod usage;
