/// Account service interface
pub mod account;
/// API key service interface
pub mod api_keys;
/// Note generation service interface
pub mod notes;
/// Usage service interface
pub mod usage;
/// Webhook service interface
pub mod webhooks;
