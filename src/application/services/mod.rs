/// Account service implementation for [`crate::application::client::Client`]
pub mod account_service;
/// API key service implementation
pub mod key_service;
/// Note generation service implementation
pub mod note_service;
/// Usage service implementation
pub mod usage_service;
/// Webhook service implementation
pub mod webhook_service;

pub use crate::application::interfaces::account::*;
pub use crate::application::interfaces::api_keys::*;
pub use crate::application::interfaces::notes::*;
pub use crate::application::interfaces::usage::*;
pub use crate::application::interfaces::webhooks::*;
