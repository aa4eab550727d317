/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
use crate::error::AppError;
use crate::presentation::account::{KeyStatus, KeyType};
use crate::presentation::note::{
    DocumentationStyle, Language, RecordingType, Template, VisitType,
};
use crate::utils::validation::validate_email;
use pretty_simple_display::DisplaySimple;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Parameters for `process-audio`
///
/// `template`, `visit_type` and `recording_type` must be set before the
/// request is sent; [`NoteRequest::validate`] reports the first one missing.
#[derive(Debug, Clone, Default, DisplaySimple, Serialize, Deserialize, PartialEq)]
pub struct NoteRequest {
    /// Note template
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<Template>,
    /// Kind of encounter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visit_type: Option<VisitType>,
    /// How the audio was captured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recording_type: Option<RecordingType>,
    /// Whether the patient consented to the recording
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_consent: Option<bool>,
    /// Spoken language of the recording
    #[serde(default)]
    pub lang: Language,
    /// Language of the generated note, defaults to `lang` server side
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_language: Option<Language>,
    /// Layout of the generated note
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation_style: Option<DocumentationStyle>,
    /// Free-form instructions or context for the generator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom: Option<Value>,
}

impl NoteRequest {
    /// Create a request for the given template
    pub fn new(template: Template) -> Self {
        Self {
            template: Some(template),
            ..Default::default()
        }
    }

    /// Set the template
    pub fn with_template(mut self, template: Template) -> Self {
        self.template = Some(template);
        self
    }

    /// Set the visit type
    pub fn with_visit_type(mut self, visit_type: VisitType) -> Self {
        self.visit_type = Some(visit_type);
        self
    }

    /// Set the recording type
    pub fn with_recording_type(mut self, recording_type: RecordingType) -> Self {
        self.recording_type = Some(recording_type);
        self
    }

    /// Set the patient consent flag
    pub fn with_patient_consent(mut self, consent: bool) -> Self {
        self.patient_consent = Some(consent);
        self
    }

    /// Set the spoken language
    pub fn with_lang(mut self, lang: Language) -> Self {
        self.lang = lang;
        self
    }

    /// Set the output language
    pub fn with_output_language(mut self, language: Language) -> Self {
        self.output_language = Some(language);
        self
    }

    /// Set the documentation style
    pub fn with_documentation_style(mut self, style: DocumentationStyle) -> Self {
        self.documentation_style = Some(style);
        self
    }

    /// Set custom generator input
    pub fn with_custom(mut self, custom: Value) -> Self {
        self.custom = Some(custom);
        self
    }

    /// Checks that every required field is present
    ///
    /// # Errors
    /// [`AppError::MissingField`] naming the first missing field.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.template.is_none() {
            return Err(AppError::missing_field("template"));
        }
        if self.visit_type.is_none() {
            return Err(AppError::missing_field("visit_type"));
        }
        if self.recording_type.is_none() {
            return Err(AppError::missing_field("recording_type"));
        }
        Ok(())
    }
}

/// Parameters for `regenerate-note`
///
/// Unset fields keep the values of the original job.
#[derive(Debug, Clone, Default, DisplaySimple, Serialize, Deserialize, PartialEq)]
pub struct RegenerateRequest {
    /// Template to regenerate with
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<Template>,
    /// Layout of the regenerated note
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation_style: Option<DocumentationStyle>,
    /// Language of the regenerated note
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_language: Option<Language>,
    /// Free-form instructions or context for the generator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom: Option<Value>,
}

impl RegenerateRequest {
    /// Set the template
    pub fn with_template(mut self, template: Template) -> Self {
        self.template = Some(template);
        self
    }

    /// Set the documentation style
    pub fn with_documentation_style(mut self, style: DocumentationStyle) -> Self {
        self.documentation_style = Some(style);
        self
    }

    /// Set the output language
    pub fn with_output_language(mut self, language: Language) -> Self {
        self.output_language = Some(language);
        self
    }

    /// Set custom generator input
    pub fn with_custom(mut self, custom: Value) -> Self {
        self.custom = Some(custom);
        self
    }
}

/// Body of `regenerate-note`
#[derive(Debug, Serialize)]
pub(crate) struct RegeneratePayload<'a> {
    pub job_id: &'a str,
    #[serde(flatten)]
    pub request: &'a RegenerateRequest,
}

/// Account fields to change with `user/account/update`
///
/// Only the fields that are set are sent.
#[derive(Debug, Clone, Default, DisplaySimple, Serialize, Deserialize, PartialEq)]
pub struct AccountUpdate {
    /// New company name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    /// New contact email
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    /// New phone number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// New postal address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl AccountUpdate {
    /// Set the company name
    pub fn with_company_name(mut self, company_name: &str) -> Self {
        self.company_name = Some(company_name.to_string());
        self
    }

    /// Set the contact email
    pub fn with_contact_email(mut self, contact_email: &str) -> Self {
        self.contact_email = Some(contact_email.to_string());
        self
    }

    /// Set the phone number
    pub fn with_phone_number(mut self, phone_number: &str) -> Self {
        self.phone_number = Some(phone_number.to_string());
        self
    }

    /// Set the address
    pub fn with_address(mut self, address: &str) -> Self {
        self.address = Some(address.to_string());
        self
    }

    /// True when no field is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.company_name.is_none()
            && self.contact_email.is_none()
            && self.phone_number.is_none()
            && self.address.is_none()
    }

    /// Checks that at least one field is set and the contact email is well formed
    pub fn validate(&self) -> Result<(), AppError> {
        if self.is_empty() {
            return Err(AppError::invalid_field(
                "fields",
                "At least one field must be provided for update",
            ));
        }
        if let Some(email) = &self.contact_email {
            validate_email(email, "contact_email")?;
        }
        Ok(())
    }
}

/// Body of `auth/create-account`
#[derive(Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateAccountRequest {
    /// Login email of the new account
    pub email: String,
    /// Login password of the new account
    pub password: String,
    /// Company owning the account
    pub company_name: String,
    /// Contact email, defaults to the login email server side
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    /// Contact phone number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// Postal address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl CreateAccountRequest {
    /// Create a request with the required fields
    pub fn new(email: &str, password: &str, company_name: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
            company_name: company_name.to_string(),
            contact_email: None,
            phone_number: None,
            address: None,
        }
    }

    /// Set the contact email
    pub fn with_contact_email(mut self, contact_email: &str) -> Self {
        self.contact_email = Some(contact_email.to_string());
        self
    }

    /// Set the phone number
    pub fn with_phone_number(mut self, phone_number: &str) -> Self {
        self.phone_number = Some(phone_number.to_string());
        self
    }

    /// Set the address
    pub fn with_address(mut self, address: &str) -> Self {
        self.address = Some(address.to_string());
        self
    }

    /// Checks required fields and email formats
    pub fn validate(&self) -> Result<(), AppError> {
        if self.email.trim().is_empty() {
            return Err(AppError::missing_field("email"));
        }
        if self.password.is_empty() {
            return Err(AppError::missing_field("password"));
        }
        if self.company_name.trim().is_empty() {
            return Err(AppError::missing_field("company_name"));
        }
        validate_email(&self.email, "email")?;
        if let Some(contact) = &self.contact_email {
            validate_email(contact, "contact_email")?;
        }
        Ok(())
    }
}

impl fmt::Debug for CreateAccountRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateAccountRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("company_name", &self.company_name)
            .field("contact_email", &self.contact_email)
            .field("phone_number", &self.phone_number)
            .field("address", &self.address)
            .finish()
    }
}

/// Webhook URLs to change with `user/webhook`
///
/// `None` leaves a URL unchanged, an empty string removes it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WebhookUpdate {
    /// Destination for sandbox jobs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_dev: Option<String>,
    /// Destination for live jobs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_prod: Option<String>,
}

/// Body of `user/create-api-key`
#[derive(Debug, Serialize)]
pub(crate) struct CreateKeyPayload<'a> {
    #[serde(rename = "keyType")]
    pub key_type: KeyType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<&'a HashMap<String, String>>,
}

/// Body of `user/update-api-key-metadata`
#[derive(Debug, Serialize)]
pub(crate) struct KeyMetadataPayload<'a> {
    #[serde(rename = "apiKey")]
    pub api_key: &'a str,
    pub metadata: &'a HashMap<String, String>,
}

/// Body of `user/api-keys/{key}/status`
#[derive(Debug, Serialize)]
pub(crate) struct KeyStatusPayload<'a> {
    #[serde(rename = "apiKey")]
    pub api_key: &'a str,
    pub status: KeyStatus,
}

/// Body of `DELETE user/api-keys/{key}`
#[derive(Debug, Serialize)]
pub(crate) struct KeyPayload<'a> {
    #[serde(rename = "apiKey")]
    pub api_key: &'a str,
}
