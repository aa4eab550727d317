/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
use crate::presentation::account::KeyType;
use crate::presentation::serialization::string_as_u64_opt;
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Acknowledgement returned by mutating endpoints
///
/// Account, key and webhook updates answer with a message plus a few
/// endpoint-specific fields, kept in `extra`.
#[derive(DebugPretty, DisplaySimple, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MessageResponse {
    /// Human readable outcome
    #[serde(default)]
    pub message: Option<String>,
    /// Endpoint-specific fields
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl MessageResponse {
    /// String field from `extra`
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.extra.get(name).and_then(Value::as_str)
    }
}

/// Result of `auth/create-account`
#[derive(DebugPretty, DisplaySimple, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CreateAccountResponse {
    /// Identifier of the new user
    #[serde(default, alias = "userId", alias = "uid")]
    pub user_id: Option<String>,
    /// Login email of the new account
    #[serde(default)]
    pub email: Option<String>,
    /// Human readable outcome
    #[serde(default)]
    pub message: Option<String>,
    /// Other fields
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Result of `user/create-api-key`
#[derive(DebugPretty, DisplaySimple, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiKeyCreated {
    /// The new key, shown in full only once
    #[serde(alias = "apiKey", alias = "key")]
    pub api_key: String,
    /// Environment of the key
    #[serde(alias = "keyType", alias = "type")]
    pub key_type: KeyType,
    /// Metadata stored with the key
    #[serde(default)]
    pub metadata: Option<HashMap<String, String>>,
}

/// Processing state of a job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    /// Waiting for the audio upload
    #[default]
    Pending,
    /// Audio received, waiting for a worker
    Queued,
    /// Audio is being transcribed
    Transcribing,
    /// Transcript ready, note being generated
    Processing,
    /// Transcript only job finished
    TranscribedOnly,
    /// Note and transcript are available
    Completed,
    /// Processing failed
    Error,
    /// Any state this client does not know about yet
    #[serde(other)]
    Unknown,
}

impl JobState {
    /// True once the job will not change any more
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobState::Completed | JobState::TranscribedOnly | JobState::Error
        )
    }
}

/// Result of `process-audio`
#[derive(DebugPretty, DisplaySimple, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct JobResponse {
    /// Identifier used to poll the job
    pub job_id: String,
    /// Storage URL the audio is uploaded to
    #[serde(default)]
    pub presigned_url: Option<String>,
    /// Initial state
    #[serde(default)]
    pub status: Option<JobState>,
    /// Other fields
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Result of `status/{job_id}` and `regenerate-note`
#[derive(DebugPretty, DisplaySimple, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct JobStatus {
    /// Job identifier
    #[serde(default)]
    pub job_id: Option<String>,
    /// Current state
    pub status: JobState,
    /// Completion percentage, when reported
    #[serde(default, deserialize_with = "string_as_u64_opt")]
    pub progress: Option<u64>,
    /// Detail for failed jobs
    #[serde(default)]
    pub message: Option<String>,
    /// Other fields
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Result of `fetch-note/{job_id}`
#[derive(DebugPretty, DisplaySimple, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct NoteResponse {
    /// Job identifier
    #[serde(default)]
    pub job_id: Option<String>,
    /// Generated note
    pub note: String,
    /// Title of the generated note
    #[serde(default)]
    pub note_title: Option<String>,
    /// Other fields
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Result of `fetch-transcript/{job_id}`
#[derive(DebugPretty, DisplaySimple, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TranscriptResponse {
    /// Job identifier
    #[serde(default)]
    pub job_id: Option<String>,
    /// Raw transcript
    pub transcript: String,
    /// Other fields
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Result of `system/status`
#[derive(DebugPretty, DisplaySimple, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SystemStatus {
    /// Overall state, e.g. `operational`
    pub status: String,
    /// State of each backend service
    #[serde(default)]
    pub services: HashMap<String, Value>,
    /// Latency figures in milliseconds
    #[serde(default)]
    pub latency: HashMap<String, Value>,
    /// Other fields
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}
