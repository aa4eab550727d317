use crate::error::AppError;
use crate::model::requests::{NoteRequest, RegenerateRequest};
use crate::model::responses::{
    JobResponse, JobStatus, NoteResponse, SystemStatus, TranscriptResponse,
};
use async_trait::async_trait;
use std::path::Path;

/// Interface for note generation
#[async_trait]
pub trait NoteService: Send + Sync {
    /// Submits an audio file for transcription and note generation
    ///
    /// The file is validated locally, the job is created, then the audio is
    /// uploaded to the presigned URL returned by the API.
    ///
    /// # Arguments
    /// * `file_path` - Audio file to process
    /// * `request` - Note parameters; template, visit type and recording type are required
    async fn process_audio(
        &self,
        file_path: &Path,
        request: &NoteRequest,
    ) -> Result<JobResponse, AppError>;

    /// Gets the processing state of a job
    async fn fetch_status(&self, job_id: &str) -> Result<JobStatus, AppError>;

    /// Gets the generated note of a completed job
    async fn fetch_note(&self, job_id: &str) -> Result<NoteResponse, AppError>;

    /// Gets the transcript of a job
    async fn fetch_transcript(&self, job_id: &str) -> Result<TranscriptResponse, AppError>;

    /// Generates a new note from the transcript of a completed job
    async fn regenerate_note(
        &self,
        job_id: &str,
        request: &RegenerateRequest,
    ) -> Result<JobStatus, AppError>;

    /// Gets the health of the API
    async fn get_system_status(&self) -> Result<SystemStatus, AppError>;
}
