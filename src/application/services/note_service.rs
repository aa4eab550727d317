use crate::application::client::Client;
use crate::application::interfaces::notes::NoteService;
use crate::error::AppError;
use crate::model::http::upload_file;
use crate::model::requests::{NoteRequest, RegeneratePayload, RegenerateRequest};
use crate::model::responses::{
    JobResponse, JobState, JobStatus, NoteResponse, SystemStatus, TranscriptResponse,
};
use crate::utils::validation::{
    audio_content_type, calculate_optimal_chunk_size, validate_audio_file,
};
use async_trait::async_trait;
use std::path::Path;
use tracing::{debug, error, info};

fn require_job_id(job_id: &str) -> Result<(), AppError> {
    if job_id.trim().is_empty() {
        Err(AppError::MissingField("job_id".to_string()))
    } else {
        Ok(())
    }
}

/// Maps errors of job-scoped endpoints onto job errors
///
/// A 404 always means the job is unknown. A 400 means the job exists but the
/// result is not ready, except where the endpoint reports plain bad requests.
fn job_error(job_id: &str, err: AppError, bad_request_is_job_error: bool) -> AppError {
    match err {
        AppError::NotFound(message) => {
            AppError::JobNotFound(format!("Job not found: {job_id} ({message})"))
        }
        AppError::BadRequest(message) if bad_request_is_job_error => {
            AppError::Job(format!("Job {job_id} is not ready: {message}"))
        }
        other => other,
    }
}

#[async_trait]
impl NoteService for Client {
    async fn process_audio(
        &self,
        file_path: &Path,
        request: &NoteRequest,
    ) -> Result<JobResponse, AppError> {
        let size = validate_audio_file(file_path)?;
        request.validate()?;

        info!(
            "Submitting {} for processing ({} bytes)",
            file_path.display(),
            size
        );
        let job: JobResponse = self.post("process-audio", Some(request)).await?;

        let Some(presigned_url) = job.presigned_url.as_deref() else {
            error!("No upload URL returned for job {}", job.job_id);
            return Err(AppError::Upload(format!(
                "No presigned_url returned for job {}",
                job.job_id
            )));
        };

        let chunk_size = calculate_optimal_chunk_size(size);
        debug!(
            "Uploading audio for job {} in chunks of {} bytes",
            job.job_id, chunk_size
        );
        upload_file(
            self.http_client(),
            presigned_url,
            file_path,
            size,
            chunk_size,
            audio_content_type(file_path),
            &self.config().retry,
        )
        .await?;

        info!("✓ Audio uploaded for job {}", job.job_id);
        Ok(job)
    }

    async fn fetch_status(&self, job_id: &str) -> Result<JobStatus, AppError> {
        require_job_id(job_id)?;
        debug!("Fetching status of job {}", job_id);

        self.get(&format!("status/{job_id}"))
            .await
            .map_err(|e| job_error(job_id, e, false))
    }

    async fn fetch_note(&self, job_id: &str) -> Result<NoteResponse, AppError> {
        require_job_id(job_id)?;
        debug!("Fetching note of job {}", job_id);

        self.get(&format!("fetch-note/{job_id}"))
            .await
            .map_err(|e| job_error(job_id, e, true))
    }

    async fn fetch_transcript(&self, job_id: &str) -> Result<TranscriptResponse, AppError> {
        require_job_id(job_id)?;
        debug!("Fetching transcript of job {}", job_id);

        self.get(&format!("fetch-transcript/{job_id}"))
            .await
            .map_err(|e| job_error(job_id, e, false))
    }

    async fn regenerate_note(
        &self,
        job_id: &str,
        request: &RegenerateRequest,
    ) -> Result<JobStatus, AppError> {
        require_job_id(job_id)?;

        let status = self.fetch_status(job_id).await?;
        if status.status != JobState::Completed {
            return Err(AppError::Job(format!(
                "Job {job_id} must be completed before regenerating its note (status: {:?})",
                status.status
            )));
        }

        info!("Regenerating note for job {}", job_id);
        let payload = RegeneratePayload { job_id, request };
        self.post("regenerate-note", Some(&payload))
            .await
            .map_err(|e| job_error(job_id, e, false))
    }

    async fn get_system_status(&self) -> Result<SystemStatus, AppError> {
        debug!("Getting system status");
        self.get("system/status").await
    }
}
