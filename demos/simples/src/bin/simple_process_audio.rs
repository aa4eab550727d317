use notedx_client::application::client::Client;
use notedx_client::application::interfaces::notes::NoteService;
use notedx_client::model::requests::NoteRequest;
use notedx_client::presentation::note::{RecordingType, Template, VisitType};
use notedx_client::utils::setup_logger;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

/// Uploads an audio file, waits for the job and prints the generated note
///
/// Run with: cargo run --bin simple_process_audio -- path/to/visit.mp3
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_logger();

    let Some(path) = std::env::args().nth(1).map(PathBuf::from) else {
        warn!("Usage: simple_process_audio <audio file>");
        return Ok(());
    };

    let client = Client::from_env().await?;

    let request = NoteRequest::new(Template::PrimaryCare)
        .with_visit_type(VisitType::InitialEncounter)
        .with_recording_type(RecordingType::Dictation)
        .with_patient_consent(true);

    let job = client.process_audio(&path, &request).await?;
    info!("✓ Job {} created", job.job_id);

    loop {
        let status = client.fetch_status(&job.job_id).await?;
        info!("Job {} is {:?}", job.job_id, status.status);
        if status.status.is_terminal() {
            break;
        }
        tokio::time::sleep(Duration::from_secs(5)).await;
    }

    let note = client.fetch_note(&job.job_id).await?;
    info!("Generated note:\n{}", note.note);

    Ok(())
}
