use notedx_client::error::AppError;
use notedx_client::utils::validation::{
    audio_content_type, calculate_optimal_chunk_size, validate_audio_file, validate_month_format,
    validate_webhook_url,
};
use std::io::Write;
use std::path::Path;
use tempfile::Builder;

const MIB: u64 = 1024 * 1024;

#[test]
fn test_validate_audio_file_returns_size() {
    let mut file = Builder::new().suffix(".wav").tempfile().unwrap();
    file.write_all(&[0u8; 2048]).unwrap();
    assert_eq!(validate_audio_file(file.path()).unwrap(), 2048);
}

#[test]
fn test_validate_audio_file_rejects_text() {
    let mut file = Builder::new().suffix(".txt").tempfile().unwrap();
    file.write_all(b"not audio").unwrap();
    let err = validate_audio_file(file.path()).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[test]
fn test_chunk_size_bounds() {
    assert_eq!(calculate_optimal_chunk_size(1024), 5 * MIB);
    assert_eq!(calculate_optimal_chunk_size(100 * MIB), 10 * MIB);
    assert_eq!(calculate_optimal_chunk_size(101 * MIB), 11 * MIB);
    assert_eq!(calculate_optimal_chunk_size(500 * MIB), 50 * MIB);
}

#[test]
fn test_audio_content_type() {
    assert_eq!(audio_content_type(Path::new("visit.mp3")), "audio/mpeg");
    assert_eq!(audio_content_type(Path::new("visit.M4A")), "audio/mp4");
    assert_eq!(audio_content_type(Path::new("visit.wav")), "audio/wav");
    assert_eq!(audio_content_type(Path::new("visit.opus")), "audio/ogg");
    assert_eq!(
        audio_content_type(Path::new("visit")),
        "application/octet-stream"
    );
}

#[test]
fn test_month_and_webhook_validation() {
    assert!(validate_month_format("2024-02", "start_month").is_ok());
    let err = validate_month_format("2024/02", "start_month").unwrap_err();
    assert!(err.to_string().contains("start_month"));

    assert!(validate_webhook_url("", true).is_ok());
    assert!(validate_webhook_url("https://hooks.example.com/notedx", true).is_ok());
    assert!(validate_webhook_url("http://hooks.example.com/notedx", false).is_ok());
    assert!(validate_webhook_url("http://hooks.example.com/notedx", true).is_err());
    assert!(validate_webhook_url("ftp://hooks.example.com", false).is_err());
}
