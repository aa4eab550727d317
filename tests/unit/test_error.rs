use notedx_client::error::AppError;
use reqwest::StatusCode;

#[test]
fn test_error_display_prefixes() {
    assert_eq!(
        AppError::Authentication("bad key".to_string()).to_string(),
        "authentication error: bad key"
    );
    assert_eq!(
        AppError::NotFound("Resource not found: x".to_string()).to_string(),
        "not found: Resource not found: x"
    );
    assert_eq!(AppError::TokenExpired.to_string(), "token expired");
    assert_eq!(
        AppError::invalid_field("template", "Invalid value").to_string(),
        "invalid field template: Invalid value"
    );
    assert_eq!(
        AppError::missing_field("visit_type").to_string(),
        "missing field: Missing required field: visit_type"
    );
}

#[test]
fn test_rate_limit_error_carries_retry_after() {
    let err = AppError::RateLimitExceeded {
        message: "Rate limit exceeded: slow down".to_string(),
        retry_after: Some(30),
    };
    assert_eq!(err.to_string(), "rate limit exceeded: Rate limit exceeded: slow down");
    match err {
        AppError::RateLimitExceeded { retry_after, .. } => assert_eq!(retry_after, Some(30)),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_status_codes() {
    assert_eq!(
        AppError::Authentication(String::new()).status_code(),
        Some(StatusCode::UNAUTHORIZED)
    );
    assert_eq!(
        AppError::InactiveAccount(String::new()).status_code(),
        Some(StatusCode::FORBIDDEN)
    );
    assert_eq!(
        AppError::PaymentRequired(String::new()).status_code(),
        Some(StatusCode::PAYMENT_REQUIRED)
    );
    assert_eq!(
        AppError::JobNotFound(String::new()).status_code(),
        Some(StatusCode::NOT_FOUND)
    );
    assert_eq!(
        AppError::ServiceUnavailable(String::new()).status_code(),
        Some(StatusCode::SERVICE_UNAVAILABLE)
    );
    assert_eq!(
        AppError::Api {
            status: StatusCode::IM_A_TEAPOT,
            message: String::new()
        }
        .status_code(),
        Some(StatusCode::IM_A_TEAPOT)
    );
    assert_eq!(AppError::Validation(String::new()).status_code(), None);
    assert_eq!(AppError::Upload(String::new()).status_code(), None);
}

#[test]
fn test_retryable_errors() {
    assert!(AppError::Network("reset".to_string()).is_retryable());
    assert!(AppError::InternalServer("boom".to_string()).is_retryable());
    assert!(AppError::ServiceUnavailable("down".to_string()).is_retryable());
    assert!(
        AppError::RateLimitExceeded {
            message: String::new(),
            retry_after: None
        }
        .is_retryable()
    );
    assert!(!AppError::BadRequest("nope".to_string()).is_retryable());
    assert!(!AppError::Authentication("nope".to_string()).is_retryable());
    assert!(!AppError::TokenExpired.is_retryable());
}

#[test]
fn test_json_and_io_conversions() {
    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: AppError = json_err.into();
    assert!(matches!(err, AppError::Json(_)));
    assert!(err.to_string().starts_with("json error: "));

    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let err: AppError = io_err.into();
    assert!(matches!(err, AppError::Io(_)));
    assert_eq!(err.to_string(), "io error: gone");
}
