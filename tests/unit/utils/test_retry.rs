use notedx_client::model::retry::RetryConfig;
use std::time::Duration;

#[test]
fn test_retry_config_standard() {
    let config = RetryConfig::standard();
    assert_eq!(config.max_retries(), 3);
    assert_eq!(config.base_delay_ms, 1000);
    assert_eq!(config.max_delay_ms, 30_000);
    assert!(config.jitter);
}

#[test]
fn test_retry_config_no_retry() {
    let config = RetryConfig::no_retry();
    assert_eq!(config.max_retries(), 0);
}

#[test]
fn test_retry_config_with_max_retries() {
    let config = RetryConfig::with_max_retries(5);
    assert_eq!(config.max_retries(), 5);
    assert_eq!(config.base_delay_ms, 1000);
}

#[test]
fn test_retry_config_with_delay() {
    let config = RetryConfig::with_delay(250);
    assert_eq!(config.max_retries(), 3);
    assert_eq!(config.base_delay_ms, 250);
}

#[test]
fn test_retry_config_with_max_retries_and_delay() {
    let config = RetryConfig::with_max_retries_and_delay(2, 100);
    assert_eq!(config.max_retries(), 2);
    assert!(!config.jitter);
    assert_eq!(config.delay(0), Duration::from_millis(100));
    assert_eq!(config.delay(1), Duration::from_millis(200));
    assert_eq!(config.delay(2), Duration::from_millis(400));
}

#[test]
fn test_backoff_is_capped() {
    let config = RetryConfig::with_max_retries_and_delay(10, 1000);
    assert_eq!(config.base_delay(4), Duration::from_millis(16_000));
    assert_eq!(config.base_delay(5), Duration::from_millis(30_000));
    assert_eq!(config.base_delay(63), Duration::from_millis(30_000));
}

#[test]
fn test_jitter_stays_within_twenty_percent() {
    let config = RetryConfig::standard();
    for attempt in 0..4 {
        let base = config.base_delay(attempt);
        let delay = config.delay(attempt);
        assert!(delay >= base);
        assert!(delay <= base + base / 5);
    }
}
