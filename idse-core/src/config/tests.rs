use super::types::Config;

#[test]
fn default_config_validates() {
    assert!(Config::default().validate().is_ok());
}

#[test]
fn anchor_without_sync_backend_is_rejected() {
    let mut config = Config::default();
    config.remote.anchor = Some("db_abc123".to_string());
    assert!(config.validate().is_err());
}

#[test]
fn out_of_range_similarity_threshold_is_rejected() {
    let mut config = Config::default();
    config.promotion.duplicate_similarity_threshold = 1.5;
    assert!(config.validate().is_err());
}

#[test]
fn zero_concurrency_is_rejected() {
    let mut config = Config::default();
    config.remote.concurrency = 0;
    assert!(config.validate().is_err());
}
