// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::*;
use std::time::Duration;

#[test]
fn test_builtin_defaults_deserialize() {
    let settings: Settings = Settings::builder()
        .unwrap()
        .build()
        .unwrap()
        .try_deserialize()
        .unwrap();

    assert_eq!(settings.server.port, 3000);
    assert_eq!(settings.storage.storage_type, "local");
    assert_eq!(settings.minting.max_retries, 3);
    assert_eq!(settings.minting.initial_backoff_ms, 1000);
    assert!(settings.pipeline.callback_secret.is_none());
    assert!(settings.alerts.webhook_url.is_none());
    assert!(settings.indexer.rpc_url.is_none());
}

#[test]
fn test_minting_defaults_match_mint_retry_policy() {
    let settings: Settings = Settings::builder()
        .unwrap()
        .build()
        .unwrap()
        .try_deserialize()
        .unwrap();

    let policy = crate::utils::retry_policy::RetryPolicy::from_minting_settings(&settings.minting);
    assert_eq!(policy.calculate_backoff(1), Duration::from_secs(1));
    assert_eq!(policy.calculate_backoff(3), Duration::from_secs(4));
}

#[test]
fn test_overrides_take_precedence_over_defaults() {
    let settings: Settings = Settings::builder()
        .unwrap()
        .set_override("services.music.base_url", "http://music.internal")
        .unwrap()
        .set_override("pipeline.callback_secret", "s3cret")
        .unwrap()
        .build()
        .unwrap()
        .try_deserialize()
        .unwrap();

    assert_eq!(settings.services.music.base_url, "http://music.internal");
    assert_eq!(settings.pipeline.callback_secret.as_deref(), Some("s3cret"));
}

#[test]
fn test_zero_intervals_are_rejected() {
    for key in [
        "minting.poll_interval_secs",
        "minting.lock_timeout_secs",
        "pipeline.expiration_interval_secs",
    ] {
        let err = Settings::builder()
            .unwrap()
            .set_override(key, 0)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize::<Settings>()
            .unwrap()
            .validated()
            .unwrap_err();
        assert!(err.to_string().contains(key));
    }
}

#[test]
fn test_default_intervals_pass_validation() {
    let settings = Settings::builder()
        .unwrap()
        .build()
        .unwrap()
        .try_deserialize::<Settings>()
        .unwrap()
        .validated()
        .unwrap();
    assert_eq!(settings.minting.poll_interval_secs, 10);
}
