// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::integration::helpers::create_test_app;

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app().await;

    let response = app.server.get("/health").await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.text(), "OK");
}

#[tokio::test]
async fn test_version_reports_package_version() {
    let app = create_test_app().await;

    let response = app.server.get("/v1/version").await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.text(), env!("CARGO_PKG_VERSION"));
}
