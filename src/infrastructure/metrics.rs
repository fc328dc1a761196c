// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::{info, warn};

/// 初始化指标导出器
///
/// 未配置监听地址时只注册指标描述，不启动 HTTP 导出
pub fn init_metrics(listen_addr: Option<&str>) {
    if let Some(listen_addr) = listen_addr {
        match listen_addr.parse::<SocketAddr>() {
            Ok(addr) => {
                // 端口被占用时只告警，不影响主服务
                if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
                    warn!("Failed to install Prometheus recorder: {}", e);
                } else {
                    info!("Metrics exporter listening on {}", addr);
                }
            }
            Err(e) => warn!("Invalid metrics listen address {}: {}", listen_addr, e),
        }
    }

    describe_counter!(
        "generation_submissions_total",
        "Generation requests submitted upstream, labelled by stage"
    );
    describe_counter!(
        "generation_failures_total",
        "Generation requests that failed upstream, labelled by stage"
    );
    describe_counter!(
        "generation_expired_total",
        "Generation tasks marked failed after timing out"
    );
    describe_counter!("releases_total", "Videos released for minting");
    describe_counter!("mint_attempts_total", "NFT mint attempts");
    describe_counter!("mint_success_total", "NFT mints that completed");
    describe_counter!("mint_failed_total", "NFT mints that failed permanently");
    describe_histogram!(
        "mint_duration_seconds",
        "Duration of a mint job from first attempt to outcome"
    );
    describe_counter!(
        "alert_delivery_success_total",
        "Alert notifications delivered"
    );
    describe_counter!(
        "alert_delivery_failure_total",
        "Alert notification delivery failures"
    );
    describe_histogram!(
        "alert_delivery_duration_seconds",
        "Duration of a single alert delivery attempt"
    );
}
