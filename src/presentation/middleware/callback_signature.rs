// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::utils::signature;
use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    http::{Method, StatusCode},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::warn;

pub const SIGNATURE_HEADER: &str = "X-Callback-Signature";

/// 回调请求体上限
const MAX_CALLBACK_BODY: usize = 1024 * 1024;

/// 回调签名状态
///
/// 未配置密钥时不做校验
#[derive(Clone, Default)]
pub struct CallbackAuth {
    secret: Option<Arc<str>>,
}

impl CallbackAuth {
    pub fn new(secret: Option<String>) -> Self {
        Self {
            secret: secret.filter(|s| !s.is_empty()).map(Arc::from),
        }
    }
}

/// 推送回调签名中间件
///
/// 只校验 POST 请求；签名为原始请求体的 hex(HMAC-SHA256)。
pub async fn callback_signature_middleware(
    State(auth): State<CallbackAuth>,
    req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(secret) = auth.secret.as_deref() else {
        return Ok(next.run(req).await);
    };
    if req.method() != Method::POST {
        return Ok(next.run(req).await);
    }

    let (parts, body) = req.into_parts();
    let provided = parts
        .headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    let bytes = to_bytes(body, MAX_CALLBACK_BODY)
        .await
        .map_err(|_| StatusCode::PAYLOAD_TOO_LARGE)?;

    let verified = provided
        .as_deref()
        .map(|sig| signature::verify(secret, &bytes, sig))
        .unwrap_or(false);
    if !verified {
        warn!(path = %parts.uri.path(), "Rejected callback with missing or invalid signature");
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(next.run(Request::from_parts(parts, Body::from(bytes))).await)
}
