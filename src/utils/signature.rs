// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// 计算 hex(HMAC-SHA256(secret, message))
pub fn sign(secret: &str, message: &[u8]) -> String {
    // HMAC 接受任意长度的密钥，new_from_slice 不会失败
    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => return String::new(),
    };
    mac.update(message);
    hex::encode(mac.finalize().into_bytes())
}

/// 常量时间校验十六进制签名
pub fn verify(secret: &str, message: &[u8], signature_hex: &str) -> bool {
    let Ok(expected) = hex::decode(signature_hex.trim()) else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(message);
    mac.verify_slice(&expected).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_and_verify() {
        let signature = sign("secret", b"{\"task_id\":\"t1\"}");
        assert_eq!(signature.len(), 64);
        assert!(verify("secret", b"{\"task_id\":\"t1\"}", &signature));
        assert!(!verify("other", b"{\"task_id\":\"t1\"}", &signature));
        assert!(!verify("secret", b"{\"task_id\":\"t2\"}", &signature));
        assert!(!verify("secret", b"x", "not-hex"));
    }
}
