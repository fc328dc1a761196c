// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::utils::retry_policy::is_retryable_message;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::warn;

/// 链上程序返回的结构化错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChainErrorCode {
    Timeout,
    RateLimited,
    Network,
    BlockhashExpired,
    SimulationFailed,
    InvalidAccountData,
    InsufficientFunds,
    Unauthorized,
    InvalidRequest,
    #[serde(other)]
    Other,
}

impl ChainErrorCode {
    /// 错误码对应的重试分类，`Other` 无法判定
    fn retryability(self) -> Option<Retryability> {
        match self {
            ChainErrorCode::Timeout
            | ChainErrorCode::RateLimited
            | ChainErrorCode::Network
            | ChainErrorCode::BlockhashExpired
            | ChainErrorCode::SimulationFailed
            | ChainErrorCode::InvalidAccountData => Some(Retryability::Transient),
            ChainErrorCode::InsufficientFunds
            | ChainErrorCode::Unauthorized
            | ChainErrorCode::InvalidRequest => Some(Retryability::Terminal),
            ChainErrorCode::Other => None,
        }
    }
}

impl fmt::Display for ChainErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            ChainErrorCode::Timeout => "timeout",
            ChainErrorCode::RateLimited => "rate_limited",
            ChainErrorCode::Network => "network",
            ChainErrorCode::BlockhashExpired => "blockhash_expired",
            ChainErrorCode::SimulationFailed => "simulation_failed",
            ChainErrorCode::InvalidAccountData => "invalid_account_data",
            ChainErrorCode::InsufficientFunds => "insufficient_funds",
            ChainErrorCode::Unauthorized => "unauthorized",
            ChainErrorCode::InvalidRequest => "invalid_request",
            ChainErrorCode::Other => "other",
        };
        write!(f, "{}", s)
    }
}

/// 重试分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retryability {
    Transient,
    Terminal,
}

/// 铸造流程中的错误
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct ChainError {
    pub code: Option<ChainErrorCode>,
    pub message: String,
}

impl ChainError {
    pub fn new(code: ChainErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            message: message.into(),
        }
    }

    /// 没有结构化错误码的错误，只能按关键字分类
    pub fn unclassified(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    /// 判定是否可重试
    ///
    /// 优先使用结构化错误码，其次按关键字匹配，都不匹配时视为终止错误
    /// 并单独记录日志以便后续补充分类。
    pub fn classify(&self) -> Retryability {
        if let Some(retryability) = self.code.and_then(ChainErrorCode::retryability) {
            return retryability;
        }

        if is_retryable_message(&self.message) {
            return Retryability::Transient;
        }

        warn!(
            target: "mint_classifier",
            code = ?self.code,
            message = %self.message,
            "Unclassified chain error treated as terminal"
        );
        Retryability::Terminal
    }

    pub fn is_transient(&self) -> bool {
        self.classify() == Retryability::Transient
    }
}

/// 链上 NFT/代币程序
///
/// 签名者由服务端持有的私钥派生。
#[async_trait]
pub trait ChainProgram: Send + Sync {
    /// 通过代币元数据程序铸造 NFT，返回 mint 地址
    async fn mint_nft(
        &self,
        metadata_uri: &str,
        name: &str,
        symbol: &str,
    ) -> Result<String, ChainError>;

    /// 为目标钱包创建（或获取）关联代币账户，返回账户地址
    async fn create_associated_account(&self, mint: &str, owner: &str)
        -> Result<String, ChainError>;

    /// 从铸造权限账户向目标账户转账，返回交易签名
    async fn transfer(
        &self,
        mint: &str,
        destination_account: &str,
        amount: u64,
    ) -> Result<String, ChainError>;
}
