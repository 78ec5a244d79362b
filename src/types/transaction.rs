//! Transaction type - 입출금 내역

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Fee;
use crate::utils::time::iso8601;

/// 트랜잭션 타입
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Deposit,
    Withdrawal,
}

/// 트랜잭션 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Ok,
    Canceled,
    Failed,
}

/// 입출금 트랜잭션
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// 트랜잭션 ID
    pub id: String,
    /// 타임스탬프 (밀리초)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    /// ISO 8601 datetime
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datetime: Option<String>,
    /// 완료 타임스탬프
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<i64>,
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
    /// 화폐 코드
    pub currency: String,
    pub amount: Decimal,
    pub status: TransactionStatus,
    /// 트랜잭션 해시
    #[serde(skip_serializing_if = "Option::is_none")]
    pub txid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee: Option<Fee>,
    /// 원본 응답
    #[serde(default)]
    pub info: serde_json::Value,
}

impl Transaction {
    /// 새 입금 트랜잭션 생성
    pub fn deposit(id: String, currency: String, amount: Decimal) -> Self {
        Self {
            id,
            timestamp: None,
            datetime: None,
            updated: None,
            tx_type: TransactionType::Deposit,
            currency,
            amount,
            status: TransactionStatus::Pending,
            txid: None,
            fee: None,
            info: serde_json::Value::Null,
        }
    }

    /// 타임스탬프 설정
    pub fn with_timestamp(mut self, ts: i64) -> Self {
        self.timestamp = Some(ts);
        self.datetime = iso8601(ts);
        self
    }

    /// 상태 설정
    pub fn with_status(mut self, status: TransactionStatus) -> Self {
        self.status = status;
        self
    }

    /// 완료 여부
    pub fn is_completed(&self) -> bool {
        self.status == TransactionStatus::Ok
    }
}
