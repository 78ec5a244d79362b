//! Fee type - 수수료 정보

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 수수료 정보
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fee {
    /// 수수료 금액
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<Decimal>,
    /// 수수료 화폐
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl Fee {
    pub fn new(cost: Decimal, currency: String) -> Self {
        Self {
            cost: Some(cost),
            currency: Some(currency),
        }
    }
}
