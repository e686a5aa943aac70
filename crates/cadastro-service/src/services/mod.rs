//! 集合服务模块
//!
//! 客户与订单两组互相独立的 REST 路由，各自持有自己的内存集合。

pub mod customer_service;
pub mod order_service;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::ValidationError;

use crate::coerce::{is_truthy, parse_int_prefix};

pub use customer_service::{CustomerServiceState, customer_routes};
pub use order_service::{OrderServiceState, order_routes};

/// 仅包含提示信息的响应
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub mensagem: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            mensagem: message.into(),
        }
    }
}

/// 路径中的 id 取前导整数，无法解析时视为不存在
pub(crate) fn parse_path_id(raw: &str) -> Option<i64> {
    parse_int_prefix(raw)
}

/// 必填字段的真值校验，`0`、`""`、`false` 与缺失同等对待
pub(crate) fn validate_truthy(value: &Value) -> Result<(), ValidationError> {
    if is_truthy(value) {
        Ok(())
    } else {
        Err(ValidationError::new("truthy"))
    }
}
