//! 订单记录

use serde::{Deserialize, Serialize};

use crate::store::Record;

/// 订单
///
/// `customer_id` 只是一个数字引用，不校验对应客户是否存在
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    #[serde(rename = "clienteId")]
    pub customer_id: i64,
    /// 自由格式的日期文本
    #[serde(rename = "data")]
    pub date: String,
    pub status: String,
    #[serde(rename = "valorTotal")]
    pub total: f64,
}

impl Record for Order {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Order {
    /// 启动时写入的示例订单
    pub fn samples() -> Vec<Self> {
        vec![
            Self {
                id: 3001,
                customer_id: 12345,
                date: "2025-09-28".to_string(),
                status: "Pendente".to_string(),
                total: 1250.50,
            },
            Self {
                id: 3002,
                customer_id: 54321,
                date: "2025-09-29".to_string(),
                status: "Concluído".to_string(),
                total: 500.00,
            },
        ]
    }
}
