//! 数据模型
//!
//! 客户与订单两类记录。字段的 JSON 名称是对外契约，保持葡语原名。

pub mod customer;
pub mod order;

pub use customer::Customer;
pub use order::Order;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// 区分字段缺失与显式 `null`
///
/// 需配合 `#[serde(default)]`：缺失为 `None`，`null` 为 `Some(Value::Null)`
pub(crate) fn explicit_null<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}
