//! 客户记录

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::explicit_null;
use crate::store::Record;

/// 客户
///
/// `cpf` 仅在创建时保证唯一，更新时不再校验。
/// `telefone` 按提交的原值保存，提交 `null` 时响应中也回显 `null`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    pub cpf: String,
    pub email: String,
    #[serde(
        rename = "telefone",
        default,
        deserialize_with = "explicit_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub phone: Option<Value>,
}

impl Record for Customer {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Customer {
    /// 启动时写入的示例客户
    pub fn samples() -> Vec<Self> {
        vec![Self {
            id: 1,
            name: "Ana Silva".to_string(),
            cpf: "123.456.789-00".to_string(),
            email: "ana.s@exemplo.com".to_string(),
            phone: Some(Value::from("11987654321")),
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_customer_wire_names() {
        let customer = Customer::samples().remove(0);
        let value = serde_json::to_value(&customer).unwrap();

        assert_eq!(
            value,
            json!({
                "id": 1,
                "nome": "Ana Silva",
                "cpf": "123.456.789-00",
                "email": "ana.s@exemplo.com",
                "telefone": "11987654321"
            })
        );
    }

    #[test]
    fn test_customer_without_phone_omits_field() {
        let customer = Customer {
            id: 9,
            name: "X".to_string(),
            cpf: "1".to_string(),
            email: "x@x.com".to_string(),
            phone: None,
        };
        let value = serde_json::to_value(&customer).unwrap();
        assert!(value.get("telefone").is_none());
    }

    #[test]
    fn test_customer_keeps_explicit_null_phone() {
        let customer: Customer = serde_json::from_value(json!({
            "id": 2,
            "nome": "X",
            "cpf": "1",
            "email": "x@x",
            "telefone": null
        }))
        .unwrap();
        assert_eq!(customer.phone, Some(Value::Null));

        let value = serde_json::to_value(&customer).unwrap();
        assert_eq!(value["telefone"], Value::Null);
        assert!(value.as_object().unwrap().contains_key("telefone"));

        let without: Customer =
            serde_json::from_value(json!({"id": 3, "nome": "X", "cpf": "1", "email": "x@x"}))
                .unwrap();
        assert_eq!(without.phone, None);
    }
}
