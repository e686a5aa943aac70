//! 客户服务
//!
//! 客户集合的 CRUD REST API。集合只由本服务持有和修改。
//! `cpf` 只在创建时校验唯一性，更新直接采用调用方提交的值。

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};
use cadastro_shared::observability::metrics;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;
use validator::Validate;

use super::{MessageResponse, parse_path_id, validate_truthy};
use crate::coerce::to_text;
use crate::error::{ApiError, Result};
use crate::models::{Customer, explicit_null};
use crate::store::MemoryStore;

const COLLECTION: &str = "clientes";

/// 客户服务状态
///
/// 持有客户内存存储，启动时构建一次后注入所有路由处理器
#[derive(Clone)]
pub struct CustomerServiceState {
    pub customers: MemoryStore<Customer>,
}

impl CustomerServiceState {
    /// 创建空的客户服务状态
    pub fn new() -> Self {
        Self {
            customers: MemoryStore::new(),
        }
    }

    /// 创建带示例客户的服务状态
    pub fn seeded() -> Self {
        Self {
            customers: MemoryStore::seeded(Customer::samples()),
        }
    }

    /// 新建客户
    ///
    /// cpf 查重与追加在同一把写锁内完成
    pub fn create(&self, req: CustomerRequest) -> Result<Customer> {
        let CustomerFields {
            name,
            cpf,
            email,
            phone,
        } = req.into_fields("Nome, CPF e Email são campos obrigatórios.")?;

        let customer = self.customers.insert_with(
            |existing| {
                if existing.iter().any(|c| c.cpf == cpf) {
                    Err(ApiError::Conflict(
                        "CPF já cadastrado no sistema.".to_string(),
                    ))
                } else {
                    Ok(())
                }
            },
            |id| Customer {
                id,
                name,
                cpf: cpf.clone(),
                email,
                phone,
            },
        )?;

        info!(id = customer.id, cpf = %customer.cpf, "创建客户");
        metrics::record_created(COLLECTION);
        Ok(customer)
    }

    /// 按插入顺序列出全部客户
    pub fn list(&self) -> Vec<Customer> {
        self.customers.list()
    }

    /// 获取客户详情
    pub fn get(&self, id: Option<i64>) -> Result<Customer> {
        id.and_then(|id| self.customers.get(id))
            .ok_or_else(|| ApiError::NotFound("Cliente não encontrado.".to_string()))
    }

    /// 整体更新客户
    ///
    /// 不检查新 cpf 是否与其他客户重复
    pub fn update(&self, id: Option<i64>, req: CustomerRequest) -> Result<Customer> {
        let CustomerFields {
            name,
            cpf,
            email,
            phone,
        } = req.into_fields("Nome, CPF e Email são obrigatórios para a atualização.")?;

        let customer = id
            .and_then(|id| {
                self.customers.replace(id, |old| Customer {
                    id: old.id,
                    name,
                    cpf,
                    email,
                    phone,
                })
            })
            .ok_or_else(|| {
                ApiError::NotFound("Cliente não encontrado para atualização.".to_string())
            })?;

        info!(id = customer.id, "更新客户");
        Ok(customer)
    }

    /// 删除客户
    pub fn delete(&self, id: Option<i64>) -> Result<()> {
        match id {
            Some(id) if self.customers.remove(id) => {
                info!(id, "删除客户");
                metrics::record_deleted(COLLECTION);
                Ok(())
            }
            _ => Err(ApiError::NotFound(
                "Cliente não encontrado para exclusão.".to_string(),
            )),
        }
    }
}

impl Default for CustomerServiceState {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// 请求/响应 DTO
// ============================================================================

/// 创建/更新客户请求
///
/// 字段接受任意 JSON 值，只要求 nome、cpf、email 为真值
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CustomerRequest {
    #[serde(rename = "nome")]
    #[validate(required, custom(function = "validate_truthy"))]
    pub name: Option<Value>,
    #[validate(required, custom(function = "validate_truthy"))]
    pub cpf: Option<Value>,
    #[validate(required, custom(function = "validate_truthy"))]
    pub email: Option<Value>,
    #[serde(rename = "telefone", default, deserialize_with = "explicit_null")]
    pub phone: Option<Value>,
}

/// 通过校验的客户字段
struct CustomerFields {
    name: String,
    cpf: String,
    email: String,
    phone: Option<Value>,
}

impl CustomerRequest {
    /// 必填校验，失败时统一返回 `missing_message`
    fn into_fields(self, missing_message: &str) -> Result<CustomerFields> {
        self.validate()
            .map_err(|_| ApiError::Validation(missing_message.to_string()))?;

        let text = |value: Option<Value>| value.as_ref().map(to_text).unwrap_or_default();
        Ok(CustomerFields {
            name: text(self.name),
            cpf: text(self.cpf),
            email: text(self.email),
            phone: self.phone,
        })
    }
}

/// 更新客户响应
#[derive(Debug, Serialize, Deserialize)]
pub struct CustomerUpdatedResponse {
    pub mensagem: String,
    #[serde(rename = "cliente")]
    pub customer: Customer,
}

// ============================================================================
// 路由定义
// ============================================================================

/// 构建客户服务路由
pub fn customer_routes() -> Router<Arc<CustomerServiceState>> {
    Router::new()
        .route("/clientes", get(list_customers).post(create_customer))
        .route(
            "/clientes/{id}",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
}

// ============================================================================
// 路由处理器
// ============================================================================

/// 创建客户
///
/// POST /clientes
async fn create_customer(
    State(state): State<Arc<CustomerServiceState>>,
    payload: std::result::Result<Json<CustomerRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Customer>)> {
    let Json(req) = payload?;
    let customer = state.create(req)?;
    Ok((StatusCode::CREATED, Json(customer)))
}

/// 列出所有客户
///
/// GET /clientes
async fn list_customers(State(state): State<Arc<CustomerServiceState>>) -> Json<Vec<Customer>> {
    Json(state.list())
}

/// 获取客户详情
///
/// GET /clientes/:id
async fn get_customer(
    State(state): State<Arc<CustomerServiceState>>,
    Path(id): Path<String>,
) -> Result<Json<Customer>> {
    state.get(parse_path_id(&id)).map(Json)
}

/// 更新客户
///
/// PUT /clientes/:id
async fn update_customer(
    State(state): State<Arc<CustomerServiceState>>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<CustomerRequest>, JsonRejection>,
) -> Result<Json<CustomerUpdatedResponse>> {
    let Json(req) = payload?;
    let customer = state.update(parse_path_id(&id), req)?;
    Ok(Json(CustomerUpdatedResponse {
        mensagem: "Cliente atualizado com sucesso!".to_string(),
        customer,
    }))
}

/// 删除客户
///
/// DELETE /clientes/:id
async fn delete_customer(
    State(state): State<Arc<CustomerServiceState>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    state.delete(parse_path_id(&id))?;
    Ok(Json(MessageResponse::new("Cliente excluído com sucesso!")))
}

// ============================================================================
// 单元测试
// ============================================================================
