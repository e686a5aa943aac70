//! 订单服务
//!
//! 订单集合的 CRUD REST API。`clienteId` 只做数值转换，不与客户集合关联校验。

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
use crate::coerce::{to_float, to_int, to_text};
use crate::error::{ApiError, Result};
use crate::models::Order;
use crate::store::MemoryStore;

const COLLECTION: &str = "pedidos";

/// 订单服务状态
#[derive(Clone)]
pub struct OrderServiceState {
    pub orders: MemoryStore<Order>,
}

impl OrderServiceState {
    /// 创建空的订单服务状态
    pub fn new() -> Self {
        Self {
            orders: MemoryStore::new(),
        }
    }

    /// 创建带示例订单的服务状态
    pub fn seeded() -> Self {
        Self {
            orders: MemoryStore::seeded(Order::samples()),
        }
    }

    /// 新建订单
    pub fn create(&self, req: OrderRequest) -> Result<Order> {
        let fields = req.into_fields("clienteId, data, status e valorTotal são obrigatórios.")?;

        let order = self
            .orders
            .insert_with(|_| Ok::<_, ApiError>(()), |id| fields.into_order(id))?;

        info!(
            id = order.id,
            customer_id = order.customer_id,
            total = order.total,
            "创建订单"
        );
        metrics::record_created(COLLECTION);
        Ok(order)
    }

    /// 按插入顺序列出全部订单
    pub fn list(&self) -> Vec<Order> {
        self.orders.list()
    }

    /// 获取订单详情
    pub fn get(&self, id: Option<i64>) -> Result<Order> {
        id.and_then(|id| self.orders.get(id))
            .ok_or_else(|| ApiError::NotFound("Pedido não encontrado.".to_string()))
    }

    /// 整体更新订单（id 除外）
    pub fn update(&self, id: Option<i64>, req: OrderRequest) -> Result<Order> {
        let fields = req.into_fields("Todos os campos são obrigatórios para a atualização.")?;

        let order = id
            .and_then(|id| self.orders.replace(id, |old| fields.into_order(old.id)))
            .ok_or_else(|| {
                ApiError::NotFound("Pedido não encontrado para atualização.".to_string())
            })?;

        info!(id = order.id, status = %order.status, "更新订单");
        Ok(order)
    }

    /// 删除订单
    pub fn delete(&self, id: Option<i64>) -> Result<()> {
        match id {
            Some(id) if self.orders.remove(id) => {
                info!(id, "删除订单");
                metrics::record_deleted(COLLECTION);
                Ok(())
            }
            _ => Err(ApiError::NotFound(
                "Pedido não encontrado para exclusão.".to_string(),
            )),
        }
    }
}

impl Default for OrderServiceState {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// 请求/响应 DTO
// ============================================================================

/// 创建/更新订单请求
///
/// 四个字段都必须为真值。`clienteId` 与 `valorTotal` 接受数字或数字字符串，
/// `data` 与 `status` 非字符串时按文本保存
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct OrderRequest {
    #[serde(rename = "clienteId")]
    #[validate(required, custom(function = "validate_truthy"))]
    pub customer_id: Option<Value>,
    #[serde(rename = "data")]
    #[validate(required, custom(function = "validate_truthy"))]
    pub date: Option<Value>,
    #[validate(required, custom(function = "validate_truthy"))]
    pub status: Option<Value>,
    #[serde(rename = "valorTotal")]
    #[validate(required, custom(function = "validate_truthy"))]
    pub total: Option<Value>,
}

/// 通过校验并完成类型转换的订单字段
struct OrderFields {
    customer_id: i64,
    date: String,
    status: String,
    total: f64,
}

impl OrderFields {
    fn into_order(self, id: i64) -> Order {
        Order {
            id,
            customer_id: self.customer_id,
            date: self.date,
            status: self.status,
            total: self.total,
        }
    }
}

impl OrderRequest {
    /// 必填校验与数值转换
    ///
    /// 任一字段缺失或为假值（含 `valorTotal: 0`）时返回 `missing_message`
    fn into_fields(self, missing_message: &str) -> Result<OrderFields> {
        self.validate()
            .map_err(|_| ApiError::Validation(missing_message.to_string()))?;

        let date = self.date.as_ref().map(to_text).unwrap_or_default();
        let status = self.status.as_ref().map(to_text).unwrap_or_default();

        let customer_id = self.customer_id.as_ref().and_then(to_int).ok_or_else(|| {
            ApiError::Validation("clienteId deve ser um número inteiro.".to_string())
        })?;
        let total = self
            .total
            .as_ref()
            .and_then(to_float)
            .ok_or_else(|| ApiError::Validation("valorTotal deve ser numérico.".to_string()))?;

        Ok(OrderFields {
            customer_id,
            date,
            status,
            total,
        })
    }
}

/// 更新订单响应
#[derive(Debug, Serialize, Deserialize)]
pub struct OrderUpdatedResponse {
    pub mensagem: String,
    #[serde(rename = "pedido")]
    pub order: Order,
}

// ============================================================================
// 路由定义
// ============================================================================

/// 构建订单服务路由
pub fn order_routes() -> Router<Arc<OrderServiceState>> {
    Router::new()
        .route("/pedidos", get(list_orders).post(create_order))
        .route(
            "/pedidos/{id}",
            get(get_order).put(update_order).delete(delete_order),
        )
}

// ============================================================================
// 路由处理器
// ============================================================================

/// 创建订单
///
/// POST /pedidos
async fn create_order(
    State(state): State<Arc<OrderServiceState>>,
    payload: std::result::Result<Json<OrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Order>)> {
    let Json(req) = payload?;
    let order = state.create(req)?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// 列出所有订单
///
/// GET /pedidos
async fn list_orders(State(state): State<Arc<OrderServiceState>>) -> Json<Vec<Order>> {
    Json(state.list())
}

/// 获取订单详情
///
/// GET /pedidos/:id
async fn get_order(
    State(state): State<Arc<OrderServiceState>>,
    Path(id): Path<String>,
) -> Result<Json<Order>> {
    state.get(parse_path_id(&id)).map(Json)
}

/// 更新订单
///
/// PUT /pedidos/:id
async fn update_order(
    State(state): State<Arc<OrderServiceState>>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<OrderRequest>, JsonRejection>,
) -> Result<Json<OrderUpdatedResponse>> {
    let Json(req) = payload?;
    let order = state.update(parse_path_id(&id), req)?;
    Ok(Json(OrderUpdatedResponse {
        mensagem: "Pedido atualizado com sucesso!".to_string(),
        order,
    }))
}

/// 删除订单
///
/// DELETE /pedidos/:id
async fn delete_order(
    State(state): State<Arc<OrderServiceState>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    state.delete(parse_path_id(&id))?;
    Ok(Json(MessageResponse::new("Pedido excluído com sucesso!")))
}

// ============================================================================
// 单元测试
// ============================================================================
