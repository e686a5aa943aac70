//! 路由配置模块
//!
//! 合并客户、订单两组路由，并挂载探针与可观测性中间件

use std::sync::Arc;

use axum::{Json, Router, http::HeaderValue, middleware, routing::get};
use cadastro_shared::observability::middleware as obs_middleware;
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::services::{CustomerServiceState, OrderServiceState, customer_routes, order_routes};

/// 对外暴露的全部端点，供 `routes` 子命令和启动日志使用
pub const ROUTE_TABLE: &[(&str, &str)] = &[
    ("GET", "/health"),
    ("GET", "/ready"),
    ("POST", "/clientes"),
    ("GET", "/clientes"),
    ("GET", "/clientes/{id}"),
    ("PUT", "/clientes/{id}"),
    ("DELETE", "/clientes/{id}"),
    ("POST", "/pedidos"),
    ("GET", "/pedidos"),
    ("GET", "/pedidos/{id}"),
    ("PUT", "/pedidos/{id}"),
    ("DELETE", "/pedidos/{id}"),
];

/// 两个集合服务的状态
///
/// 启动时构建一次，测试中每个用例各建一份
#[derive(Clone, Default)]
pub struct AppState {
    pub customers: Arc<CustomerServiceState>,
    pub orders: Arc<OrderServiceState>,
}

impl AppState {
    /// 空集合
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入示例客户与订单
    pub fn seeded() -> Self {
        Self {
            customers: Arc::new(CustomerServiceState::seeded()),
            orders: Arc::new(OrderServiceState::seeded()),
        }
    }
}

/// 构建完整应用路由
pub fn app(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .merge(customer_routes().with_state(state.customers))
        .merge(order_routes().with_state(state.orders))
        .layer(cors)
        .layer(middleware::from_fn(obs_middleware::http_tracing))
        .layer(middleware::from_fn(obs_middleware::request_id))
}

/// 根据逗号分隔的来源列表构建 CORS 层，`*` 表示放行全部来源
pub fn cors_layer(allowed_origins: &str) -> CorsLayer {
    if allowed_origins.trim() == "*" {
        info!("CORS allowed_origins: * (all origins)");
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    info!("CORS allowed_origins: {}", allowed_origins);
    let origins: Vec<_> = allowed_origins
        .split(',')
        .filter_map(|s| s.trim().parse::<HeaderValue>().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// 健康检查响应
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// 就绪检查响应
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub services: Vec<String>,
}

/// 存活探针
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}

/// 就绪探针
///
/// 集合都在进程内，进程存活即可服务
async fn readiness_check() -> Json<ReadinessResponse> {
    Json(ReadinessResponse {
        status: "ready".to_string(),
        services: vec!["clientes".to_string(), "pedidos".to_string()],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_probes() {
        let app = app(AppState::new(), cors_layer("*"));

        let (status, body) = get_json(app.clone(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");

        let (status, body) = get_json(app, "/ready").await;
        assert_eq!(status, StatusCode::OK);
        let ready: ReadinessResponse = serde_json::from_value(body).unwrap();
        assert_eq!(ready.services, vec!["clientes", "pedidos"]);
    }

    #[tokio::test]
    async fn test_collections_are_independent() {
        let state = AppState::seeded();
        let app = app(state.clone(), cors_layer("http://localhost:5173"));

        let (_, customers) = get_json(app.clone(), "/clientes").await;
        let (_, orders) = get_json(app, "/pedidos").await;

        assert_eq!(customers.as_array().unwrap().len(), 1);
        assert_eq!(orders.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_route_table_covers_both_collections() {
        assert_eq!(ROUTE_TABLE.len(), 12);
        assert_eq!(
            ROUTE_TABLE
                .iter()
                .filter(|(_, path)| path.starts_with("/clientes"))
                .count(),
            5
        );
        assert_eq!(
            ROUTE_TABLE
                .iter()
                .filter(|(_, path)| path.starts_with("/pedidos"))
                .count(),
            5
        );
    }
}
