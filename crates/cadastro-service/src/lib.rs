//! 客户与订单服务
//!
//! 两个互相独立的内存集合（`/clientes`、`/pedidos`），通过 REST API 提供增删改查。
//!
//! ## 模块结构
//!
//! - `models`: 客户、订单记录
//! - `store`: 有序内存存储
//! - `services`: 两个集合服务（状态、DTO、路由、处理器）
//! - `coerce`: 请求字段的真值判断与数值转换
//! - `error`: 错误类型及 HTTP 映射
//! - `routes`: 应用路由组装、探针、CORS
//! - `cli`: 命令行入口
//!
//! ## 使用示例
//!
//! ```rust
//! use cadastro_service::routes::{self, AppState};
//!
//! let app = routes::app(AppState::seeded(), routes::cors_layer("*"));
//! # let _ = app;
//! ```

pub mod cli;
pub mod coerce;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

pub use error::{ApiError, Result};
pub use models::{Customer, Order};
pub use routes::AppState;
