//! CLI 模块
//!
//! - `serve` - 启动 HTTP 服务（默认子命令）
//! - `routes` - 打印全部端点
//!
//! ```bash
//! cadastro-server serve --port 3000 --no-seed
//! cadastro-server --log-level debug
//! cadastro-server routes
//! ```

pub mod commands;
pub mod runner;

pub use commands::{Cli, Commands, ServeArgs};
pub use runner::CommandRunner;
