//! 命令执行器
//!
//! 将命令行参数与配置合并后执行具体子命令。

use anyhow::{Context, Result};
use cadastro_shared::config::AppConfig;
use tokio::net::TcpListener;
use tracing::info;

use super::ServeArgs;
use crate::routes::{self, AppState, ROUTE_TABLE};

/// 命令执行器
pub struct CommandRunner {
    config: AppConfig,
}

impl CommandRunner {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// 合并后的配置
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// 命令行参数覆盖配置
    pub fn apply_serve_args(&mut self, args: &ServeArgs) {
        if let Some(host) = &args.host {
            self.config.server.host = host.clone();
        }
        if let Some(port) = args.port {
            self.config.server.port = port;
        }
        if args.no_seed {
            self.config.store.seed = false;
        }
    }

    /// 按配置构建应用状态
    pub fn build_state(&self) -> AppState {
        if self.config.store.seed {
            AppState::seeded()
        } else {
            AppState::new()
        }
    }

    /// 执行 serve 命令
    ///
    /// 绑定端口并运行到收到关闭信号为止
    pub async fn run_server(&self) -> Result<()> {
        let state = self.build_state();
        info!(
            seed = self.config.store.seed,
            customers = state.customers.customers.count(),
            orders = state.orders.orders.count(),
            "集合初始化完成"
        );

        let app = routes::app(state, routes::cors_layer(&self.config.server.cors_origins));

        let addr = self.config.server_addr();
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("绑定端口失败: {addr}"))?;

        info!("服务已启动: http://{}", addr);
        for (method, path) in ROUTE_TABLE {
            info!("  {method:<6} {path}");
        }

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("服务器运行失败")?;

        info!("服务已停止");
        Ok(())
    }

    /// 执行 routes 命令
    pub fn print_routes(&self) {
        for (method, path) in ROUTE_TABLE {
            println!("{method:<6} {path}");
        }
    }
}

/// 监听关闭信号
///
/// 收到 Ctrl+C 或 SIGTERM 后返回，触发 axum 的优雅关闭流程
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "注册 Ctrl+C 处理器失败");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "注册 SIGTERM 处理器失败");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, initiating graceful shutdown..."),
        _ = terminate => info!("Received SIGTERM, initiating graceful shutdown..."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_args_override_config() {
        let mut runner = CommandRunner::new(AppConfig::default());
        runner.apply_serve_args(&ServeArgs {
            host: Some("127.0.0.1".to_string()),
            port: Some(8081),
            no_seed: true,
        });

        assert_eq!(runner.config().server_addr(), "127.0.0.1:8081");
        assert!(!runner.config().store.seed);

        let state = runner.build_state();
        assert_eq!(state.customers.customers.count(), 0);
        assert_eq!(state.orders.orders.count(), 0);
    }

    #[test]
    fn test_default_config_seeds_collections() {
        let mut runner = CommandRunner::new(AppConfig::default());
        runner.apply_serve_args(&ServeArgs::default());

        assert_eq!(runner.config().server.port, 3000);
        let state = runner.build_state();
        assert_eq!(state.customers.customers.count(), 1);
        assert_eq!(state.orders.orders.count(), 2);
    }
}
