//! CLI 命令定义
//!
//! 命令行参数的优先级高于配置文件和环境变量。

use clap::{Args, Parser, Subcommand};

/// 客户与订单服务命令行工具
#[derive(Parser, Debug)]
#[command(name = "cadastro-server")]
#[command(version, about = "Clientes e pedidos em memória via HTTP")]
#[command(propagate_version = true)]
pub struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)，覆盖配置文件
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// 未指定子命令时按 `serve` 处理
    pub fn command_or_default(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or_else(|| Commands::Serve(ServeArgs::default()))
    }
}

/// 子命令枚举
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// 启动 HTTP 服务
    Serve(ServeArgs),

    /// 打印全部端点后退出
    Routes,
}

/// `serve` 子命令参数
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct ServeArgs {
    /// 监听地址
    #[arg(long)]
    pub host: Option<String>,

    /// 监听端口
    #[arg(short, long)]
    pub port: Option<u16>,

    /// 启动时不写入示例数据
    #[arg(long)]
    pub no_seed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults_to_serve() {
        let cli = Cli::parse_from(["cadastro-server"]);
        assert!(cli.log_level.is_none());
        assert_eq!(cli.command_or_default(), Commands::Serve(ServeArgs::default()));
    }

    #[test]
    fn test_cli_parse_serve() {
        let cli = Cli::parse_from([
            "cadastro-server",
            "serve",
            "--host",
            "127.0.0.1",
            "-p",
            "8081",
            "--no-seed",
            "--log-level",
            "debug",
        ]);

        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert_eq!(
            cli.command_or_default(),
            Commands::Serve(ServeArgs {
                host: Some("127.0.0.1".to_string()),
                port: Some(8081),
                no_seed: true,
            })
        );
    }

    #[test]
    fn test_cli_parse_routes() {
        let cli = Cli::parse_from(["cadastro-server", "routes"]);
        assert_eq!(cli.command_or_default(), Commands::Routes);
    }

    #[test]
    fn test_cli_rejects_invalid_port() {
        assert!(Cli::try_parse_from(["cadastro-server", "serve", "--port", "99999"]).is_err());
    }
}
