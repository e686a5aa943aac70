//! 客户与订单服务入口
//!
//! 加载配置、初始化可观测性后执行子命令。

use cadastro_service::cli::{Cli, CommandRunner, Commands};
use cadastro_shared::{config::AppConfig, observability};
use clap::Parser;

const SERVICE_NAME: &str = "cadastro-service";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = AppConfig::load(SERVICE_NAME)?;

    if let Some(level) = &cli.log_level {
        config.observability.log_level = level.clone();
    }

    let mut runner = CommandRunner::new(config);

    match cli.command_or_default() {
        Commands::Serve(args) => {
            runner.apply_serve_args(&args);

            let obs_config = runner
                .config()
                .observability
                .clone()
                .with_service_name(&runner.config().service_name);
            let _guard = observability::init(&obs_config).await?;

            runner.run_server().await?;
        }
        Commands::Routes => runner.print_routes(),
    }

    Ok(())
}
