use clap::Parser;
use golden_store::{AppError, Cli, cli, print_banner, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. .env 先于参数解析，让 env 默认值生效
    dotenv::dotenv().ok();
    let args = Cli::parse();

    // 2. 加载配置并初始化日志
    let config = args.config();
    setup_environment(&config);

    if matches!(args.command, cli::Command::Serve) {
        print_banner();
    }

    if let Err(e) = cli::run(args, config).await {
        match e.downcast_ref::<AppError>() {
            Some(app) if app.is_user_facing() => {
                tracing::warn!(code = %app.code, "Command rejected: {}", app)
            }
            _ => tracing::error!("Command failed: {:#}", e),
        }
        return Err(e);
    }
    Ok(())
}
