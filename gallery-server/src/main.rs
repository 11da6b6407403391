use gallery_server::{Config, Server, ServerState, setup_environment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 设置环境 (dotenv, 日志)
    setup_environment()?;

    tracing::info!("Gallery server starting...");

    // 2. 加载并检查配置
    let config = Config::from_env();
    config.validate()?;
    tracing::info!(environment = %config.environment, "Configuration loaded");

    // 3. 初始化服务器状态 (数据库、迁移、初始数据)
    let state = ServerState::initialize(&config).await?;

    // 4. 启动 HTTP 服务器
    if let Err(e) = Server::new(config, state).run().await {
        tracing::error!(error = %e, "Server stopped with error");
        return Err(e.into());
    }

    Ok(())
}
