use anyhow::Result;
use quiz_scrape::config::Config;
use quiz_scrape::logger;
use quiz_scrape::orchestrator::App;

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logger::init();

    // 加载配置
    let config = Config::from_env();

    // 初始化应用，运行后释放浏览器资源
    let app = App::initialize(config).await?;
    let result = app.run().await;
    app.shutdown().await;

    result
}
