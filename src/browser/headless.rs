use std::path::Path;
use std::time::Duration;

use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::error::BrowserError;

/// 启动无头浏览器并打开一个空白页面
pub async fn launch_headless(config: &Config) -> Result<(Browser, Page), BrowserError> {
    info!("🚀 启动无头浏览器...");

    let mut builder = BrowserConfig::builder()
        .new_headless_mode()
        .window_size(1920, 1080)
        .args(vec![
            "--disable-gpu",
            "--no-sandbox",
            "--disable-dev-shm-usage",
            "--remote-debugging-port=0",
        ]);
    if let Some(path) = &config.chrome_path {
        builder = builder.chrome_executable(Path::new(path));
    }
    let browser_config = builder
        .build()
        .map_err(|message| BrowserError::ConfigurationFailed { message })?;

    let (browser, mut handler) = Browser::launch(browser_config).await.map_err(|e| {
        error!("启动无头浏览器失败: {}", e);
        BrowserError::LaunchFailed { source: e }
    })?;
    debug!("无头浏览器启动成功");

    // 在后台处理浏览器事件
    tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    // 等待浏览器状态同步
    sleep(Duration::from_millis(300)).await;

    let page = browser
        .new_page("about:blank")
        .await
        .map_err(|e| BrowserError::PageCreationFailed { source: e })?;

    info!("✅ 无头浏览器就绪");
    Ok((browser, page))
}
