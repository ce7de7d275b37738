use std::time::Duration;

use chromiumoxide::{Browser, Page};
use futures::StreamExt;
use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::error::BrowserError;

/// 连接到调试端口上已运行的浏览器，并打开一个空白页面
pub async fn connect_existing(port: u16) -> Result<(Browser, Page), BrowserError> {
    let browser_url = format!("http://localhost:{}", port);
    info!("正在连接到浏览器: {}", browser_url);

    let (browser, mut handler) = Browser::connect(&browser_url).await.map_err(|e| {
        error!("连接浏览器失败: {}", e);
        BrowserError::ConnectionFailed { port, source: e }
    })?;
    debug!("浏览器连接成功");

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

    info!("✅ 已连接到浏览器 (端口: {})", port);
    Ok((browser, page))
}
