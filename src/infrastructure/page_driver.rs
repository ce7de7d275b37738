//! 页面驱动 - 基础设施层
//!
//! 持有唯一的 page 资源，只暴露"操作已渲染页面"的能力

use std::time::{Duration, Instant};

use chromiumoxide::{Element, Page};
use tokio::time::sleep;
use tracing::debug;

use crate::config::Config;
use crate::error::BrowserError;

/// 页面驱动
///
/// 职责：
/// - 持有唯一的 Page 资源
/// - 暴露导航 / 等待 / 查找 / 读取 / 展开 / 点击能力
/// - 不认识 Topic / QuestionRecord
/// - 不处理业务流程
pub struct PageDriver {
    page: Page,
    wait_timeout: Duration,
    poll_interval: Duration,
}

impl PageDriver {
    /// 创建新的页面驱动
    pub fn new(page: Page, config: &Config) -> Self {
        Self {
            page,
            wait_timeout: Duration::from_secs(config.wait_timeout_secs),
            poll_interval: Duration::from_millis(config.poll_interval_ms),
        }
    }

    /// 获取 page 的引用（用于其他操作）
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// 导航到指定 URL
    pub async fn navigate(&self, url: &str) -> Result<(), BrowserError> {
        debug!("导航到: {}", url);
        self.page
            .goto(url)
            .await
            .map_err(|e| BrowserError::NavigationFailed {
                url: url.to_string(),
                source: e,
            })?;
        Ok(())
    }

    /// 查找文档内所有匹配的元素
    ///
    /// 无匹配返回空列表，不报错
    pub async fn find_all(&self, selector: &str) -> Vec<Element> {
        match self.page.find_elements(selector).await {
            Ok(elements) => elements,
            Err(e) => {
                debug!("查找元素失败 (选择器: {}): {}", selector, e);
                Vec::new()
            }
        }
    }

    /// 在指定元素内查找所有匹配的子元素
    ///
    /// 无匹配返回空列表，不报错
    pub async fn find_in(&self, element: &Element, selector: &str) -> Vec<Element> {
        match element.find_elements(selector).await {
            Ok(elements) => elements,
            Err(e) => {
                debug!("查找子元素失败 (选择器: {}): {}", selector, e);
                Vec::new()
            }
        }
    }

    /// 轮询等待至少一个匹配的元素出现
    ///
    /// 超过配置的等待上限仍无匹配时返回 `WaitTimeout`
    pub async fn wait_for_all(&self, selector: &str) -> Result<Vec<Element>, BrowserError> {
        let deadline = Instant::now() + self.wait_timeout;
        loop {
            let found = self.find_all(selector).await;
            if !found.is_empty() {
                return Ok(found);
            }
            if Instant::now() >= deadline {
                return Err(BrowserError::WaitTimeout {
                    selector: selector.to_string(),
                    timeout_secs: self.wait_timeout.as_secs(),
                });
            }
            sleep(self.poll_interval).await;
        }
    }

    /// 读取元素的文本（已去除首尾空白）
    pub async fn read_text(&self, element: &Element, context: &str) -> Result<String, BrowserError> {
        let text = element
            .inner_text()
            .await
            .map_err(|e| BrowserError::StaleElement {
                context: context.to_string(),
                source: e,
            })?;
        Ok(text.unwrap_or_default().trim().to_string())
    }

    /// 读取元素的属性值
    pub async fn read_attribute(
        &self,
        element: &Element,
        name: &str,
        context: &str,
    ) -> Result<Option<String>, BrowserError> {
        element
            .attribute(name)
            .await
            .map_err(|e| BrowserError::StaleElement {
                context: context.to_string(),
                source: e,
            })
    }

    /// 切换元素的可见性 class（展开折叠内容）
    ///
    /// 尽力而为：单个元素失败只记录 debug 日志，不影响调用方
    pub async fn reveal(&self, element: &Element, remove_class: &str, add_class: &str) {
        let js_fn = format!(
            "function() {{ this.classList.remove({}); this.classList.add({}); }}",
            serde_json::to_string(remove_class).unwrap_or_default(),
            serde_json::to_string(add_class).unwrap_or_default(),
        );
        if let Err(e) = element.call_js_fn(js_fn, false).await {
            debug!("展开元素失败: {}", e);
        }
    }

    /// 通过 JS 点击元素
    pub async fn click(&self, element: &Element) -> Result<(), BrowserError> {
        element
            .call_js_fn("function() { this.click(); }", false)
            .await
            .map_err(|e| BrowserError::ScriptExecutionFailed { source: e })?;
        Ok(())
    }

    /// 按链接文本精确查找锚元素（如 "Next" 翻页按钮）
    ///
    /// 逐个读取 a 元素的文本比较；单个元素读取失败直接跳过
    pub async fn find_link_by_text(&self, text: &str) -> Option<Element> {
        for anchor in self.find_all("a").await {
            if let Ok(Some(anchor_text)) = anchor.inner_text().await {
                if anchor_text.trim() == text {
                    return Some(anchor);
                }
            }
        }
        None
    }
}
