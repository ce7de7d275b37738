//! 主题翻页流程 - 流程层
//!
//! 核心职责：定义"一个主题"的完整翻页流程
//!
//! 流程顺序：
//! 1. 导航到主题首页 → 等待渲染 → 解析类别
//! 2. 每页：提取题目 → 上交记录 → 点击 Next 进入下一页
//! 3. 空页跳过并继续、正常页缺失 Next 时提前结束（兜底）

use std::time::Duration;

use anyhow::Result;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::config::Config;
use crate::infrastructure::PageDriver;
use crate::models::{QuestionRecord, TopicSpec};
use crate::services::{PageExtractor, PageOutcome};
use crate::workflow::topic_ctx::TopicCtx;

/// 翻页按钮的链接文本
const NEXT_LINK_TEXT: &str = "Next";

/// 主题翻页结果
///
/// 两种终态都是正常结束，不是错误
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkOutcome {
    /// 按计划尝试了全部页
    Completed { pages_visited: usize },
    /// 正常页面缺失 Next 按钮，无法确定后面还有页，提前结束
    StoppedEarly { last_page: usize },
}

/// 单页处理后的走向（纯转移决策）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepPlan {
    /// 点击 Next 进入下一页
    Advance,
    /// 不点击，直接尝试下一页序号（空页且 Next 缺失）
    Continue,
    /// 正常结束（已是最后一页）
    Finish,
    /// 提前结束（正常页面缺失 Next）
    FinishEarly,
}

impl StepPlan {
    /// 决定当前页处理完之后的走向
    ///
    /// # 参数
    /// - `extracted`: 本页是否成功提取（false 表示空页）
    /// - `is_last`: 是否已是计划内的最后一页
    /// - `next_available`: 页面上是否存在 Next 按钮
    pub fn decide(extracted: bool, is_last: bool, next_available: bool) -> Self {
        match (extracted, is_last, next_available) {
            (_, true, _) => Self::Finish,
            (_, false, true) => Self::Advance,
            (true, false, false) => Self::FinishEarly,
            (false, false, false) => Self::Continue,
        }
    }
}

/// 主题翻页流程
///
/// 职责：
/// - 编排一个主题的完整翻页流程
/// - 决定何时提取、何时翻页、何时跳过、何时提前结束
/// - 不持有任何资源（page）
/// - 只依赖业务能力（services）
pub struct PageWalker {
    extractor: PageExtractor,
    base_url: String,
    settle_delay: Duration,
}

impl PageWalker {
    /// 创建新的翻页流程
    pub fn new(config: &Config) -> Self {
        Self {
            extractor: PageExtractor::new(config),
            base_url: config.base_url.clone(),
            settle_delay: Duration::from_millis(config.settle_delay_ms),
        }
    }

    /// 走完一个主题的所有页
    ///
    /// # 参数
    /// - `driver`: 页面驱动
    /// - `topic`: 主题（名称 + 页数）
    /// - `ctx`: 主题上下文，类别名称在进入主题后解析写入
    /// - `on_page`: 每个正常页面的记录回调（按页面顺序）
    ///
    /// # 返回
    /// 返回终态；只有导航 / 点击失败才返回错误
    pub async fn walk<F>(
        &self,
        driver: &PageDriver,
        topic: &TopicSpec,
        ctx: &mut TopicCtx,
        mut on_page: F,
    ) -> Result<WalkOutcome>
    where
        F: FnMut(Vec<QuestionRecord>),
    {
        let url = topic.url(&self.base_url);
        driver.navigate(&url).await?;
        sleep(self.settle_delay).await;

        // 类别每个主题只解析一次，整个主题内复用
        ctx.category_name = self.extractor.resolve_category(driver, &topic.name).await;

        for page in 1..=topic.page_count {
            log_page_banner(ctx, &topic.name, page, topic.page_count);

            let extracted = match self.extractor.extract(driver, &ctx.category_name).await? {
                PageOutcome::Records(records) => {
                    info!(
                        "[主题 {}] ✓ 第 {} 页提取到 {} 道题目",
                        ctx.topic_index,
                        page,
                        records.len()
                    );
                    on_page(records);
                    true
                }
                PageOutcome::Empty => {
                    warn!(
                        "[主题 {}] ⚠️ 跳过第 {} 页（未找到题目节点）",
                        ctx.topic_index, page
                    );
                    false
                }
            };

            let is_last = page == topic.page_count;
            let next_button = if is_last {
                None
            } else {
                driver.find_link_by_text(NEXT_LINK_TEXT).await
            };

            match StepPlan::decide(extracted, is_last, next_button.is_some()) {
                StepPlan::Finish => {}
                StepPlan::Advance => {
                    if let Some(button) = next_button {
                        driver.click(&button).await?;
                        sleep(self.settle_delay).await;
                    }
                }
                StepPlan::Continue => {
                    warn!(
                        "[主题 {}] ⚠️ 第 {} 页未找到 Next 按钮",
                        ctx.topic_index, page
                    );
                }
                StepPlan::FinishEarly => {
                    warn!(
                        "[主题 {}] ⚠️ 第 {} 页未找到 Next 按钮，提前结束主题",
                        ctx.topic_index, page
                    );
                    return Ok(WalkOutcome::StoppedEarly { last_page: page });
                }
            }
        }

        Ok(WalkOutcome::Completed {
            pages_visited: topic.page_count,
        })
    }
}

// ========== 日志辅助函数 ==========

fn log_page_banner(ctx: &TopicCtx, topic_name: &str, page: usize, total: usize) {
    info!(
        "\n=== 类别: {} | 主题: {} | 第 {}/{} 页 ===",
        ctx.category_name, topic_name, page, total
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_page_with_next_advances() {
        assert_eq!(StepPlan::decide(true, false, true), StepPlan::Advance);
    }

    #[test]
    fn test_last_page_finishes_regardless() {
        assert_eq!(StepPlan::decide(true, true, false), StepPlan::Finish);
        assert_eq!(StepPlan::decide(false, true, true), StepPlan::Finish);
    }

    #[test]
    fn test_normal_page_without_next_finishes_early() {
        // 无法确定后面还有页，不能继续
        assert_eq!(StepPlan::decide(true, false, false), StepPlan::FinishEarly);
    }

    #[test]
    fn test_empty_page_with_next_still_advances() {
        // 空页的恢复路径：页面结构异常但翻页仍可用
        assert_eq!(StepPlan::decide(false, false, true), StepPlan::Advance);
    }

    #[test]
    fn test_empty_page_without_next_continues() {
        // 单个坏页不终止整个主题
        assert_eq!(StepPlan::decide(false, false, false), StepPlan::Continue);
    }
}
