//! 单个主题处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块负责处理单个主题的完整生命周期，是主题级别的编排器。
//!
//! ## 核心功能
//!
//! 1. **构建上下文**：类别名称先用主题名占位
//! 2. **流程调度**：创建 `PageWalker` 并注入累积回调
//! 3. **记录累积**：按页追加，保持页面内出现顺序
//! 4. **结果导出**：走完全部页后写出本主题的 CSV 文件
//! 5. **统计输出**：记录页数与导出行数

use anyhow::Result;
use tracing::{info, warn};

use crate::config::Config;
use crate::infrastructure::PageDriver;
use crate::models::{QuestionRecord, TopicSpec};
use crate::services::CsvExporter;
use crate::workflow::{PageWalker, TopicCtx, WalkOutcome};

/// 处理单个主题
///
/// # 参数
/// - `driver`: 页面驱动（持有 page）
/// - `topic`: 主题数据
/// - `topic_index`: 主题索引（用于日志，从 1 开始）
/// - `config`: 配置
///
/// # 返回
/// 返回导出的记录数
pub async fn process_topic(
    driver: &PageDriver,
    topic: &TopicSpec,
    topic_index: usize,
    config: &Config,
) -> Result<usize> {
    log_topic_start(topic_index, topic);

    // 每个主题的上下文与累积器都从初始值开始，主题之间互不影响
    let mut ctx = TopicCtx::new(topic_index, topic.name.clone());
    let mut records: Vec<QuestionRecord> = Vec::new();

    let walker = PageWalker::new(config);
    let outcome = walker
        .walk(driver, topic, &mut ctx, |page_records| {
            records.extend(page_records);
        })
        .await?;

    match outcome {
        WalkOutcome::Completed { pages_visited } => {
            info!(
                "[主题 {}] 全部 {} 页处理完成",
                topic_index, pages_visited
            );
        }
        WalkOutcome::StoppedEarly { last_page } => {
            warn!(
                "[主题 {}] ⚠️ 在第 {}/{} 页提前结束",
                topic_index, last_page, topic.page_count
            );
        }
    }

    // 导出本主题累积的全部记录
    let exporter = CsvExporter::new(config);
    let path = exporter.export(topic, &records)?;

    log_topic_complete(topic_index, topic, records.len(), &path.display().to_string());

    Ok(records.len())
}

// ========== 日志辅助函数 ==========

fn log_topic_start(topic_index: usize, topic: &TopicSpec) {
    info!("[主题 {}] 开始处理", topic_index);
    info!("[主题 {}] 名称: {}", topic_index, topic.name);
    info!("[主题 {}] 计划页数: {}", topic_index, topic.page_count);
}

fn log_topic_complete(topic_index: usize, topic: &TopicSpec, saved: usize, path: &str) {
    info!(
        "[主题 {}] ✅ 已保存 {} 道题目: {} → {}",
        topic_index, saved, topic.name, path
    );
}
