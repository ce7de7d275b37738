//! 单页题目提取服务 - 业务能力层
//!
//! 只负责"从当前页面提取题目"能力，不关心翻页流程

use std::time::Duration;

use anyhow::Result;
use chromiumoxide::Element;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::BrowserError;
use crate::infrastructure::PageDriver;
use crate::models::{PageBatch, QuestionRecord, DEFAULT_EXPLANATION, MISSING_VALUE, OPTION_COUNT};

/// 题干节点
const QUESTION_SELECTOR: &str = ".bix-td-qtxt";
/// 选项表格
const OPTION_BLOCK_SELECTOR: &str = ".bix-tbl-options";
/// 选项表格内的行
const OPTION_ROW_SELECTOR: &str = ".bix-opt-row";
/// 行内的选项值
const OPTION_VALUE_SELECTOR: &str = ".bix-td-option-val";
/// 隐藏答案节点（value 属性存答案标签）
const HIDDEN_ANSWER_SELECTOR: &str = "input.jq-hdnakq";
/// 解析容器（默认折叠）
const EXPLANATION_SELECTOR: &str = "div.bix-div-answer";
/// 解析容器内的描述文本
const EXPLANATION_TEXT_SELECTOR: &str = ".bix-ans-description";
/// 页面标题（类别名称）
const CATEGORY_SELECTOR: &str = "div.pagehead h1";

/// 折叠标记 class
const COLLAPSED_CLASS: &str = "collapse";
/// 展开标记 class
const SHOWN_CLASS: &str = "show";

/// 单页提取结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// 按页面出现顺序提取到的记录
    Records(Vec<QuestionRecord>),
    /// 等待题干节点超时（页面无题目）
    Empty,
}

/// 单页题目提取服务
///
/// 职责：
/// - 定位四组平行集合（题干 / 选项表 / 隐藏答案 / 解析容器）
/// - 按位置对齐为 QuestionRecord，缺失处用占位符
/// - 只处理单个页面
/// - 不关心页码与翻页顺序
pub struct PageExtractor {
    reveal_delay: Duration,
    verbose_logging: bool,
}

impl PageExtractor {
    /// 创建新的提取服务
    pub fn new(config: &Config) -> Self {
        Self {
            reveal_delay: Duration::from_millis(config.reveal_delay_ms),
            verbose_logging: config.verbose_logging,
        }
    }

    /// 解析类别名称（每个主题只调用一次）
    ///
    /// 等待页面标题出现并读取文本；超时或读取失败时回退到主题名
    pub async fn resolve_category(&self, driver: &PageDriver, fallback: &str) -> String {
        match driver.wait_for_all(CATEGORY_SELECTOR).await {
            Ok(headings) => match driver.read_text(&headings[0], "类别标题").await {
                Ok(text) if !text.is_empty() => text,
                _ => fallback.to_string(),
            },
            Err(e) => {
                debug!("未找到类别标题，回退到主题名: {}", e);
                fallback.to_string()
            }
        }
    }

    /// 提取当前页面的所有题目
    ///
    /// # 参数
    /// - `driver`: 页面驱动
    /// - `category_name`: 已解析的类别名称（整个主题内相同）
    ///
    /// # 返回
    /// 返回提取到的记录；等待题干超时返回 `PageOutcome::Empty`
    pub async fn extract(&self, driver: &PageDriver, category_name: &str) -> Result<PageOutcome> {
        // 题干必须等到；其余三组集合直接查找，允许为空
        let questions = match driver.wait_for_all(QUESTION_SELECTOR).await {
            Ok(elements) => elements,
            Err(BrowserError::WaitTimeout { .. }) => return Ok(PageOutcome::Empty),
            Err(e) => return Err(e.into()),
        };
        let option_blocks = driver.find_all(OPTION_BLOCK_SELECTOR).await;
        let hidden_answers = driver.find_all(HIDDEN_ANSWER_SELECTOR).await;
        let explanation_divs = driver.find_all(EXPLANATION_SELECTOR).await;

        // 展开所有折叠的解析容器后再读取
        for div in &explanation_divs {
            driver.reveal(div, COLLAPSED_CLASS, SHOWN_CLASS).await;
        }
        sleep(self.reveal_delay).await;

        let batch = self
            .collect_batch(
                driver,
                &questions,
                &option_blocks,
                &hidden_answers,
                &explanation_divs,
            )
            .await;

        let records = Self::align(category_name, batch);

        if self.verbose_logging {
            for (i, record) in records.iter().enumerate() {
                log_question(i + 1, record);
            }
        }

        Ok(PageOutcome::Records(records))
    }

    /// 逐个读取四组集合，失败处就地替换为占位符
    async fn collect_batch(
        &self,
        driver: &PageDriver,
        questions: &[Element],
        option_blocks: &[Element],
        hidden_answers: &[Element],
        explanation_divs: &[Element],
    ) -> PageBatch {
        let mut batch = PageBatch::default();

        for question in questions {
            match driver.read_text(question, "题干").await {
                Ok(text) => batch.questions.push(text),
                Err(e) => {
                    warn!("读取题干失败，使用占位符: {}", e);
                    batch.questions.push(String::new());
                }
            }
        }

        for block in option_blocks {
            batch
                .option_blocks
                .push(self.collect_options(driver, block).await);
        }

        for answer in hidden_answers {
            let value = driver
                .read_attribute(answer, "value", "隐藏答案")
                .await
                .ok()
                .flatten()
                .map(|v| v.trim().to_string());
            batch.answers.push(value);
        }

        for div in explanation_divs {
            batch
                .explanations
                .push(self.read_explanation(driver, div).await);
        }

        batch
    }

    /// 枚举选项表格的行并读取选项值
    ///
    /// 单行读取失败追加占位符而不是跳过（保持与选项标签 A-D 的位置对应）
    async fn collect_options(&self, driver: &PageDriver, block: &Element) -> Vec<String> {
        let mut values = Vec::new();
        for row in driver.find_in(block, OPTION_ROW_SELECTOR).await {
            let value_nodes = driver.find_in(&row, OPTION_VALUE_SELECTOR).await;
            let value = match value_nodes.first() {
                Some(node) => driver
                    .read_text(node, "选项值")
                    .await
                    .unwrap_or_else(|_| MISSING_VALUE.to_string()),
                None => MISSING_VALUE.to_string(),
            };
            values.push(value);
        }
        values
    }

    /// 读取解析容器内的描述文本，缺失或失败返回 None
    async fn read_explanation(&self, driver: &PageDriver, div: &Element) -> Option<String> {
        let nodes = driver.find_in(div, EXPLANATION_TEXT_SELECTOR).await;
        let node = nodes.first()?;
        driver.read_text(node, "解析描述").await.ok()
    }

    /// 对齐四组平行集合为记录列表（纯函数）
    ///
    /// 槽位数取题干与选项表中较短的一组；答案与解析按索引独立取值，
    /// 缺失的槽位用占位符 / 默认文本填充
    pub fn align(category_name: &str, batch: PageBatch) -> Vec<QuestionRecord> {
        let slot_count = batch.questions.len().min(batch.option_blocks.len());
        let mut records = Vec::with_capacity(slot_count);

        for i in 0..slot_count {
            let question_text = match batch.questions[i].as_str() {
                "" => MISSING_VALUE.to_string(),
                text => text.to_string(),
            };

            // 补齐或截断到恰好 4 个选项槽位
            let mut option_values = batch.option_blocks[i].clone().into_iter();
            let options: [String; OPTION_COUNT] = std::array::from_fn(|_| {
                option_values
                    .next()
                    .unwrap_or_else(|| MISSING_VALUE.to_string())
            });

            let correct_answer = batch
                .answers
                .get(i)
                .and_then(|v| v.clone())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| MISSING_VALUE.to_string());

            let explanation = batch
                .explanations
                .get(i)
                .and_then(|v| v.clone())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_EXPLANATION.to_string());

            records.push(QuestionRecord {
                category_name: category_name.to_string(),
                question_text,
                options,
                correct_answer,
                explanation,
            });
        }

        records
    }
}

// ========== 日志辅助函数 ==========

/// 显示单道题目的提取结果（题干截断到 80 字符）
fn log_question(index: usize, record: &QuestionRecord) {
    let preview = if record.question_text.chars().count() > 80 {
        record.question_text.chars().take(80).collect::<String>() + "..."
    } else {
        record.question_text.clone()
    };
    info!("Q{}: {}", index, preview);
    info!("  答案: {} | 类别: {}", record.correct_answer, record.category_name);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(
        questions: &[&str],
        option_blocks: &[&[&str]],
        answers: &[Option<&str>],
        explanations: &[Option<&str>],
    ) -> PageBatch {
        PageBatch {
            questions: questions.iter().map(|s| s.to_string()).collect(),
            option_blocks: option_blocks
                .iter()
                .map(|block| block.iter().map(|s| s.to_string()).collect())
                .collect(),
            answers: answers.iter().map(|v| v.map(str::to_string)).collect(),
            explanations: explanations.iter().map(|v| v.map(str::to_string)).collect(),
        }
    }

    #[test]
    fn test_align_pairs_by_position() {
        let batch = batch(
            &["Q1", "Q2"],
            &[&["10", "20", "30", "40"], &["1", "2", "3", "4"]],
            &[Some("A"), Some("C")],
            &[Some("Add the two rates."), Some("Divide by the base.")],
        );
        let records = PageExtractor::align("Percentages", batch);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].question_text, "Q1");
        assert_eq!(records[0].options[0], "10");
        assert_eq!(records[0].correct_answer, "A");
        assert_eq!(records[1].correct_answer, "C");
        assert!(records.iter().all(|r| r.category_name == "Percentages"));
    }

    #[test]
    fn test_align_truncates_to_shorter_of_questions_and_options() {
        // 第三道题缺少选项表：槽位数取两组中较短的一组
        let batch = batch(
            &["Q1", "Q2", "Q3"],
            &[&["a", "b", "c", "d"], &["e", "f", "g", "h"]],
            &[],
            &[],
        );
        let records = PageExtractor::align("Logarithms", batch);
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_align_always_four_option_slots() {
        let batch = batch(
            &["Q1", "Q2"],
            &[&["a", "b"], &["a", "b", "c", "d", "e"]],
            &[],
            &[],
        );
        let records = PageExtractor::align("Trains", batch);

        assert_eq!(records[0].options.len(), 4);
        assert_eq!(records[0].options[2], MISSING_VALUE);
        assert_eq!(records[0].options[3], MISSING_VALUE);
        assert_eq!(records[1].options.len(), 4);
        assert_eq!(records[1].options[3], "d");
    }

    #[test]
    fn test_align_missing_answer_index_is_placeholder() {
        // 隐藏答案集合比题目短：索引 2 无对应答案，其余不受影响
        let batch = batch(
            &["Q1", "Q2", "Q3"],
            &[&["a", "b", "c", "d"], &["a", "b", "c", "d"], &["a", "b", "c", "d"]],
            &[Some("B"), Some("D")],
            &[],
        );
        let records = PageExtractor::align("Ages", batch);

        assert_eq!(records[0].correct_answer, "B");
        assert_eq!(records[1].correct_answer, "D");
        assert_eq!(records[2].correct_answer, MISSING_VALUE);
    }

    #[test]
    fn test_align_empty_explanation_gets_default() {
        let batch = batch(
            &["Q1", "Q2", "Q3"],
            &[&["a", "b", "c", "d"], &["a", "b", "c", "d"], &["a", "b", "c", "d"]],
            &[],
            &[Some(""), None, Some("Use the rule of three.")],
        );
        let records = PageExtractor::align("Ratios", batch);

        assert_eq!(records[0].explanation, DEFAULT_EXPLANATION);
        assert_eq!(records[1].explanation, DEFAULT_EXPLANATION);
        assert_eq!(records[2].explanation, "Use the rule of three.");
    }

    #[test]
    fn test_align_unreadable_option_row_keeps_siblings() {
        // 采集阶段已把读取失败的行替换为占位符，对齐后其余槽位不受影响
        let batch = batch(
            &["Q1"],
            &[&["a", MISSING_VALUE, "c", "d"]],
            &[Some("C")],
            &[],
        );
        let records = PageExtractor::align("Averages", batch);

        assert_eq!(records[0].options[0], "a");
        assert_eq!(records[0].options[1], MISSING_VALUE);
        assert_eq!(records[0].options[2], "c");
        assert_eq!(records[0].options[3], "d");
    }

    #[test]
    fn test_align_blank_question_text_gets_placeholder() {
        let batch = batch(&[""], &[&["a", "b", "c", "d"]], &[], &[]);
        let records = PageExtractor::align("Interest", batch);
        assert_eq!(records[0].question_text, MISSING_VALUE);
    }

    #[test]
    fn test_align_answer_placeholder_is_idempotent() {
        let make = || {
            batch(
                &["Q1", "Q2"],
                &[&["a", "b", "c", "d"], &["a", "b", "c", "d"]],
                &[Some("A")],
                &[],
            )
        };
        let first = PageExtractor::align("Numbers", make());
        let second = PageExtractor::align("Numbers", make());
        assert_eq!(first, second);
        assert_eq!(first[1].correct_answer, MISSING_VALUE);
    }
}
