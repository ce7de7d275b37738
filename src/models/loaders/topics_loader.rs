//! 主题列表加载
//!
//! 每行 `名称,页数`，空行忽略，无效行警告后跳过

use crate::error::{AppResult, FileError};
use crate::models::topic::TopicSpec;
use tokio::fs;
use tracing::warn;

/// 解析单行 `名称,页数`
///
/// # 参数
/// - `line_no`: 行号（用于错误信息，从 1 开始）
/// - `line`: 已去除首尾空白的非空行
pub fn parse_topic_line(line_no: usize, line: &str) -> Result<TopicSpec, FileError> {
    let invalid = || FileError::TopicLineInvalid {
        line: line_no,
        content: line.to_string(),
    };

    let (name, pages) = line.split_once(',').ok_or_else(invalid)?;
    let name = name.trim();
    if name.is_empty() {
        return Err(invalid());
    }

    let page_count: usize = pages.trim().parse().map_err(|_| invalid())?;
    if page_count == 0 {
        return Err(invalid());
    }

    Ok(TopicSpec::new(name, page_count))
}

/// 从文件加载所有主题
pub async fn load_topics(path: &str) -> AppResult<Vec<TopicSpec>> {
    let content = fs::read_to_string(path).await.map_err(|e| FileError::ReadFailed {
        path: path.to_string(),
        source: e,
    })?;

    let mut topics = Vec::new();
    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        match parse_topic_line(idx + 1, line) {
            Ok(topic) => {
                tracing::info!("正在加载主题: {}", topic);
                topics.push(topic);
            }
            Err(e) => warn!("跳过无效的主题行: {}", e),
        }
    }

    Ok(topics)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_line() {
        let topic = parse_topic_line(1, "Problems on Trains,3").unwrap();
        assert_eq!(topic.name, "Problems on Trains");
        assert_eq!(topic.page_count, 3);
    }

    #[test]
    fn test_parse_trims_fields() {
        let topic = parse_topic_line(1, "Percentages , 2").unwrap();
        assert_eq!(topic.name, "Percentages");
        assert_eq!(topic.page_count, 2);
    }

    #[test]
    fn test_parse_rejects_missing_comma() {
        assert!(parse_topic_line(1, "Percentages").is_err());
    }

    #[test]
    fn test_parse_rejects_bad_count() {
        assert!(parse_topic_line(1, "Percentages,two").is_err());
        assert!(parse_topic_line(1, "Percentages,0").is_err());
        assert!(parse_topic_line(1, ",3").is_err());
    }
}
