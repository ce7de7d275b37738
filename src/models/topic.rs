//! 抓取主题
//!
//! 封装"抓哪个类别、翻多少页"这一信息

use std::fmt::Display;

/// 抓取主题
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicSpec {
    /// 主题名称（自由文本，允许空格）
    pub name: String,

    /// 要抓取的页数（正整数）
    pub page_count: usize,
}

impl TopicSpec {
    /// 创建新的抓取主题
    pub fn new(name: impl Into<String>, page_count: usize) -> Self {
        Self {
            name: name.into(),
            page_count,
        }
    }

    /// 主题首页 URL：名称小写、空格替换为连字符，拼接到基础路径
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}/", base_url, self.name.to_lowercase().replace(' ', "-"))
    }

    /// 导出文件名主干：名称小写、空格替换为下划线
    pub fn file_stem(&self) -> String {
        self.name.to_lowercase().replace(' ', "_")
    }
}

impl Display for TopicSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} 页)", self.name, self.page_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_slug() {
        let topic = TopicSpec::new("Problems on Trains", 3);
        assert_eq!(
            topic.url("https://www.indiabix.com/aptitude/"),
            "https://www.indiabix.com/aptitude/problems-on-trains/"
        );
    }

    #[test]
    fn test_file_stem() {
        let topic = TopicSpec::new("Problems on Trains", 3);
        assert_eq!(topic.file_stem(), "problems_on_trains");

        let single = TopicSpec::new("Percentages", 2);
        assert_eq!(single.file_stem(), "percentages");
    }
}
