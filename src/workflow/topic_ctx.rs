//! 主题处理上下文
//!
//! 封装"我正在处理第几个主题、它的类别叫什么"这一信息

use std::fmt::Display;

/// 主题处理上下文
///
/// 类别名称在进入主题时解析一次，整个主题内复用
#[derive(Debug, Clone)]
pub struct TopicCtx {
    /// 主题索引（仅用于日志显示，从 1 开始）
    pub topic_index: usize,

    /// 已解析的类别名称（未解析到时为主题名）
    pub category_name: String,
}

impl TopicCtx {
    /// 创建新的主题上下文
    ///
    /// 类别名称先用主题名占位，由翻页流程在进入主题后解析覆盖
    pub fn new(topic_index: usize, fallback_category: impl Into<String>) -> Self {
        Self {
            topic_index,
            category_name: fallback_category.into(),
        }
    }
}

impl Display for TopicCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[主题 #{} 类别: {}]", self.topic_index, self.category_name)
    }
}
