//! 题目数据模型

/// 每道题的选项槽位数（A-D）
pub const OPTION_COUNT: usize = 4;

/// 缺失值占位符
pub const MISSING_VALUE: &str = "N/A";

/// 默认解析文本
pub const DEFAULT_EXPLANATION: &str = "No explanation available";

/// 单条题目记录
///
/// 不变量：恰好 4 个选项槽位（缺失的用占位符），题干非空，
/// 答案与解析总是有值（可能是占位符/默认文本）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRecord {
    /// 类别名称（整个主题内相同）
    pub category_name: String,
    /// 题干文本
    pub question_text: String,
    /// 按 A-D 顺序的选项值
    pub options: [String; OPTION_COUNT],
    /// 正确答案标签（未解析到时为占位符）
    pub correct_answer: String,
    /// 解析文本（缺失时为默认文本）
    pub explanation: String,
}

/// 单页提取出的四组平行原始集合
///
/// 只在一页的提取过程中存在，各集合长度不保证相等
#[derive(Debug, Default)]
pub struct PageBatch {
    /// 题干文本
    pub questions: Vec<String>,
    /// 每道题的选项值（逐行读取，失败的行已替换为占位符）
    pub option_blocks: Vec<Vec<String>>,
    /// 隐藏答案节点的 value 属性
    pub answers: Vec<Option<String>>,
    /// 解析容器的描述文本
    pub explanations: Vec<Option<String>>,
}
