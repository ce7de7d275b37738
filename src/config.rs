/// 导出列模式
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportSchema {
    /// 简单列（Category / Question / Option A-D / Correct Answer / Explanation）
    Simple,
    /// 数据库列（id / category_id / ... / created_at，带默认值列）
    Database,
}

impl ExportSchema {
    /// 从配置值解析，无法识别返回 None
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "simple" => Some(Self::Simple),
            "database" | "db" | "schema" => Some(Self::Database),
            _ => None,
        }
    }
}

/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 主题列表文件（每行 `名称,页数`）
    pub topics_file: String,
    /// CSV 输出目录
    pub output_dir: String,
    /// 题库站点基础 URL
    pub base_url: String,
    /// 是否连接已有浏览器（否则启动无头浏览器）
    pub use_existing_browser: bool,
    /// 浏览器调试端口（连接模式）
    pub browser_debug_port: u16,
    /// Chrome/Chromium 可执行文件路径（无头模式，缺省时自动探测）
    pub chrome_path: Option<String>,
    /// 元素等待超时（秒）
    pub wait_timeout_secs: u64,
    /// 元素等待的轮询间隔（毫秒）
    pub poll_interval_ms: u64,
    /// 导航/翻页后的等待（毫秒）
    pub settle_delay_ms: u64,
    /// 展开解析内容后的等待（毫秒）
    pub reveal_delay_ms: u64,
    /// 导出列模式
    pub export_schema: ExportSchema,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            topics_file: "topics.txt".to_string(),
            output_dir: "output".to_string(),
            base_url: "https://www.indiabix.com/aptitude/".to_string(),
            use_existing_browser: false,
            browser_debug_port: 9222,
            chrome_path: None,
            wait_timeout_secs: 10,
            poll_interval_ms: 250,
            settle_delay_ms: 2000,
            reveal_delay_ms: 1000,
            export_schema: ExportSchema::Simple,
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            topics_file: std::env::var("TOPICS_FILE").unwrap_or(default.topics_file),
            output_dir: std::env::var("OUTPUT_DIR").unwrap_or(default.output_dir),
            base_url: std::env::var("BASE_URL").unwrap_or(default.base_url),
            use_existing_browser: std::env::var("USE_EXISTING_BROWSER").ok().and_then(|v| v.parse().ok()).unwrap_or(default.use_existing_browser),
            browser_debug_port: std::env::var("BROWSER_DEBUG_PORT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.browser_debug_port),
            chrome_path: std::env::var("CHROME_PATH").ok().or(default.chrome_path),
            wait_timeout_secs: std::env::var("WAIT_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.wait_timeout_secs),
            poll_interval_ms: std::env::var("POLL_INTERVAL_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.poll_interval_ms),
            settle_delay_ms: std::env::var("SETTLE_DELAY_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.settle_delay_ms),
            reveal_delay_ms: std::env::var("REVEAL_DELAY_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.reveal_delay_ms),
            export_schema: std::env::var("EXPORT_SCHEMA").ok().and_then(|v| ExportSchema::parse(&v)).unwrap_or(default.export_schema),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_schema_parse() {
        assert_eq!(ExportSchema::parse("simple"), Some(ExportSchema::Simple));
        assert_eq!(ExportSchema::parse("Database"), Some(ExportSchema::Database));
        assert_eq!(ExportSchema::parse("db"), Some(ExportSchema::Database));
        assert_eq!(ExportSchema::parse("xlsx"), None);
    }
}
