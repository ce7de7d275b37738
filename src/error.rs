//! 应用程序错误类型
//!
//! 按领域拆分：浏览器错误在基础设施层产生，文件错误在导出与加载时产生。
//! 上层业务代码统一使用 anyhow 包装。

use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 浏览器相关错误
    #[error("浏览器错误: {0}")]
    Browser(#[from] BrowserError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
}

/// 浏览器相关错误
#[derive(Debug, Error)]
pub enum BrowserError {
    /// 连接浏览器失败
    #[error("无法连接到浏览器 (端口: {port}): {source}")]
    ConnectionFailed {
        port: u16,
        #[source]
        source: chromiumoxide::error::CdpError,
    },
    /// 浏览器配置失败
    #[error("浏览器配置失败: {message}")]
    ConfigurationFailed { message: String },
    /// 启动无头浏览器失败
    #[error("启动无头浏览器失败: {source}")]
    LaunchFailed {
        #[source]
        source: chromiumoxide::error::CdpError,
    },
    /// 创建页面失败
    #[error("创建页面失败: {source}")]
    PageCreationFailed {
        #[source]
        source: chromiumoxide::error::CdpError,
    },
    /// 导航失败
    #[error("导航到 {url} 失败: {source}")]
    NavigationFailed {
        url: String,
        #[source]
        source: chromiumoxide::error::CdpError,
    },
    /// 等待元素出现超时
    #[error("等待元素超时 (选择器: {selector}, {timeout_secs} 秒)")]
    WaitTimeout { selector: String, timeout_secs: u64 },
    /// 元素读取失败（节点已从页面分离）
    #[error("元素已失效 ({context}): {source}")]
    StaleElement {
        context: String,
        #[source]
        source: chromiumoxide::error::CdpError,
    },
    /// 执行脚本失败
    #[error("执行脚本失败: {source}")]
    ScriptExecutionFailed {
        #[source]
        source: chromiumoxide::error::CdpError,
    },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 创建目录失败
    #[error("创建目录失败 ({path}): {source}")]
    CreateDirFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// CSV 读写失败
    #[error("CSV 处理失败 ({path}): {source}")]
    CsvFailed {
        path: String,
        #[source]
        source: csv::Error,
    },
    /// 主题行格式无效
    #[error("主题行格式无效 (第 {line} 行): {content}")]
    TopicLineInvalid { line: usize, content: String },
}

/// 应用程序结果类型
pub type AppResult<T> = std::result::Result<T, AppError>;
