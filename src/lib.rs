//! # Quiz Scrape
//!
//! 一个按主题抓取选择题并导出每主题 CSV 的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（Page），只暴露能力
//! - `PageDriver` - 唯一的 page owner，提供导航/等待/查找/读取/点击能力
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个页面或一批记录
//! - `PageExtractor` - 单页题目提取能力（四组平行集合的对齐）
//! - `CsvExporter` - 写每主题 CSV 能力（两种列模式 + 读回）
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个主题"的完整翻页流程
//! - `TopicCtx` - 上下文封装（topic_index + category_name）
//! - `PageWalker` - 流程编排（导航 → 提取 → 翻页 → 跳过/提前结束）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/app` - 应用生命周期，唯一持有 Browser，顺序处理主题
//! - `orchestrator/topic_processor` - 单个主题处理器，累积记录并导出
//!
//! ## 模块结构

pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod workflow;

// 重新导出常用类型
pub use browser::{connect_existing, launch_headless};
pub use config::{Config, ExportSchema};
pub use error::{AppError, AppResult, BrowserError, FileError};
pub use infrastructure::PageDriver;
pub use models::{load_topics, PageBatch, QuestionRecord, TopicSpec};
pub use orchestrator::{process_topic, App};
pub use services::{CsvExporter, PageExtractor, PageOutcome};
pub use workflow::{PageWalker, TopicCtx, WalkOutcome};
