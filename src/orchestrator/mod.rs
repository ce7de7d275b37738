//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责主题的顺序处理和流程调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `app` - 应用生命周期
//! - 管理应用生命周期（初始化、运行、清理）
//! - 加载主题列表（Vec<TopicSpec>）
//! - 顺序处理主题（无并发）
//! - 管理浏览器资源（Browser、PageDriver）
//! - 输出全局统计信息
//!
//! ### `topic_processor` - 单个主题处理器
//! - 走完单个主题的所有页
//! - 创建并驱动 PageWalker
//! - 累积提取到的记录
//! - 导出本主题的 CSV 文件
//! - 输出单个主题的统计信息
//!
//! ## 层次关系
//!
//! ```text
//! app (处理 Vec<TopicSpec>)
//!     ↓
//! topic_processor (处理单个 TopicSpec)
//!     ↓
//! workflow::PageWalker (处理单个主题的页序列)
//!     ↓
//! services (能力层：extract / export)
//!     ↓
//! infrastructure (基础设施：PageDriver)
//! ```
//!
//! ## 设计原则
//!
//! 1. **单一职责**：app 管全局，topic_processor 管单个主题
//! 2. **资源隔离**：只有编排层持有 Browser 和 PageDriver
//! 3. **向下依赖**：编排层 → workflow → services → infrastructure
//! 4. **无业务逻辑**：只做调度和统计，不做具体提取判断

pub mod app;
pub mod topic_processor;

// 重新导出主要类型
pub use app::App;
pub use topic_processor::process_topic;
