//! 应用生命周期 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责主题的顺序处理和资源管理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：获取浏览器（启动无头实例或连接调试端口）、创建 PageDriver
//! 2. **主题加载**：读取主题列表文件（`Vec<TopicSpec>`）
//! 3. **顺序处理**：一次一个主题、一次一页，单一控制流
//! 4. **资源管理**：整个运行期唯一持有 Browser，结束时释放
//! 5. **全局统计**：汇总所有主题的处理结果
//!
//! ## 设计特点
//!
//! - **顶层编排**：不处理单个主题的细节
//! - **资源所有者**：唯一持有 Browser 的模块
//! - **失败隔离**：单个主题失败不影响后续主题（各主题是独立的新导航）
//! - **向下委托**：委托 topic_processor 处理单个主题

use anyhow::Result;
use chromiumoxide::Browser;
use tracing::{debug, error, info, warn};

use crate::browser;
use crate::config::Config;
use crate::infrastructure::PageDriver;
use crate::models::load_topics;
use crate::orchestrator::topic_processor;

/// 应用主结构
pub struct App {
    config: Config,
    browser: Browser,
    driver: PageDriver,
    owns_browser: bool,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        // 获取浏览器会话（整个运行期只获取一次）
        let (browser, page, owns_browser) = if config.use_existing_browser {
            let (browser, page) = browser::connect_existing(config.browser_debug_port).await?;
            (browser, page, false)
        } else {
            let (browser, page) = browser::launch_headless(&config).await?;
            (browser, page, true)
        };

        // 创建 PageDriver（持有 page）
        let driver = PageDriver::new(page, &config);

        Ok(Self {
            config,
            browser,
            driver,
            owns_browser,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<()> {
        let topics = load_topics(&self.config.topics_file).await?;

        if topics.is_empty() {
            warn!("⚠️ 主题列表为空，程序结束");
            return Ok(());
        }

        log_topics_loaded(topics.len(), &self.config.output_dir);

        let mut stats = RunStats {
            total: topics.len(),
            ..Default::default()
        };

        // 严格顺序处理：一次一个主题
        for (index, topic) in topics.iter().enumerate() {
            let topic_index = index + 1;

            match topic_processor::process_topic(&self.driver, topic, topic_index, &self.config)
                .await
            {
                Ok(saved) => {
                    stats.succeeded += 1;
                    stats.rows += saved;
                }
                Err(e) => {
                    // 主题级失败只影响本主题，下一个主题是全新的导航
                    error!("[主题 {}] ❌ 处理过程中发生错误: {}", topic_index, e);
                    stats.failed += 1;
                }
            }
        }

        print_final_stats(&stats);

        Ok(())
    }

    /// 释放浏览器资源
    ///
    /// 只关闭由本应用启动的浏览器；连接模式下外部浏览器保持运行
    pub async fn shutdown(mut self) {
        if self.owns_browser {
            if let Err(e) = self.browser.close().await {
                debug!("关闭浏览器失败: {}", e);
            }
            if let Err(e) = self.browser.wait().await {
                debug!("等待浏览器退出失败: {}", e);
            }
            info!("🛑 浏览器已关闭");
        } else {
            info!("保持外部浏览器运行 (端口: {})", self.config.browser_debug_port);
        }
    }
}

/// 运行统计
#[derive(Debug, Default)]
struct RunStats {
    succeeded: usize,
    failed: usize,
    rows: usize,
    total: usize,
}

// ========== 日志辅助函数 ==========

fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 按主题抓取题目模式");
    info!("📋 主题列表: {}", config.topics_file);
    info!("🌐 站点: {}", config.base_url);
    info!("{}", "=".repeat(60));
}

fn log_topics_loaded(total: usize, output_dir: &str) {
    info!("✓ 找到 {} 个待处理的主题", total);
    info!("📁 输出目录: {}", output_dir);
    info!("💡 将逐个主题、逐页顺序处理\n");
}

fn print_final_stats(stats: &RunStats) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", stats.succeeded, stats.total);
    info!("❌ 失败: {}", stats.failed);
    info!("📝 导出记录总数: {}", stats.rows);
    info!("{}", "=".repeat(60));
}
