//! 应用编排 - 编排层

use std::time::Duration;

use anyhow::Result;
use chromiumoxide::Browser;
use tracing::{error, info, warn};

use crate::browser;
use crate::config::Config;
use crate::infrastructure::JsExecutor;
use crate::services::{Downloader, FailureLog, PageController, TableStore};
use crate::workflow::{DownloadFlow, DownloadStats, HarvestFlow};

/// 采集会话
///
/// Browser 只为退出时的清理保留，导航状态全部经由 PageController
struct HarvestSession {
    browser: Browser,
    controller: PageController,
}

/// 应用主结构
pub struct App {
    config: Config,
    session: Option<HarvestSession>,
}

impl App {
    /// 初始化应用
    ///
    /// 浏览器启动失败是唯一致命错误；下载模式不需要浏览器
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let session = if config.run_mode.includes_harvest() {
            let (browser, page) = browser::launch_headless_browser(&config.entry_url).await?;
            let controller = PageController::new(JsExecutor::new(page), &config);
            if !controller.wait_for_ready().await.is_satisfied() {
                warn!("⚠️ 入口页面 body 等待超时，继续尝试采集");
            }
            Some(HarvestSession { browser, controller })
        } else {
            None
        };

        Ok(Self { config, session })
    }

    /// 运行应用主逻辑
    ///
    /// 无论采集/下载是否出错，浏览器会话都会被关闭
    pub async fn run(mut self) -> Result<()> {
        let result = self.run_inner().await;
        self.shutdown().await;
        result
    }

    async fn run_inner(&self) -> Result<()> {
        if self.config.run_mode.includes_harvest() {
            self.harvest().await?;
        }
        if self.config.run_mode.includes_download() {
            self.download().await?;
        }
        Ok(())
    }

    /// 遍历年份采集元数据
    ///
    /// 单个年份失败只记日志并继续，年份之间没有共享状态
    async fn harvest(&self) -> Result<()> {
        let session = match &self.session {
            Some(session) => session,
            None => return Ok(()),
        };

        let store = TableStore::new(&self.config.files_dir);
        let flow = HarvestFlow::new(&session.controller, &store, self.config.verbose_logging);

        let years = if self.config.harvest_years.is_empty() {
            session.controller.list_years().await?
        } else {
            self.config.harvest_years.clone()
        };
        info!("📋 待采集年份: {:?}", years);

        for year in &years {
            match flow.run_year(year).await {
                Ok(count) => info!("年份 {} 完成，{} 条记录", year, count),
                Err(e) => error!("年份 {} 采集失败: {}", year, e),
            }
        }

        Ok(())
    }

    /// 遍历年份下载 PDF
    async fn download(&self) -> Result<()> {
        let store = TableStore::new(&self.config.files_dir);
        let failure_log = FailureLog::new(&self.config.failure_log_path);
        let downloader = Downloader::new(Duration::from_secs(self.config.download_timeout_secs))?;
        let flow = DownloadFlow::new(&store, &failure_log, &downloader, &self.config.download_root);

        let years = if self.config.download_years.is_empty() {
            store.discover_years()
        } else {
            self.config.download_years.clone()
        };
        if years.is_empty() {
            warn!("⚠️ 在 {} 下没有找到待下载的年份数据表", store.files_dir().display());
            return Ok(());
        }
        info!("📋 待下载年份: {:?}", years);

        let mut total = DownloadStats::default();
        for year in &years {
            match flow.run_year(year).await {
                Ok(stats) => {
                    info!(
                        "年份 {} 下载完成: 成功 {}/{}",
                        year, stats.downloaded, stats.total
                    );
                    total.downloaded += stats.downloaded;
                    total.failed += stats.failed;
                    total.total += stats.total;
                }
                Err(e) => error!("年份 {} 下载处理失败: {}", year, e),
            }
        }

        print_download_stats(&total, &self.config.failure_log_path);
        Ok(())
    }

    /// 关闭浏览器会话
    async fn shutdown(&mut self) {
        if let Some(session) = self.session.as_mut() {
            if let Err(e) = session.browser.close().await {
                warn!("关闭浏览器失败: {}", e);
            }
        }
        info!("🏁 运行结束");
    }
}

// ========== 日志辅助函数 ==========

fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 判例采集与下载");
    info!("📌 运行模式: {:?}", config.run_mode);
    info!("🌐 入口: {}", config.entry_url);
    info!("{}", "=".repeat(60));
}

fn print_download_stats(stats: &DownloadStats, failure_log_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部下载完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", stats.downloaded, stats.total);
    info!("❌ 失败: {}", stats.failed);
    info!("{}", "=".repeat(60));
    info!("\n失败记录请查看: {}", failure_log_path);
}
