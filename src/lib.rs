//! # Judgment Harvester
//!
//! 一个用于采集判例档案网站元数据并批量下载判决书 PDF 的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（Page），只暴露能力
//! - `JsExecutor` - 唯一的 page owner，提供 eval() 与条件等待能力
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单一职责
//! - `PageController` - 年份/卷/分册级联下拉框的导航能力
//! - `extractor` - 从页面快照提取判例记录
//! - `TableStore` - 按年份读写 CSV 数据表
//! - `FailureLog` - 追加失败下载记录
//! - `Downloader` - 限时 HTTP 下载能力
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个年份"的完整处理流程
//! - `HarvestFlow` - 采集流程（卷 → 分册 → 提取 → 累积 → 落盘）
//! - `DownloadFlow` - 下载流程（分组 → 下载 → 失败记录）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/app` - 应用生命周期，遍历年份，管理浏览器资源
//!
//! ## 模块结构

pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use browser::launch_headless_browser;
pub use config::{Config, RunMode};
pub use error::{AppError, AppResult};
pub use infrastructure::{JsExecutor, WaitOutcome};
pub use models::{CaseData, CaseRecord, FailureLogEntry, ListingDocument};
pub use orchestrator::App;
pub use services::{Downloader, FailureLog, PageController, TableStore};
pub use workflow::{DownloadFlow, HarvestFlow};
