//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责应用生命周期和年份级调度，是整个系统的"指挥中心"。
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::App (遍历年份，管理浏览器资源)
//!     ↓
//! workflow::HarvestFlow / DownloadFlow (处理单个年份)
//!     ↓
//! services (能力层：导航 / 提取 / 存储 / 下载 / 失败记录)
//!     ↓
//! infrastructure (基础设施：JsExecutor)
//! ```
//!
//! ## 设计原则
//!
//! 1. **资源隔离**：只有编排层持有 Browser，导航状态独占在 PageController 内
//! 2. **年份隔离**：单个年份的任何错误都在年份边界被拦下，不影响其余年份
//! 3. **向下依赖**：编排层 → workflow → services → infrastructure
//! 4. **无业务逻辑**：只做调度和统计，不做具体业务判断

pub mod app;

pub use app::App;
