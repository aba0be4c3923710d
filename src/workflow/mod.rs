//! 流程层（Workflow Layer）
//!
//! 定义"一个年份"的完整处理流程：
//! - `harvest_flow` - 卷 → 分册 → 提取 → 累积 → 落盘
//! - `download_flow` - 分组 → 下载 → 失败记录
//!
//! 流程层不持有任何资源，只依赖业务能力（services）

pub mod download_flow;
pub mod harvest_flow;

pub use download_flow::{DownloadFlow, DownloadStats};
pub use harvest_flow::HarvestFlow;
