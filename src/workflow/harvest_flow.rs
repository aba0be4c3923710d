//! 采集流程 - 流程层
//!
//! 核心职责：定义"一个年份"的完整采集流程
//!
//! 流程顺序：
//! 1. 列出该年份的全部卷
//! 2. 每卷探测分册；有分册则逐册加载，无分册则整卷加载一次
//! 3. 提取判例并附加 年份/卷/分册 坐标
//! 4. 全卷处理完后一次性落盘该年份的数据表

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::models::CaseRecord;
use crate::services::extractor;
use crate::services::{PageController, TableStore};
use crate::utils::logging::truncate_text;

/// 年份采集流程
pub struct HarvestFlow<'a> {
    controller: &'a PageController,
    store: &'a TableStore,
    verbose_logging: bool,
}

impl<'a> HarvestFlow<'a> {
    pub fn new(controller: &'a PageController, store: &'a TableStore, verbose_logging: bool) -> Self {
        Self {
            controller,
            store,
            verbose_logging,
        }
    }

    /// 采集一个年份并落盘，返回记录条数
    ///
    /// 数据表在年份末尾整体写入，年份中途失败不留半成品
    pub async fn run_year(&self, year: &str) -> Result<usize> {
        info!("📅 开始采集年份 {}", year);

        let mut table: Vec<CaseRecord> = Vec::new();

        let volumes = self.controller.list_volumes(year).await?;
        info!("年份 {} 共 {} 卷: {:?}", year, volumes.len(), volumes);

        for volume in &volumes {
            info!("卷: {}", volume);

            let parts = self.controller.list_parts(year, volume).await;
            if parts.is_empty() {
                self.collect_listing(year, volume, None, &mut table).await;
            } else {
                info!("卷 {} 的分册: {:?}", volume, parts);
                for part in &parts {
                    info!("分册: {}", part);
                    self.collect_listing(year, volume, Some(part), &mut table).await;
                }
            }
        }

        self.store.save_year(year, &table)?;
        info!(
            "✅ 年份 {} 采集完成，共 {} 条记录，已写入 {}",
            year,
            table.len(),
            self.store.year_path(year).display()
        );

        Ok(table.len())
    }

    /// 加载一张列表页并把提取结果并入年份数据表
    ///
    /// 加载失败按零条记录处理，继续后面的卷/分册
    async fn collect_listing(
        &self,
        year: &str,
        volume: &str,
        part: Option<&str>,
        table: &mut Vec<CaseRecord>,
    ) {
        match self.controller.load_listing(year, volume, part).await {
            Some(document) => {
                let cases = extractor::extract_cases(&document);
                info!("找到 {} 条判例", cases.len());

                if self.verbose_logging {
                    for case in &cases {
                        debug!("  - {}", truncate_text(&case.parties, 60));
                    }
                }

                table.extend(
                    cases
                        .into_iter()
                        .map(|case| CaseRecord::from_case(case, year, volume, part)),
                );
            }
            None => warn!(
                "列表页加载失败: 年份 {} 卷 {} 分册 {:?}，按零条记录处理",
                year, volume, part
            ),
        }
    }
}
