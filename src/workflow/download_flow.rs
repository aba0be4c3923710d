//! 下载流程 - 流程层
//!
//! 核心职责：把一个年份的数据表物化为本地 PDF 文件树
//!
//! 目录布局：`<root>/<年份>/<卷>[/<分册>]/<净化后的当事人>.pdf`
//!
//! 分组策略：先按卷分组再按分册分组；只要某卷里有一行缺少分册值，
//! 整卷按无分册处理（所有行直接落在卷目录下），不在同一卷里混用
//! 两种布局。净化后文件名相同的两条记录会互相覆盖，这是已知限制。

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{error, info};

use crate::models::{CaseRecord, FailureLogEntry};
use crate::services::{Downloader, FailureLog, TableStore};
use crate::utils::logging::truncate_text;
use crate::utils::sanitize::sanitize_filename;

/// 单个年份的下载统计
#[derive(Debug, Default)]
pub struct DownloadStats {
    pub downloaded: usize,
    pub failed: usize,
    pub total: usize,
}

/// 一条待下载任务
///
/// `folder` 是年份目录下的相对路径（卷，或 卷/分册）；
/// `part` 是失败记录里要写的分册值，整卷按无分册处理时为 None
#[derive(Debug, Clone)]
pub struct DownloadTask {
    pub folder: PathBuf,
    pub part: Option<String>,
    pub record: CaseRecord,
}

/// 把一个年份的数据表展开为顺序任务列表
///
/// 卷与分册都保持首次出现的顺序；展开前后记录条数不变
pub fn plan_year(records: &[CaseRecord]) -> Vec<DownloadTask> {
    let mut volumes: Vec<&str> = Vec::new();
    for record in records {
        if !volumes.contains(&record.volume.as_str()) {
            volumes.push(&record.volume);
        }
    }

    let mut tasks = Vec::new();
    for volume in volumes {
        let rows: Vec<&CaseRecord> = records.iter().filter(|r| r.volume == volume).collect();

        // 只要有一行缺少分册，整卷按无分册处理
        if rows.iter().any(|r| r.part.is_none()) {
            for row in &rows {
                tasks.push(DownloadTask {
                    folder: PathBuf::from(volume),
                    part: None,
                    record: (*row).clone(),
                });
            }
            continue;
        }

        let mut parts: Vec<&str> = Vec::new();
        for part in rows.iter().filter_map(|r| r.part.as_deref()) {
            if !parts.contains(&part) {
                parts.push(part);
            }
        }
        for part in parts {
            for row in rows.iter().filter(|r| r.part.as_deref() == Some(part)) {
                tasks.push(DownloadTask {
                    folder: PathBuf::from(volume).join(part),
                    part: Some(part.to_string()),
                    record: (*row).clone(),
                });
            }
        }
    }

    tasks
}

/// 年份下载流程
pub struct DownloadFlow<'a> {
    store: &'a TableStore,
    failure_log: &'a FailureLog,
    downloader: &'a Downloader,
    download_root: PathBuf,
}

impl<'a> DownloadFlow<'a> {
    pub fn new(
        store: &'a TableStore,
        failure_log: &'a FailureLog,
        downloader: &'a Downloader,
        download_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            store,
            failure_log,
            downloader,
            download_root: download_root.into(),
        }
    }

    /// 下载一个年份数据表引用的全部 PDF
    ///
    /// 单条记录失败只记失败日志并继续；数据表读不出来才向上传播
    pub async fn run_year(&self, year: &str) -> Result<DownloadStats> {
        let records = self.store.load_year(year)?;

        let year_dir = self.download_root.join(year);
        create_folder(&year_dir);

        let tasks = plan_year(&records);
        let mut stats = DownloadStats {
            total: tasks.len(),
            ..Default::default()
        };

        for task in &tasks {
            let dir = year_dir.join(&task.folder);
            create_folder(&dir);
            self.download_one(year, task, &dir, &mut stats).await;
        }

        Ok(stats)
    }

    /// 下载单条记录并在失败时追加失败日志
    async fn download_one(
        &self,
        year: &str,
        task: &DownloadTask,
        dir: &Path,
        stats: &mut DownloadStats,
    ) {
        let record = &task.record;
        let parties = sanitize_filename(&record.parties);
        let save_path = dir.join(format!("{}.pdf", parties));

        match task.part.as_deref() {
            Some(part) => info!(
                "处理中: 年份 {} 卷 {} 分册 {} | {}",
                year,
                record.volume,
                part,
                truncate_text(&record.pdf_url, 80)
            ),
            None => info!(
                "处理中: 年份 {} 卷 {} | {}",
                year,
                record.volume,
                truncate_text(&record.pdf_url, 80)
            ),
        }

        let succeeded = match self.downloader.fetch(&record.pdf_url).await {
            Ok(bytes) => match fs::write(&save_path, &bytes) {
                Ok(()) => {
                    info!("✓ 已下载: {}", save_path.display());
                    true
                }
                Err(e) => {
                    error!("保存文件失败 {}: {}", save_path.display(), e);
                    false
                }
            },
            Err(e) => {
                error!("下载失败 {}: {}", record.pdf_url, e);
                false
            }
        };

        if succeeded {
            stats.downloaded += 1;
        } else {
            stats.failed += 1;
            self.log_failure(year, task, &parties);
        }
    }

    fn log_failure(&self, year: &str, task: &DownloadTask, parties: &str) {
        let entry = FailureLogEntry::new(
            year,
            &task.record.volume,
            task.part.as_deref(),
            parties,
            &task.record.pdf_url,
        );
        match self.failure_log.append(&entry) {
            Ok(()) => info!("失败记录已写入: {}", self.failure_log.path().display()),
            Err(e) => error!("写入失败记录出错: {}", e),
        }
    }
}

/// 幂等地创建目录，失败只记日志（对应记录随后会以写文件失败告终）
fn create_folder(path: &Path) {
    if let Err(e) = fs::create_dir_all(path) {
        error!("创建目录失败 {}: {}", path.display(), e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(volume: &str, part: Option<&str>, parties: &str) -> CaseRecord {
        CaseRecord {
            year: "2001".to_string(),
            volume: volume.to_string(),
            part: part.map(|p| p.to_string()),
            parties: parties.to_string(),
            case_number: "N/A".to_string(),
            date: "N/A".to_string(),
            pdf_url: format!("https://example.org/{}.pdf", parties),
        }
    }

    #[test]
    fn test_plan_groups_parts_into_subfolders() {
        let records = vec![
            record("6", Some("1"), "a"),
            record("6", Some("1"), "b"),
            record("6", Some("2"), "c"),
        ];
        let tasks = plan_year(&records);

        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks[0].folder, PathBuf::from("6").join("1"));
        assert_eq!(tasks[1].folder, PathBuf::from("6").join("1"));
        assert_eq!(tasks[2].folder, PathBuf::from("6").join("2"));
        assert_eq!(tasks[0].part.as_deref(), Some("1"));
    }

    #[test]
    fn test_mixed_part_volume_collapses_to_volume_folder() {
        // 卷内既有带分册的行又有缺分册的行：整卷按无分册处理，
        // 带分册的行也直接落在卷目录下
        let records = vec![
            record("5", Some("1"), "a"),
            record("5", None, "b"),
            record("5", Some("2"), "c"),
        ];
        let tasks = plan_year(&records);

        assert_eq!(tasks.len(), 3);
        for task in &tasks {
            assert_eq!(task.folder, PathBuf::from("5"));
            assert_eq!(task.part, None);
        }
    }

    #[test]
    fn test_plan_preserves_record_count_across_volumes() {
        let records = vec![
            record("5", Some("1"), "a"),
            record("5", None, "b"),
            record("6", Some("1"), "c"),
            record("6", Some("2"), "d"),
            record("7", None, "e"),
        ];
        let tasks = plan_year(&records);
        assert_eq!(tasks.len(), records.len());
    }

    #[test]
    fn test_plan_keeps_first_seen_volume_order() {
        let records = vec![
            record("9", None, "a"),
            record("2", None, "b"),
            record("9", None, "c"),
        ];
        let tasks = plan_year(&records);

        assert_eq!(tasks[0].folder, PathBuf::from("9"));
        assert_eq!(tasks[1].folder, PathBuf::from("9"));
        assert_eq!(tasks[2].folder, PathBuf::from("2"));
    }
}
