//! 失败记录服务 - 业务能力层
//!
//! 只负责"追加失败下载记录"能力，不关心流程

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};
use crate::models::FailureLogEntry;

/// 失败下载记录
///
/// 职责：
/// - 向累积 CSV 文件追加一行失败记录
/// - 文件不存在时先写列头
/// - 从不去重，同一失败重复出现就重复记录
pub struct FailureLog {
    path: PathBuf,
}

impl FailureLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 追加一条失败记录
    pub fn append(&self, entry: &FailureLogEntry) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| AppError::create_dir_failed(parent.display().to_string(), e))?;
            }
        }

        let write_header = !self.path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| AppError::file_write_failed(self.path.display().to_string(), e))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(write_header)
            .from_writer(file);
        writer.serialize(entry)?;
        writer.flush()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> FailureLogEntry {
        FailureLogEntry::new("2001", "5", None, "A v. B", "https://example.org/a.pdf")
    }

    #[test]
    fn test_header_written_once() {
        let dir = tempfile::tempdir().expect("创建临时目录失败");
        let log = FailureLog::new(dir.path().join("not_downloaded_data/failed_downloads.csv"));

        log.append(&entry()).expect("追加失败记录出错");
        log.append(&entry()).expect("追加失败记录出错");

        let content = fs::read_to_string(log.path()).expect("读取文件失败");
        let mut lines = content.lines();
        assert_eq!(
            lines.next(),
            Some("timestamp,year,volume,part,parties,pdf_url")
        );
        // 相同失败追加两次就是两行，不去重
        assert_eq!(lines.count(), 2);
    }

    #[test]
    fn test_missing_part_logged_as_na() {
        let dir = tempfile::tempdir().expect("创建临时目录失败");
        let log = FailureLog::new(dir.path().join("failed_downloads.csv"));

        log.append(&entry()).expect("追加失败记录出错");

        let content = fs::read_to_string(log.path()).expect("读取文件失败");
        assert!(content.lines().nth(1).expect("应有数据行").contains(",N/A,"));
    }
}
