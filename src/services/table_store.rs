//! 年份数据表服务 - 业务能力层
//!
//! 按年份读写 CSV 数据表，一个年份一个文件

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};
use crate::models::CaseRecord;

/// 数据表列头，与 CaseRecord 字段顺序一致
const HEADERS: [&str; 7] = ["year", "volume", "part", "parties", "case_number", "date", "pdf_url"];

/// 年份数据表存储
pub struct TableStore {
    files_dir: PathBuf,
}

impl TableStore {
    pub fn new(files_dir: impl Into<PathBuf>) -> Self {
        Self {
            files_dir: files_dir.into(),
        }
    }

    /// 某年份数据表的文件路径
    pub fn year_path(&self, year: &str) -> PathBuf {
        self.files_dir.join(format!("data_for_{}.csv", year))
    }

    /// 一次性落盘整个年份的数据表
    pub fn save_year(&self, year: &str, records: &[CaseRecord]) -> AppResult<()> {
        fs::create_dir_all(&self.files_dir)
            .map_err(|e| AppError::create_dir_failed(self.files_dir.display().to_string(), e))?;

        let path = self.year_path(year);
        let file = File::create(&path)
            .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))?;
        let mut writer = csv::Writer::from_writer(file);

        if records.is_empty() {
            // 空表也要有列头
            writer.write_record(HEADERS)?;
        }
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;

        Ok(())
    }

    /// 把一个年份的数据表完整读入内存
    pub fn load_year(&self, year: &str) -> AppResult<Vec<CaseRecord>> {
        let path = self.year_path(year);
        let file = File::open(&path)
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
        let mut reader = csv::Reader::from_reader(file);

        let mut records = Vec::new();
        for row in reader.deserialize() {
            records.push(row?);
        }
        Ok(records)
    }

    /// 扫描数据表目录，返回已有数据表的年份
    pub fn discover_years(&self) -> Vec<String> {
        let mut years = Vec::new();
        if let Ok(entries) = fs::read_dir(&self.files_dir) {
            for entry in entries.flatten() {
                let name = entry.file_name().to_string_lossy().into_owned();
                if let Some(year) = name
                    .strip_prefix("data_for_")
                    .and_then(|rest| rest.strip_suffix(".csv"))
                {
                    years.push(year.to_string());
                }
            }
        }
        years.sort();
        years
    }

    pub fn files_dir(&self) -> &Path {
        &self.files_dir
    }
}
