use serde::{Deserialize, Serialize};

/// 单条列表项提取出的判例数据（尚未附加年份/卷/分册）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseData {
    pub parties: String,
    pub case_number: String,
    pub date: String,
    pub pdf_url: String,
}

/// 年份数据表中的一行
///
/// 字段顺序即 CSV 列顺序；`part` 为 None 时序列化为空列
/// （该年份/卷没有分册级分页）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseRecord {
    pub year: String,
    pub volume: String,
    pub part: Option<String>,
    pub parties: String,
    pub case_number: String,
    pub date: String,
    pub pdf_url: String,
}

impl CaseRecord {
    /// 为提取结果附加导航坐标
    pub fn from_case(case: CaseData, year: &str, volume: &str, part: Option<&str>) -> Self {
        Self {
            year: year.to_string(),
            volume: volume.to_string(),
            part: part.map(|p| p.to_string()),
            parties: case.parties,
            case_number: case.case_number,
            date: case.date,
            pdf_url: case.pdf_url,
        }
    }
}

/// 失败下载记录中的一行
///
/// 只追加、从不去重；`part` 缺失时写入字面量 "N/A"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureLogEntry {
    pub timestamp: String,
    pub year: String,
    pub volume: String,
    pub part: String,
    pub parties: String,
    pub pdf_url: String,
}

impl FailureLogEntry {
    pub fn new(year: &str, volume: &str, part: Option<&str>, parties: &str, pdf_url: &str) -> Self {
        Self {
            timestamp: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            year: year.to_string(),
            volume: volume.to_string(),
            part: part.unwrap_or("N/A").to_string(),
            parties: parties.to_string(),
            pdf_url: pdf_url.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_case_attaches_coordinates() {
        let case = CaseData {
            parties: "A v. B".to_string(),
            case_number: "C.A. 1/1965".to_string(),
            date: "1965-01-01".to_string(),
            pdf_url: "https://example.org/a.pdf".to_string(),
        };

        let record = CaseRecord::from_case(case, "1965", "2", Some("1"));
        assert_eq!(record.year, "1965");
        assert_eq!(record.volume, "2");
        assert_eq!(record.part.as_deref(), Some("1"));
        assert_eq!(record.parties, "A v. B");
    }

    #[test]
    fn test_failure_entry_missing_part_is_na() {
        let entry = FailureLogEntry::new("1965", "2", None, "A v. B", "https://example.org/a.pdf");
        assert_eq!(entry.part, "N/A");

        let entry = FailureLogEntry::new("1965", "2", Some("3"), "A v. B", "https://example.org/a.pdf");
        assert_eq!(entry.part, "3");
    }
}
