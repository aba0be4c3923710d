/// 运行模式
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunMode {
    /// 只采集元数据
    Harvest,
    /// 只下载 PDF
    Download,
    /// 先采集后下载
    Full,
}

impl RunMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "harvest" => Some(RunMode::Harvest),
            "download" => Some(RunMode::Download),
            "full" => Some(RunMode::Full),
            _ => None,
        }
    }

    pub fn includes_harvest(self) -> bool {
        matches!(self, RunMode::Harvest | RunMode::Full)
    }

    pub fn includes_download(self) -> bool {
        matches!(self, RunMode::Download | RunMode::Full)
    }
}

/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 运行模式
    pub run_mode: RunMode,
    /// 判例档案网站入口
    pub entry_url: String,
    /// 待采集的年份（为空则从页面下拉框自动发现）
    pub harvest_years: Vec<String>,
    /// 待下载的年份（为空则扫描数据表目录）
    pub download_years: Vec<String>,
    /// 年份数据表存放目录
    pub files_dir: String,
    /// PDF 下载根目录
    pub download_root: String,
    /// 失败下载记录文件
    pub failure_log_path: String,
    /// 下拉框就绪等待（秒）
    pub control_wait_secs: u64,
    /// 页面重渲染等待（秒）
    pub reload_wait_secs: u64,
    /// 列表内容等待（秒）
    pub content_wait_secs: u64,
    /// 条件轮询间隔（毫秒）
    pub poll_interval_ms: u64,
    /// 单次下载超时（秒）
    pub download_timeout_secs: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            run_mode: RunMode::Full,
            entry_url: "https://digiscr.sci.gov.in/".to_string(),
            harvest_years: Vec::new(),
            download_years: Vec::new(),
            files_dir: "files".to_string(),
            download_root: "downloaded_judgments".to_string(),
            failure_log_path: "not_downloaded_data/failed_downloads.csv".to_string(),
            control_wait_secs: 2,
            reload_wait_secs: 3,
            content_wait_secs: 3,
            poll_interval_ms: 100,
            download_timeout_secs: 40,
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            run_mode: std::env::var("RUN_MODE").ok().and_then(|v| RunMode::parse(&v)).unwrap_or(default.run_mode),
            entry_url: std::env::var("ENTRY_URL").unwrap_or(default.entry_url),
            harvest_years: std::env::var("HARVEST_YEARS").map(|v| parse_year_list(&v)).unwrap_or(default.harvest_years),
            download_years: std::env::var("DOWNLOAD_YEARS").map(|v| parse_year_list(&v)).unwrap_or(default.download_years),
            files_dir: std::env::var("FILES_DIR").unwrap_or(default.files_dir),
            download_root: std::env::var("DOWNLOAD_ROOT").unwrap_or(default.download_root),
            failure_log_path: std::env::var("FAILURE_LOG_PATH").unwrap_or(default.failure_log_path),
            control_wait_secs: std::env::var("CONTROL_WAIT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.control_wait_secs),
            reload_wait_secs: std::env::var("RELOAD_WAIT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.reload_wait_secs),
            content_wait_secs: std::env::var("CONTENT_WAIT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.content_wait_secs),
            poll_interval_ms: std::env::var("POLL_INTERVAL_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.poll_interval_ms),
            download_timeout_secs: std::env::var("DOWNLOAD_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.download_timeout_secs),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }
}

/// 解析逗号分隔的年份列表
fn parse_year_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|year| year.trim().to_string())
        .filter(|year| !year.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_year_list() {
        assert_eq!(parse_year_list("2002,2001,2000"), vec!["2002", "2001", "2000"]);
        assert_eq!(parse_year_list(" 1965 , 1964 "), vec!["1965", "1964"]);
        assert!(parse_year_list("").is_empty());
        assert!(parse_year_list(" , ").is_empty());
    }

    #[test]
    fn test_run_mode_parse() {
        assert_eq!(RunMode::parse("harvest"), Some(RunMode::Harvest));
        assert_eq!(RunMode::parse(" Download "), Some(RunMode::Download));
        assert_eq!(RunMode::parse("FULL"), Some(RunMode::Full));
        assert_eq!(RunMode::parse("other"), None);
    }

    #[test]
    fn test_run_mode_stages() {
        assert!(RunMode::Full.includes_harvest() && RunMode::Full.includes_download());
        assert!(RunMode::Harvest.includes_harvest() && !RunMode::Harvest.includes_download());
        assert!(!RunMode::Download.includes_harvest() && RunMode::Download.includes_download());
    }
}
