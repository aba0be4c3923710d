//! 下载服务 - 业务能力层
//!
//! 限时 HTTP 下载能力，只处理单个 URL

use std::time::Duration;

use crate::error::{AppError, AppResult};

/// PDF 下载器
///
/// 单次请求限时；传输错误或非成功状态码都算整体失败，
/// 不做部分内容补救，也不在单次尝试内重试
pub struct Downloader {
    client: reqwest::Client,
}

impl Downloader {
    pub fn new(timeout: Duration) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(AppError::download_client_failed)?;
        Ok(Self { client })
    }

    /// 拉取一个文档的完整字节
    pub async fn fetch(&self, url: &str) -> AppResult<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::download_request_failed(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::download_bad_status(url, status.as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::download_body_failed(url, e))?;
        Ok(bytes.to_vec())
    }
}
