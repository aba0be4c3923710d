//! JS 执行器 - 基础设施层
//!
//! 持有唯一的 page 资源，暴露"执行 JS"与"条件等待"能力

use std::time::Duration;

use anyhow::Result;
use chromiumoxide::Page;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tokio::time::sleep;
use tracing::debug;

/// 条件等待结果
///
/// 超时不是错误，语义由调用方决定（很多页面转场不会触发整页替换）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// 条件在限时内满足
    Satisfied,
    /// 等待超时
    TimedOut,
}

impl WaitOutcome {
    pub fn is_satisfied(self) -> bool {
        matches!(self, WaitOutcome::Satisfied)
    }
}

/// JS 执行器
///
/// 职责：
/// - 持有唯一的 Page 资源
/// - 暴露 eval() / eval_as() / wait_until() 能力
/// - 不认识年份 / 卷 / 判例
/// - 不处理业务流程
pub struct JsExecutor {
    page: Page,
}

impl JsExecutor {
    /// 创建新的 JS 执行器
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    /// 执行 JS 代码并返回 JSON 结果
    pub async fn eval(&self, js_code: impl Into<String>) -> Result<JsonValue> {
        let result = self.page.evaluate(js_code.into()).await?;
        let json_value = result.into_value()?;
        Ok(json_value)
    }

    /// 执行 JS 代码并反序列化为指定类型
    pub async fn eval_as<T: DeserializeOwned>(&self, js_code: impl Into<String>) -> Result<T> {
        let json_value = self.eval(js_code).await?;
        let typed_value = serde_json::from_value(json_value)?;
        Ok(typed_value)
    }

    /// 轮询等待 JS 布尔条件成立
    ///
    /// 轮询期间的求值错误按"条件未满足"处理（页面可能正在跳转）
    pub async fn wait_until(
        &self,
        predicate_js: &str,
        timeout: Duration,
        poll_interval: Duration,
    ) -> WaitOutcome {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            match self.eval_as::<bool>(predicate_js).await {
                Ok(true) => return WaitOutcome::Satisfied,
                Ok(false) => {}
                Err(e) => debug!("等待条件求值失败: {}", e),
            }
            if tokio::time::Instant::now() >= deadline {
                return WaitOutcome::TimedOut;
            }
            sleep(poll_interval).await;
        }
    }

    /// 捕获当前页面的 HTML 快照
    pub async fn content(&self) -> Result<String> {
        Ok(self.page.content().await?)
    }

    /// 当前页面 URL
    pub async fn current_url(&self) -> Result<Option<String>> {
        Ok(self.page.url().await?)
    }
}
