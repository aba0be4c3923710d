//! 页面导航服务 - 业务能力层
//!
//! 封装与年份/卷/分册级联下拉框的全部交互，对外提供"文档就绪"的快照。
//! 下拉框必须按 年份 → 卷 → 分册 的顺序推进，网站会根据上一级选择
//! 反应式地填充下一级选项。

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use anyhow::Result;
use tracing::{debug, warn};

use crate::config::Config;
use crate::infrastructure::{JsExecutor, WaitOutcome};
use crate::models::ListingDocument;

/// 年份下拉框元素 ID
const YEAR_DROPDOWN: &str = "year";
/// 卷下拉框元素 ID
const VOLUME_DROPDOWN: &str = "volume";
/// 分册下拉框元素 ID
const PART_DROPDOWN: &str = "partno";
/// 列表内容标志元素
const CONTENT_MARKER: &str = "li.linumbr";
/// 页面重渲染标记属性
const EPOCH_ATTR: &str = "data-harvest-epoch";

/// 页面导航控制器
///
/// 职责：
/// - 独占持有 JsExecutor（即浏览器会话状态）
/// - 暴露 list_years / list_volumes / list_parts / load_listing 能力
/// - 导航失败一律降级为空结果，从不让上层中断
pub struct PageController {
    executor: JsExecutor,
    control_wait: Duration,
    reload_wait: Duration,
    content_wait: Duration,
    poll_interval: Duration,
    epoch: AtomicU64,
}

impl PageController {
    pub fn new(executor: JsExecutor, config: &Config) -> Self {
        Self {
            executor,
            control_wait: Duration::from_secs(config.control_wait_secs),
            reload_wait: Duration::from_secs(config.reload_wait_secs),
            content_wait: Duration::from_secs(config.content_wait_secs),
            poll_interval: Duration::from_millis(config.poll_interval_ms),
            epoch: AtomicU64::new(0),
        }
    }

    /// 等待入口页面 body 就绪
    pub async fn wait_for_ready(&self) -> WaitOutcome {
        self.executor
            .wait_until("!!document.body", self.content_wait, self.poll_interval)
            .await
    }

    /// 读取年份下拉框，只保留纯数字标签（剔除占位项）
    pub async fn list_years(&self) -> Result<Vec<String>> {
        let labels = self.dropdown_labels(YEAR_DROPDOWN).await?;
        Ok(labels
            .into_iter()
            .filter(|label| !label.is_empty() && label.chars().all(|c| c.is_ascii_digit()))
            .collect())
    }

    /// 选中年份后读取卷下拉框，过滤 "Select" 开头的占位项
    pub async fn list_volumes(&self, year: &str) -> Result<Vec<String>> {
        self.select_option(YEAR_DROPDOWN, year).await;
        let labels = self.dropdown_labels(VOLUME_DROPDOWN).await?;
        Ok(labels
            .into_iter()
            .filter(|label| !label.starts_with("Select"))
            .collect())
    }

    /// 探测分册下拉框
    ///
    /// 不存在、不可见或不可交互时返回空列表，表示该年份/卷
    /// 没有分册级分页
    pub async fn list_parts(&self, year: &str, volume: &str) -> Vec<String> {
        if !self.is_interactive(PART_DROPDOWN).await {
            debug!("年份 {} 卷 {} 没有分册下拉框", year, volume);
            return Vec::new();
        }

        self.select_option(VOLUME_DROPDOWN, volume).await;
        match self.dropdown_labels(PART_DROPDOWN).await {
            Ok(labels) => labels
                .into_iter()
                .filter(|label| !label.starts_with("Select"))
                .collect(),
            Err(e) => {
                debug!("读取分册下拉框失败: {}", e);
                Vec::new()
            }
        }
    }

    /// 执行完整选择序列并返回页面快照
    ///
    /// 任一步骤失败或内容标志元素始终未出现时返回 None，
    /// 调用方按零条记录处理而不是中断
    pub async fn load_listing(
        &self,
        year: &str,
        volume: &str,
        part: Option<&str>,
    ) -> Option<ListingDocument> {
        self.select_option(YEAR_DROPDOWN, year).await;
        self.select_option(VOLUME_DROPDOWN, volume).await;

        if let Some(part) = part {
            let present = self
                .executor
                .wait_until(&element_present_js(PART_DROPDOWN), self.control_wait, self.poll_interval)
                .await;
            if present.is_satisfied() {
                if self.is_interactive(PART_DROPDOWN).await {
                    self.select_option(PART_DROPDOWN, part).await;
                } else {
                    warn!("分册下拉框存在但不可交互");
                }
            } else {
                warn!("当前年份和卷没有找到分册下拉框");
            }
        }

        // 等待列表内容出现
        let marker = format!("!!document.querySelector({})", js_string(CONTENT_MARKER));
        match self
            .executor
            .wait_until(&marker, self.content_wait, self.poll_interval)
            .await
        {
            WaitOutcome::Satisfied => {}
            WaitOutcome::TimedOut => {
                warn!("列表内容等待超时: 年份 {} 卷 {} 分册 {:?}", year, volume, part);
                return None;
            }
        }

        let html = match self.executor.content().await {
            Ok(html) => html,
            Err(e) => {
                warn!("获取页面快照失败: {}", e);
                return None;
            }
        };
        let url = self
            .executor
            .current_url()
            .await
            .ok()
            .flatten()
            .unwrap_or_default();

        Some(ListingDocument { html, url })
    }

    /// 按可见标签选中下拉框选项
    ///
    /// 选择前给 body 打上纪元标记，选择后等待标记消失，以此捕捉
    /// 响应式重渲染的开始；等待超时被吞掉（部分转场不会整页替换）。
    /// 任一子步骤失败只记 debug 日志，与上层约定为"功能不可用"。
    async fn select_option(&self, dropdown_id: &str, label: &str) {
        let ready = self
            .executor
            .wait_until(&element_interactive_js(dropdown_id), self.control_wait, self.poll_interval)
            .await;
        if !ready.is_satisfied() {
            debug!("下拉框 {} 未就绪，跳过选择 '{}'", dropdown_id, label);
            return;
        }

        let epoch = self.epoch.fetch_add(1, Ordering::Relaxed).to_string();
        let mark = format!(
            "(() => {{ if (document.body) {{ document.body.setAttribute({attr}, {epoch}); }} return true; }})()",
            attr = js_string(EPOCH_ATTR),
            epoch = js_string(&epoch),
        );
        if let Err(e) = self.executor.eval(mark).await {
            debug!("标记页面纪元失败: {}", e);
        }

        let select = format!(
            r#"(() => {{
                const sel = document.getElementById({id});
                if (!sel) return false;
                const label = {label};
                const opt = Array.from(sel.options).find((o) => o.textContent.trim() === label);
                if (!opt) return false;
                sel.value = opt.value;
                sel.dispatchEvent(new Event('change', {{ bubbles: true }}));
                return true;
            }})()"#,
            id = js_string(dropdown_id),
            label = js_string(label),
        );
        match self.executor.eval_as::<bool>(select).await {
            Ok(true) => {}
            Ok(false) => {
                debug!("下拉框 {} 中没有选项 '{}'", dropdown_id, label);
                return;
            }
            Err(e) => {
                debug!("选择下拉框 {} 选项 '{}' 失败: {}", dropdown_id, label, e);
                return;
            }
        }

        let stale = format!(
            "(() => {{ const b = document.body; return !b || b.getAttribute({attr}) !== {epoch}; }})()",
            attr = js_string(EPOCH_ATTR),
            epoch = js_string(&epoch),
        );
        let outcome = self
            .executor
            .wait_until(&stale, self.reload_wait, self.poll_interval)
            .await;
        if outcome == WaitOutcome::TimedOut {
            debug!("选择 '{}' 后页面未整体重渲染", label);
        }
    }

    /// 读取下拉框全部选项的可见文本
    async fn dropdown_labels(&self, dropdown_id: &str) -> Result<Vec<String>> {
        let present = self
            .executor
            .wait_until(&element_present_js(dropdown_id), self.control_wait, self.poll_interval)
            .await;
        if !present.is_satisfied() {
            anyhow::bail!("下拉框 {} 不存在", dropdown_id);
        }

        let js = format!(
            "(() => {{ const sel = document.getElementById({id}); if (!sel) return []; return Array.from(sel.options).map((o) => o.textContent.trim()); }})()",
            id = js_string(dropdown_id),
        );
        let labels: Vec<String> = self.executor.eval_as(js).await?;
        Ok(labels)
    }

    /// 元素存在、可见且未禁用
    async fn is_interactive(&self, dropdown_id: &str) -> bool {
        self.executor
            .eval_as::<bool>(element_interactive_js(dropdown_id))
            .await
            .unwrap_or(false)
    }
}

fn element_present_js(id: &str) -> String {
    format!("!!document.getElementById({})", js_string(id))
}

fn element_interactive_js(id: &str) -> String {
    format!(
        "(() => {{ const el = document.getElementById({}); return !!el && !el.disabled && el.offsetParent !== null; }})()",
        js_string(id)
    )
}

/// 把字符串编码为可直接嵌入 JS 的字符串字面量
fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_string_escapes_quotes() {
        assert_eq!(js_string("year"), "\"year\"");
        assert_eq!(js_string("a\"b"), "\"a\\\"b\"");
    }

    #[test]
    fn test_element_js_embeds_quoted_id() {
        assert!(element_present_js("partno").contains("\"partno\""));
        assert!(element_interactive_js("partno").contains("offsetParent"));
    }
}
