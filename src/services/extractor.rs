//! 判例提取服务 - 业务能力层
//!
//! 把一张列表页快照转换为零或多条判例数据。
//! 单条列表项缺少必要子元素时跳过该项继续提取，部分结果优于没有结果。

use std::sync::OnceLock;

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::models::{CaseData, ListingDocument};

struct Selectors {
    item: Selector,
    parties: Selector,
    meta_lines: Selector,
    links: Selector,
}

fn selectors() -> &'static Selectors {
    static SELECTORS: OnceLock<Selectors> = OnceLock::new();
    SELECTORS.get_or_init(|| Selectors {
        item: Selector::parse("li.linumbr").unwrap(),
        parties: Selector::parse("div.cite-data a").unwrap(),
        meta_lines: Selector::parse("div.civil p").unwrap(),
        links: Selector::parse("div.split > div.row a").unwrap(),
    })
}

/// 从列表页快照提取全部判例
///
/// 没有匹配的列表项时返回空列表，这是合法结果
/// （卷存在但没有已发布的判例）
pub fn extract_cases(document: &ListingDocument) -> Vec<CaseData> {
    let dom = Html::parse_document(&document.html);
    let mut cases = Vec::new();

    for item in dom.select(&selectors().item) {
        match extract_one(item, &document.url) {
            Some(case) => cases.push(case),
            None => debug!("列表项缺少必要元素，跳过"),
        }
    }

    cases
}

/// 提取单条列表项
///
/// 当事人或 PDF 链接缺失时放弃该项；案号/日期两行缺失时填 "N/A"
fn extract_one(item: ElementRef<'_>, base_url: &str) -> Option<CaseData> {
    let sel = selectors();

    let parties = text_of(item.select(&sel.parties).next()?);

    let mut meta = item.select(&sel.meta_lines);
    let case_number = meta.next().map(text_of).unwrap_or_else(|| "N/A".to_string());
    let date = meta.next().map(text_of).unwrap_or_else(|| "N/A".to_string());

    let href = item
        .select(&sel.links)
        .filter_map(|a| a.value().attr("href"))
        .find(|href| href.to_ascii_lowercase().contains("pdf"))?;

    Some(CaseData {
        parties,
        case_number,
        date,
        pdf_url: resolve_url(base_url, href),
    })
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// 把相对链接还原为绝对链接
///
/// 快照里的 href 是原始属性值，下载管道需要完整 URL
pub fn resolve_url(base: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }
    if let Some(rest) = href.strip_prefix("//") {
        return format!("https://{}", rest);
    }

    // origin = 协议 + 主机
    let origin = base
        .find("://")
        .map(|i| match base[i + 3..].find('/') {
            Some(j) => &base[..i + 3 + j],
            None => base,
        })
        .unwrap_or(base);

    if href.starts_with('/') {
        return format!("{}{}", origin, href);
    }

    // 相对路径挂在页面所在目录下
    let dir = base
        .rfind('/')
        .filter(|&j| j > origin.len())
        .map(|j| &base[..j])
        .unwrap_or(origin);
    format!("{}/{}", dir, href)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE_URL: &str = "https://archive.example.org/";

    fn listing(html: &str) -> ListingDocument {
        ListingDocument {
            html: html.to_string(),
            url: BASE_URL.to_string(),
        }
    }

    fn full_item(parties: &str, href: &str) -> String {
        format!(
            r##"<li class="linumbr">
                <div class="cite-data"><a href="#">{parties}</a></div>
                <div class="civil"><p>Crl.A. No. 12/1965</p><p>01-04-1965</p></div>
                <div class="split"><div class="row"><a href="{href}">Download</a></div></div>
            </li>"##
        )
    }

    #[test]
    fn test_extract_full_item() {
        let html = format!("<html><body><ul>{}</ul></body></html>", full_item("State v. Accused", "/pdf/judgment_12.pdf"));
        let cases = extract_cases(&listing(&html));

        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].parties, "State v. Accused");
        assert_eq!(cases[0].case_number, "Crl.A. No. 12/1965");
        assert_eq!(cases[0].date, "01-04-1965");
        assert_eq!(cases[0].pdf_url, "https://archive.example.org/pdf/judgment_12.pdf");
    }

    #[test]
    fn test_missing_meta_lines_default_to_na() {
        let html = r##"<html><body><ul><li class="linumbr">
            <div class="cite-data"><a href="#">A v. B</a></div>
            <div class="civil"><p>C.A. 3/1950</p></div>
            <div class="split"><div class="row"><a href="/docs/a.PDF">get</a></div></div>
        </li></ul></body></html>"##;
        let cases = extract_cases(&listing(html));

        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].case_number, "C.A. 3/1950");
        assert_eq!(cases[0].date, "N/A");
        // PDF 标记大小写不敏感
        assert_eq!(cases[0].pdf_url, "https://archive.example.org/docs/a.PDF");
    }

    #[test]
    fn test_item_without_pdf_link_is_skipped() {
        let html = format!(
            "<html><body><ul>{}{}</ul></body></html>",
            full_item("Kept v. Item", "/pdf/kept.pdf"),
            r##"<li class="linumbr">
                <div class="cite-data"><a href="#">Broken v. Item</a></div>
                <div class="civil"><p>x</p><p>y</p></div>
                <div class="split"><div class="row"><a href="/docs/notes.txt">txt</a></div></div>
            </li>"##,
        );
        let cases = extract_cases(&listing(&html));

        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].parties, "Kept v. Item");
    }

    #[test]
    fn test_item_without_parties_is_skipped() {
        let html = r#"<html><body><ul><li class="linumbr">
            <div class="civil"><p>x</p><p>y</p></div>
            <div class="split"><div class="row"><a href="/pdf/a.pdf">get</a></div></div>
        </li></ul></body></html>"#;
        assert!(extract_cases(&listing(html)).is_empty());
    }

    #[test]
    fn test_empty_listing_yields_no_cases() {
        assert!(extract_cases(&listing("<html><body><ul></ul></body></html>")).is_empty());
    }

    #[test]
    fn test_resolve_url() {
        assert_eq!(
            resolve_url(BASE_URL, "https://cdn.example.org/a.pdf"),
            "https://cdn.example.org/a.pdf"
        );
        assert_eq!(
            resolve_url(BASE_URL, "/pdf/a.pdf"),
            "https://archive.example.org/pdf/a.pdf"
        );
        assert_eq!(
            resolve_url(BASE_URL, "pdf/a.pdf"),
            "https://archive.example.org/pdf/a.pdf"
        );
        assert_eq!(
            resolve_url("https://archive.example.org/listing/1965", "a.pdf"),
            "https://archive.example.org/listing/a.pdf"
        );
        assert_eq!(
            resolve_url(BASE_URL, "//cdn.example.org/a.pdf"),
            "https://cdn.example.org/a.pdf"
        );
    }
}
