//! 文件名净化

use std::sync::OnceLock;

use regex::Regex;

/// 去掉文件名中不允许出现的字符 `<>:"/\|?*`
///
/// 用于把自由文本的当事人名转成安全文件名；不保证唯一，
/// 同一目录下净化结果相同的两条记录会互相覆盖
pub fn sanitize_filename(name: &str) -> String {
    static FORBIDDEN: OnceLock<Regex> = OnceLock::new();
    let re = FORBIDDEN.get_or_init(|| Regex::new(r#"[<>:"/\\|?*]"#).expect("非法字符正则"));
    re.replace_all(name, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_every_forbidden_char() {
        let sanitized = sanitize_filename(r#"a<b>c:d"e/f\g|h?i*j"#);
        assert_eq!(sanitized, "abcdefghij");
        for c in ['<', '>', ':', '"', '/', '\\', '|', '?', '*'] {
            assert!(!sanitized.contains(c));
        }
    }

    #[test]
    fn test_idempotent() {
        let once = sanitize_filename("State of Bombay v. R/S Traders?");
        assert_eq!(sanitize_filename(&once), once);
    }

    #[test]
    fn test_slash_stripped_from_parties() {
        assert_eq!(sanitize_filename("A v. B/C"), "A v. BC");
    }

    #[test]
    fn test_plain_name_unchanged() {
        assert_eq!(sanitize_filename("A v. B"), "A v. B");
    }
}
