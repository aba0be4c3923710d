/// 列表页快照
///
/// 在内容标志元素出现后捕获；`url` 是捕获时的页面地址，
/// 用于把相对链接还原为绝对链接
#[derive(Debug, Clone)]
pub struct ListingDocument {
    pub html: String,
    pub url: String,
}
