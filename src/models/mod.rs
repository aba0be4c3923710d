//! 数据模型

pub mod case;
pub mod listing;

pub use case::{CaseData, CaseRecord, FailureLogEntry};
pub use listing::ListingDocument;
