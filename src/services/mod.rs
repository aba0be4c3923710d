pub mod downloader;
pub mod extractor;
pub mod failure_log;
pub mod page_controller;
pub mod table_store;

pub use downloader::Downloader;
pub use failure_log::FailureLog;
pub use page_controller::PageController;
pub use table_store::TableStore;
