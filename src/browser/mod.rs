//! 浏览器会话管理

pub mod headless;

pub use headless::launch_headless_browser;
