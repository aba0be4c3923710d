//! 工具模块

pub mod logging;
pub mod sanitize;
