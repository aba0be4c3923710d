//! 基础设施层

pub mod js_executor;

pub use js_executor::{JsExecutor, WaitOutcome};
