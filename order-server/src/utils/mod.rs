//! 工具模块 - 日志与通用工具
//!
//! # 内容
//!
//! - [`logger`] - tracing 初始化与旧日志清理

pub mod logger;

pub use logger::{cleanup_old_logs, init_logger, init_logger_with_file};
