//! Bento Order Server - 外卖订单生命周期服务
//!
//! # 架构概述
//!
//! 本模块是订单服务的主入口，提供以下核心功能：
//!
//! - **订单生命周期** (`orders`): 下单、状态机、查询视图
//! - **餐厅目录** (`catalog`): SQLite 餐厅/菜单目录
//! - **认证** (`auth`): JWT 鉴权与管理员权限
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! order-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 认证、权限
//! ├── catalog/       # 餐厅/菜单目录
//! ├── orders/        # 订单存储、下单、状态机、查询视图
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 日志等工具
//! ```

pub mod api;
pub mod auth;
pub mod catalog;
pub mod core;
pub mod orders;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use catalog::CatalogStore;
pub use core::{Config, Server, ServerState};
pub use orders::{OrderStore, place_order, set_status};

// Re-export unified error types from shared
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::{cleanup_old_logs, init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

pub fn print_banner() {
    println!(
        r#"
    ____             __
   / __ )___  ____  / /_____
  / __  / _ \/ __ \/ __/ __ \
 / /_/ /  __/ / / / /_/ /_/ /
/_____/\___/_/ /_/\__/\____/
   ____          __
  / __ \_________/ /__  __________
 / / / / ___/ __  / _ \/ ___/ ___/
/ /_/ / /  / /_/ /  __/ /  (__  )
\____/_/   \__,_/\___/_/  /____/
    "#
    );
}

/// 初始化运行环境: dotenv, 工作目录, 日志
///
/// 必须在读取配置之前调用，否则 `.env` 中的变量不会生效。
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    config.ensure_work_dir_structure()?;

    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into());
    let json_format = matches!(std::env::var("LOG_JSON").as_deref(), Ok("1") | Ok("true"));

    if config.is_production() {
        let log_dir = config.log_dir();
        init_logger_with_file(&log_level, json_format, log_dir.to_str())?;
        if let Err(e) = cleanup_old_logs(&log_dir) {
            tracing::warn!("Failed to clean up old logs: {}", e);
        }
    } else {
        init_logger_with_file(&log_level, json_format, None)?;
    }

    Ok(())
}
