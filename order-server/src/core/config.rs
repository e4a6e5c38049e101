use std::path::PathBuf;

use crate::auth::JwtConfig;

/// 服务器配置 - 订单服务的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 |
/// | HTTP_PORT | 8000 | HTTP 服务端口 |
/// | CATALOG_DB | <work_dir>/database/catalog.db | 餐厅/菜单数据库路径 |
/// | ORDERS_DB | <work_dir>/database/orders.redb | 订单数据库路径 |
/// | ENVIRONMENT | development | 运行环境 |
/// | CORS_ORIGIN | * | 允许的跨域来源 |
/// | JWT_SECRET | (开发默认值) | JWT 密钥 |
/// | JWT_EXPIRATION_MINUTES | 1440 | 令牌有效期(分钟) |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/bento HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、日志等文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 允许的 CORS 来源 ("*" 表示全部放行)
    pub cors_origin: String,
    /// 餐厅/菜单数据库路径覆盖 (默认从 work_dir 推导)
    pub catalog_db: Option<String>,
    /// 订单数据库路径覆盖 (默认从 work_dir 推导)
    pub orders_db: Option<String>,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            cors_origin: std::env::var("CORS_ORIGIN").unwrap_or_else(|_| "*".into()),
            catalog_db: std::env::var("CATALOG_DB").ok(),
            orders_db: std::env::var("ORDERS_DB").ok(),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// 数据库目录
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// 日志目录
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// 餐厅/菜单数据库路径
    pub fn catalog_db_path(&self) -> PathBuf {
        match &self.catalog_db {
            Some(path) => PathBuf::from(path),
            None => self.database_dir().join("catalog.db"),
        }
    }

    /// 订单数据库路径
    pub fn orders_db_path(&self) -> PathBuf {
        match &self.orders_db {
            Some(path) => PathBuf::from(path),
            None => self.database_dir().join("orders.redb"),
        }
    }

    /// 确保工作目录结构存在
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.log_dir())?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
