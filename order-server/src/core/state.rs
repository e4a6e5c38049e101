use std::sync::Arc;

use crate::auth::JwtService;
use crate::catalog::CatalogStore;
use crate::core::Config;
use crate::orders::OrderStore;

/// 服务器状态 - 持有所有存储与服务的共享引用
///
/// ServerState 是订单服务的核心数据结构。
/// 使用 Arc 实现浅拷贝，克隆成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | orders | OrderStore | 订单存储 (redb) |
/// | catalog | CatalogStore | 餐厅/菜单存储 (SQLite) |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
///
/// # 使用示例
///
/// ```ignore
/// let state = ServerState::initialize(&config).await;
/// let orders = state.orders.list_all()?;
/// ```
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 订单存储
    pub orders: OrderStore,
    /// 餐厅/菜单存储
    pub catalog: CatalogStore,
    /// JWT 认证服务 (Arc 共享所有权)
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    ///
    /// 通常使用 [`ServerState::initialize`] 方法代替；
    /// 测试中可以用内存存储直接构造。
    pub fn new(
        config: Config,
        orders: OrderStore,
        catalog: CatalogStore,
        jwt_service: Arc<JwtService>,
    ) -> Self {
        Self {
            config,
            orders,
            catalog,
            jwt_service,
        }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构 (确保目录存在)
    /// 2. 订单数据库 (work_dir/database/orders.redb)
    /// 3. 餐厅/菜单数据库 (work_dir/database/catalog.db, 自动迁移)
    /// 4. JWT 服务
    ///
    /// # Panics
    ///
    /// 数据库初始化失败时 panic
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let orders = OrderStore::open(config.orders_db_path()).expect("Failed to open order store");

        let catalog_path = config.catalog_db_path();
        let catalog = CatalogStore::open(&catalog_path.to_string_lossy())
            .await
            .expect("Failed to open catalog store");

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        Self::new(config.clone(), orders, catalog, jwt_service)
    }

    /// 获取 JWT 服务
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
