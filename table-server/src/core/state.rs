use std::sync::Arc;

use dashmap::DashMap;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::core::Config;
use crate::db::DbService;
use crate::db::models::CustomerOrder;
use crate::message::{EventType, MessageBus, OrderEventMessage};
use crate::sms::{self, SmsGateway};

/// 资源版本管理器
///
/// 使用 DashMap 实现无锁并发的版本号管理。
/// 每个点餐位 (餐厅/门店/桌号) 维护独立的版本号，支持原子递增。
///
/// # 使用场景
///
/// broadcast_order 时自动生成递增的版本号，
/// 订阅端可以通过版本号判断是否漏掉了更新。
#[derive(Debug)]
pub struct ResourceVersions {
    versions: DashMap<String, u64>,
}

impl ResourceVersions {
    /// 创建空的版本管理器
    pub fn new() -> Self {
        Self {
            versions: DashMap::new(),
        }
    }

    /// 递增指定资源的版本号并返回新值
    ///
    /// 如果资源不存在，从 0 开始递增（返回 1）
    pub fn increment(&self, resource: &str) -> u64 {
        let mut entry = self.versions.entry(resource.to_string()).or_insert(0);
        *entry += 1;
        *entry
    }

    /// 获取指定资源的当前版本号
    ///
    /// 如果资源不存在，返回 0
    pub fn get(&self, resource: &str) -> u64 {
        self.versions.get(resource).map(|v| *v).unwrap_or(0)
    }
}

impl Default for ResourceVersions {
    fn default() -> Self {
        Self::new()
    }
}

/// 服务器状态 - 持有所有服务的单例引用
///
/// ServerState 是点餐服务的核心数据结构，持有所有服务的共享引用。
/// 使用 Arc 实现浅拷贝，所有权成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式数据库 |
/// | sms | Arc<dyn SmsGateway> | 短信网关 (启动时按配置选择实现) |
/// | message_bus | Arc<MessageBus> | 订单事件广播总线 |
/// | resource_versions | Arc<ResourceVersions> | 点餐位版本管理 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// 短信网关 (控制台或 HTTP 服务商)
    pub sms: Arc<dyn SmsGateway>,
    /// 订单事件广播总线
    pub message_bus: Arc<MessageBus>,
    /// 资源版本管理器 (用于 broadcast_order 自动递增版本号)
    pub resource_versions: Arc<ResourceVersions>,
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    ///
    /// 通常使用 [`ServerState::initialize`] 代替
    pub fn new(
        config: Config,
        db: Surreal<Db>,
        sms: Arc<dyn SmsGateway>,
        message_bus: Arc<MessageBus>,
        resource_versions: Arc<ResourceVersions>,
    ) -> Self {
        Self {
            config,
            db,
            sms,
            message_bus,
            resource_versions,
        }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构 (确保目录存在)
    /// 2. 数据库 (work_dir/database/table.db)
    /// 3. 短信网关 (按配置选择实现，启动后不再切换)
    /// 4. 消息总线
    ///
    /// # Panics
    ///
    /// 数据库初始化失败时 panic
    pub async fn initialize(config: &Config) -> Self {
        let db_dir = config.database_dir();
        std::fs::create_dir_all(&db_dir).expect("Failed to create database directory");

        let db_path = db_dir.join("table.db");
        let db_service = DbService::new(&db_path.to_string_lossy())
            .await
            .expect("Failed to initialize database");

        let sms = sms::from_config(config);
        let message_bus = Arc::new(MessageBus::new());
        let resource_versions = Arc::new(ResourceVersions::new());

        Self::new(
            config.clone(),
            db_service.db,
            sms,
            message_bus,
            resource_versions,
        )
    }

    /// 广播订单事件
    ///
    /// 向所有订阅者广播订单变更。版本号按点餐位 (餐厅/门店/桌号)
    /// 由 ResourceVersions 自动递增管理。
    pub fn broadcast_order(&self, event: EventType, order: &CustomerOrder) {
        let key = format!(
            "{}/{}/{}",
            order.restaurant_id, order.location_id, order.table_number
        );
        let version = self.resource_versions.increment(&key);

        let message = OrderEventMessage {
            event,
            version,
            restaurant_id: order.restaurant_id.clone(),
            location_id: order.location_id.clone(),
            table_number: order.table_number.clone(),
            order: serde_json::to_value(order).unwrap_or_default(),
        };
        self.message_bus.publish(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn versions_increment_per_resource() {
        let versions = ResourceVersions::new();
        assert_eq!(versions.get("r1/l1/12"), 0);
        assert_eq!(versions.increment("r1/l1/12"), 1);
        assert_eq!(versions.increment("r1/l1/12"), 2);
        assert_eq!(versions.increment("r1/l1/13"), 1);
        assert_eq!(versions.get("r1/l1/12"), 2);
    }
}
