//! Table Server - 多租户餐厅扫码点餐服务端
//!
//! # 架构概述
//!
//! 本模块是桌台点餐核心的主入口，提供以下功能：
//!
//! - **验证会话** (`sessions`): 手机 OTP 签发、校验和下单门禁
//! - **订单** (`orders`): 购物车归并与订单状态机
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储
//! - **短信** (`sms`): 验证码下发网关 (控制台 / HTTP 服务商)
//! - **消息** (`message`): 订单事件实时广播
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! table-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层 (模型 + 仓储)
//! ├── sessions/      # OTP 会话
//! ├── orders/        # 购物车与状态机
//! ├── sms/           # 短信网关
//! ├── message/       # 广播总线
//! └── utils/         # 错误、日志、校验
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod message;
pub mod orders;
pub mod sessions;
pub mod sms;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerState};
pub use db::models::{CustomerOrder, CustomerSession, OrderItem, OrderStatus, TableIdentity};
pub use message::{EventType, MessageBus};
pub use orders::OrderService;
pub use sessions::{SessionGate, SessionService};
pub use sms::SmsGateway;
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
