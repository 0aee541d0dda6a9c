//! 实时消息模块
//!
//! 订单变更的进程内广播总线。厨房看板和桌台会话页面通过订阅该总线
//! 获得实时更新；外部传输层（WebSocket 等）只是总线的一个订阅者。

pub mod bus;

pub use bus::{EventType, MessageBus, OrderEventMessage};
