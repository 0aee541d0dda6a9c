//! 消息总线核心实现
//!
//! # 消息流
//!
//! ```text
//! handler ──▶ publish() ──▶ broadcast::Sender ──▶ subscribers
//!                                                 (kitchen views,
//!                                                  table sessions)
//! ```
//!
//! 总线只负责扇出；没有订阅者时消息被丢弃，发布方不关心。

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Order lifecycle events fanned out to viewers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventType {
    OrderCreated,
    OrderUpdated,
    StatusChanged,
}

/// One broadcast message, keyed by the ordering point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderEventMessage {
    pub event: EventType,
    /// Per-ordering-point monotonic version; lets late subscribers detect
    /// that they missed updates and must refetch
    pub version: u64,
    pub restaurant_id: String,
    pub location_id: String,
    pub table_number: String,
    pub order: serde_json::Value,
}

/// 消息总线 - 订单事件扇出
#[derive(Debug, Clone)]
pub struct MessageBus {
    tx: broadcast::Sender<OrderEventMessage>,
}

impl MessageBus {
    /// 创建消息总线 (默认容量 1024)
    pub fn new() -> Self {
        Self::with_capacity(1024)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// 发布事件；返回当前订阅者数量
    pub fn publish(&self, message: OrderEventMessage) -> usize {
        // Send fails only when no subscriber exists, which is fine
        self.tx.send(message).unwrap_or(0)
    }

    /// 订阅事件流
    pub fn subscribe(&self) -> broadcast::Receiver<OrderEventMessage> {
        self.tx.subscribe()
    }
}

impl Default for MessageBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(event: EventType, version: u64) -> OrderEventMessage {
        OrderEventMessage {
            event,
            version,
            restaurant_id: "r1".into(),
            location_id: "l1".into(),
            table_number: "12".into(),
            order: serde_json::json!({}),
        }
    }

    #[tokio::test]
    async fn subscriber_receives_published_events() {
        let bus = MessageBus::new();
        let mut rx = bus.subscribe();

        bus.publish(message(EventType::OrderCreated, 1));
        bus.publish(message(EventType::StatusChanged, 2));

        assert_eq!(rx.recv().await.unwrap().event, EventType::OrderCreated);
        assert_eq!(rx.recv().await.unwrap().event, EventType::StatusChanged);
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_dropped() {
        let bus = MessageBus::new();
        assert_eq!(bus.publish(message(EventType::OrderUpdated, 1)), 0);
    }
}
