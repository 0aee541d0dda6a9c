//! 顾客点餐模块
//!
//! 桌台购物车与订单状态机：
//!
//! - [`cart`] - 行项目归并 (按 商品标识 + 特殊要求 去重累加)
//! - [`OrderService`] - 加菜 / 删菜 / 改量 / 提交 / 厨房状态流转
//!
//! 所有写操作先经过 [`crate::sessions::SessionGate`] 门禁，再以
//! revision 比较交换的方式落盘，两个并发写不会互相覆盖。

pub mod cart;
mod service;

pub use service::{CartUpdate, NewCartItem, OrderService, OrdersView};
