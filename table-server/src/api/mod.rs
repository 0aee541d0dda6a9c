//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`otp`] - 手机验证码签发与校验
//! - [`orders`] - 桌台购物车与订单接口

pub mod health;
pub mod orders;
pub mod otp;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};
