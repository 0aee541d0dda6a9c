//! 顾客验证会话模块
//!
//! 扫码点餐的手机验证闭环：
//!
//! - [`SessionService`] - 发码 / 验码 (OTP 签发与校验)
//! - [`SessionGate`] - 下单前的会话验证门禁
//!
//! 会话以 (手机号, 餐厅, 门店, 桌号) 四元组唯一标识；重新发码会轮换
//! 验证码并撤销已有的验证状态。

mod gate;
mod service;

pub use gate::SessionGate;
pub use service::{SessionService, VerifiedCustomer};

use rand::Rng;

/// Codes expire this long after issuance
pub const OTP_TTL_MINUTES: i64 = 10;

/// Uniform random 6-digit numeric code
pub fn generate_code() -> String {
    rand::thread_rng().gen_range(100_000..=999_999).to_string()
}
