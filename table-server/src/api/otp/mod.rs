//! OTP API 模块

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/otp", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/request", post(handler::request_code))
        .route("/verify", post(handler::verify_code))
}
