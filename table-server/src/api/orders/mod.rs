//! Table Orders API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/table-orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/items", post(handler::add_items))
        .route(
            "/items/{index}",
            put(handler::update_quantity).delete(handler::remove_item),
        )
        .route("/submit", post(handler::submit))
        .route("/status/{id}", put(handler::update_status))
}
