//! Table Orders API Handlers
//!
//! Every mutating route resolves the identity tuple from the request,
//! lets the order service enforce the verified-session gate, then fans
//! the result out on the message bus.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::models::{CustomerOrder, OrderStatus, TableIdentity};
use crate::message::EventType;
use crate::orders::{NewCartItem, OrderService};
use crate::utils::validation::{MAX_SHORT_TEXT_LEN, normalize_phone, validate_required_text};
use crate::utils::{AppError, AppResult};

/// Identity tuple as it appears in request bodies and query strings
#[derive(Debug, Deserialize)]
pub struct TableQuery {
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub restaurant_id: String,
    #[serde(default)]
    pub location_id: String,
    #[serde(default)]
    pub table_number: String,
}

impl TableQuery {
    /// Validate the tuple and normalize the phone into a [`TableIdentity`]
    fn identity(&self) -> AppResult<TableIdentity> {
        validate_required_text(&self.restaurant_id, "restaurant_id", MAX_SHORT_TEXT_LEN)?;
        validate_required_text(&self.location_id, "location_id", MAX_SHORT_TEXT_LEN)?;
        validate_required_text(&self.table_number, "table_number", MAX_SHORT_TEXT_LEN)?;
        let phone = normalize_phone(&self.phone)?;
        Ok(TableIdentity::new(
            phone,
            self.restaurant_id.clone(),
            self.location_id.clone(),
            self.table_number.clone(),
        ))
    }
}

#[derive(Debug, Deserialize)]
pub struct CartItemPayload {
    #[serde(default)]
    pub item_id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub special_instructions: Option<String>,
}

impl From<CartItemPayload> for NewCartItem {
    fn from(p: CartItemPayload) -> Self {
        NewCartItem {
            item_id: p.item_id,
            name: p.name,
            price: p.price,
            quantity: p.quantity,
            special_instructions: p.special_instructions,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddItemsPayload {
    #[serde(flatten)]
    pub table: TableQuery,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub items: Vec<CartItemPayload>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateQuantityPayload {
    #[serde(flatten)]
    pub table: TableQuery,
    #[serde(default)]
    pub quantity: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitOrderPayload {
    #[serde(flatten)]
    pub table: TableQuery,
    #[serde(default)]
    pub order_id: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusPayload {
    pub status: OrderStatus,
}

#[derive(Debug, Serialize)]
pub struct OrdersResponse {
    pub orders: Vec<CustomerOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub order: CustomerOrder,
}

/// GET /api/table-orders - 桌台会话的全部订单
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<TableQuery>,
) -> AppResult<Json<OrdersResponse>> {
    let identity = query.identity()?;
    let view = OrderService::new(state.db.clone())
        .list_orders(&identity)
        .await?;
    Ok(Json(OrdersResponse {
        orders: view.orders,
        customer_name: view.customer_name,
    }))
}

/// POST /api/table-orders/items - 加菜 (无购物车时自动创建)
pub async fn add_items(
    State(state): State<ServerState>,
    Json(payload): Json<AddItemsPayload>,
) -> AppResult<Json<OrderResponse>> {
    let identity = payload.table.identity()?;
    let items = payload.items.into_iter().map(Into::into).collect();

    let update = OrderService::new(state.db.clone())
        .add_items(&identity, &payload.name, items)
        .await?;

    let event = if update.created {
        EventType::OrderCreated
    } else {
        EventType::OrderUpdated
    };
    state.broadcast_order(event, &update.order);

    Ok(Json(OrderResponse {
        order: update.order,
    }))
}

/// PUT /api/table-orders/items/{index} - 修改行数量 (低于 1 视为删除)
pub async fn update_quantity(
    State(state): State<ServerState>,
    Path(index): Path<usize>,
    Json(payload): Json<UpdateQuantityPayload>,
) -> AppResult<Json<OrderResponse>> {
    let identity = payload.table.identity()?;
    let quantity = payload
        .quantity
        .ok_or_else(|| AppError::validation("quantity is required"))?;
    let order = OrderService::new(state.db.clone())
        .update_quantity(&identity, index, quantity)
        .await?;

    state.broadcast_order(EventType::OrderUpdated, &order);
    Ok(Json(OrderResponse { order }))
}

/// DELETE /api/table-orders/items/{index} - 删除一行
pub async fn remove_item(
    State(state): State<ServerState>,
    Path(index): Path<usize>,
    Query(query): Query<TableQuery>,
) -> AppResult<Json<OrderResponse>> {
    let identity = query.identity()?;
    let order = OrderService::new(state.db.clone())
        .remove_item(&identity, index)
        .await?;

    state.broadcast_order(EventType::OrderUpdated, &order);
    Ok(Json(OrderResponse { order }))
}

/// POST /api/table-orders/submit - 提交购物车到厨房
pub async fn submit(
    State(state): State<ServerState>,
    Json(payload): Json<SubmitOrderPayload>,
) -> AppResult<Json<OrderResponse>> {
    let identity = payload.table.identity()?;
    let order = OrderService::new(state.db.clone())
        .submit_order(&payload.order_id, &identity)
        .await?;

    state.broadcast_order(EventType::StatusChanged, &order);
    Ok(Json(OrderResponse { order }))
}

/// PUT /api/table-orders/status/{id} - 厨房侧状态流转
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateStatusPayload>,
) -> AppResult<Json<OrderResponse>> {
    let order = OrderService::new(state.db.clone())
        .update_status(&id, payload.status)
        .await?;

    state.broadcast_order(EventType::StatusChanged, &order);
    Ok(Json(OrderResponse { order }))
}
