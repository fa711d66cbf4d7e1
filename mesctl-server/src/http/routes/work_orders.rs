//! Work-order endpoints

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mesctl_core::status::OrderStatus;
use mesctl_core::work_order::{NewWorkOrder, WorkOrder, WorkOrderPatch};

use crate::http::error::ApiError;
use crate::http::extractors::ValidUuid;
use crate::http::server::AppState;
use crate::models::{ListParams, ListWindow, Notes, OrderNumber, Paginated, ProductName};

/// Create work order request
#[derive(Debug, Deserialize)]
pub struct CreateWorkOrderRequest {
    pub order_number: String,
    pub product_name: String,
    pub quantity: i32,
    pub status: Option<OrderStatus>,
    pub due_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

/// Update work order request - every field optional
#[derive(Debug, Default, Deserialize)]
pub struct UpdateWorkOrderRequest {
    pub order_number: Option<String>,
    pub product_name: Option<String>,
    pub quantity: Option<i32>,
    pub status: Option<OrderStatus>,
    pub due_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

/// Full work-order response, server timestamps included
#[derive(Debug, Serialize, Deserialize)]
pub struct WorkOrderResponse {
    pub id: Uuid,
    pub order_number: String,
    pub product_name: String,
    pub quantity: i32,
    pub status: OrderStatus,
    pub due_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<WorkOrder> for WorkOrderResponse {
    fn from(order: WorkOrder) -> Self {
        Self {
            id: order.id,
            order_number: order.order_number,
            product_name: order.product_name,
            quantity: order.quantity,
            status: order.status,
            due_date: order.due_date,
            notes: order.notes,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

/// POST /work-orders - create a new work order
async fn create_work_order(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateWorkOrderRequest>,
) -> Result<(StatusCode, Json<WorkOrderResponse>), ApiError> {
    let order_number = OrderNumber::new(&req.order_number)?;
    let product_name = ProductName::new(&req.product_name)?;
    let notes = req.notes.as_deref().map(Notes::new).transpose()?;

    let created = state
        .service
        .create(NewWorkOrder {
            order_number: order_number.into_string(),
            product_name: product_name.into_string(),
            quantity: req.quantity,
            status: req.status,
            due_date: req.due_date,
            notes: notes.map(Notes::into_string),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// GET /work-orders/{id} - fetch one work order
async fn get_work_order(
    State(state): State<Arc<AppState>>,
    ValidUuid(id): ValidUuid,
) -> Result<Json<WorkOrderResponse>, ApiError> {
    let order = state
        .service
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            resource: "work order",
            id: id.to_string(),
        })?;

    Ok(Json(order.into()))
}

/// GET /work-orders - paginated listing
async fn list_work_orders(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Paginated<WorkOrderResponse>>, ApiError> {
    let window = ListWindow::from(params);

    let items = state.service.list(window.skip, window.limit).await?;
    let total = state.service.count().await?;

    Ok(Json(Paginated {
        items: items.into_iter().map(WorkOrderResponse::from).collect(),
        total,
        skip: window.skip,
        limit: window.limit,
    }))
}

/// PUT /work-orders/{id} - partial update
async fn update_work_order(
    State(state): State<Arc<AppState>>,
    ValidUuid(id): ValidUuid,
    Json(req): Json<UpdateWorkOrderRequest>,
) -> Result<Json<WorkOrderResponse>, ApiError> {
    let order_number = req
        .order_number
        .as_deref()
        .map(OrderNumber::new)
        .transpose()?;
    let product_name = req
        .product_name
        .as_deref()
        .map(ProductName::new)
        .transpose()?;
    let notes = req.notes.as_deref().map(Notes::new).transpose()?;

    let patch = WorkOrderPatch {
        order_number: order_number.map(OrderNumber::into_string),
        product_name: product_name.map(ProductName::into_string),
        quantity: req.quantity,
        status: req.status,
        due_date: req.due_date,
        notes: notes.map(Notes::into_string),
    };

    let updated = state
        .service
        .update(id, patch)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            resource: "work order",
            id: id.to_string(),
        })?;

    Ok(Json(updated.into()))
}

/// DELETE /work-orders/{id} - remove a work order
async fn delete_work_order(
    State(state): State<Arc<AppState>>,
    ValidUuid(id): ValidUuid,
) -> Result<StatusCode, ApiError> {
    let deleted = state.service.delete(id).await?;
    if !deleted {
        return Err(ApiError::NotFound {
            resource: "work order",
            id: id.to_string(),
        });
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Work-order routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/work-orders",
            get(list_work_orders).post(create_work_order),
        )
        .route(
            "/work-orders/{id}",
            get(get_work_order)
                .put(update_work_order)
                .delete(delete_work_order),
        )
}
