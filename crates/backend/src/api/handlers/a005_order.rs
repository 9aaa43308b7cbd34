use axum::extract::{Path, Query};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use super::{error_response, parse_id, ApiError, PaginatedResponse};
use crate::domain::a005_order;
use contracts::domain::a005_order::aggregate::{Order, OrderDto, PendingBadge};
use contracts::enums::OrderStatus;

#[derive(Debug, Deserialize)]
pub struct ListOrdersQuery {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub sort_by: Option<String>,
    pub sort_desc: Option<bool>,
    pub search: Option<String>,
    pub status: Option<String>,
}

/// GET /api/order
pub async fn list_all() -> Result<Json<Vec<Order>>, ApiError> {
    match a005_order::service::list_all().await {
        Ok(v) => Ok(Json(v)),
        Err(e) => Err(error_response(e)),
    }
}

/// GET /api/order/list
pub async fn list_paginated(
    Query(query): Query<ListOrdersQuery>,
) -> Result<Json<PaginatedResponse<Order>>, ApiError> {
    let limit = query.limit.unwrap_or(100);
    let offset = query.offset.unwrap_or(0);
    let sort_by = query.sort_by.unwrap_or_else(|| "created_at".to_string());
    let sort_desc = query.sort_desc.unwrap_or(true);
    let search = query.search.unwrap_or_default();
    let status = query.status.as_deref().and_then(OrderStatus::from_code);

    match a005_order::service::list_paginated(limit, offset, &sort_by, sort_desc, &search, status)
        .await
    {
        Ok((items, total)) => Ok(Json(PaginatedResponse::new(items, total, limit, offset))),
        Err(e) => Err(error_response(e)),
    }
}

/// GET /api/order/pending-badge
pub async fn pending_badge() -> Result<Json<PendingBadge>, ApiError> {
    match a005_order::service::pending_badge().await {
        Ok(v) => Ok(Json(v)),
        Err(e) => Err(error_response(e)),
    }
}

/// GET /api/order/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Order>, ApiError> {
    let uuid = parse_id(&id)?;
    match a005_order::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(error_response(
            contracts::domain::common::DomainError::NotFound,
        )),
        Err(e) => Err(error_response(e)),
    }
}

/// POST /api/order
pub async fn upsert(Json(dto): Json<OrderDto>) -> Result<Json<serde_json::Value>, ApiError> {
    let result = if let Some(id) = dto.id.clone() {
        a005_order::service::update(dto).await.map(|_| id)
    } else {
        a005_order::service::create(dto)
            .await
            .map(|id| id.to_string())
    };
    match result {
        Ok(id) => Ok(Json(json!({"id": id}))),
        Err(e) => Err(error_response(e)),
    }
}

/// DELETE /api/order/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), ApiError> {
    let uuid = parse_id(&id)?;
    a005_order::service::delete(uuid)
        .await
        .map_err(error_response)
}

/// POST /api/order/:id/restore
pub async fn restore(Path(id): Path<String>) -> Result<(), ApiError> {
    let uuid = parse_id(&id)?;
    a005_order::service::restore(uuid)
        .await
        .map_err(error_response)
}
