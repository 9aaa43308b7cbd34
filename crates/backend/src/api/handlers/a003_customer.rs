use axum::extract::{Path, Query};
use axum::Json;
use serde_json::json;

use super::{error_response, parse_id, ApiError, ListQuery, PaginatedResponse};
use crate::domain::a003_customer;
use contracts::domain::a003_customer::aggregate::{Customer, CustomerDto};

/// GET /api/customer
pub async fn list_all() -> Result<Json<Vec<Customer>>, ApiError> {
    match a003_customer::service::list_all().await {
        Ok(v) => Ok(Json(v)),
        Err(e) => Err(error_response(e)),
    }
}

/// GET /api/customer/list
pub async fn list_paginated(
    Query(query): Query<ListQuery>,
) -> Result<Json<PaginatedResponse<Customer>>, ApiError> {
    let limit = query.limit.unwrap_or(100);
    let offset = query.offset.unwrap_or(0);
    let sort_by = query.sort_by.unwrap_or_else(|| "name".to_string());
    let sort_desc = query.sort_desc.unwrap_or(false);
    let search = query.search.unwrap_or_default();

    match a003_customer::service::list_paginated(limit, offset, &sort_by, sort_desc, &search).await
    {
        Ok((items, total)) => Ok(Json(PaginatedResponse::new(items, total, limit, offset))),
        Err(e) => Err(error_response(e)),
    }
}

/// GET /api/customer/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Customer>, ApiError> {
    let uuid = parse_id(&id)?;
    match a003_customer::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(error_response(
            contracts::domain::common::DomainError::NotFound,
        )),
        Err(e) => Err(error_response(e)),
    }
}

/// POST /api/customer
pub async fn upsert(Json(dto): Json<CustomerDto>) -> Result<Json<serde_json::Value>, ApiError> {
    let result = if let Some(id) = dto.id.clone() {
        a003_customer::service::update(dto).await.map(|_| id)
    } else {
        a003_customer::service::create(dto)
            .await
            .map(|id| id.to_string())
    };
    match result {
        Ok(id) => Ok(Json(json!({"id": id}))),
        Err(e) => Err(error_response(e)),
    }
}

/// DELETE /api/customer/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), ApiError> {
    let uuid = parse_id(&id)?;
    a003_customer::service::delete(uuid)
        .await
        .map_err(error_response)
}

/// POST /api/customer/:id/restore
pub async fn restore(Path(id): Path<String>) -> Result<(), ApiError> {
    let uuid = parse_id(&id)?;
    a003_customer::service::restore(uuid)
        .await
        .map_err(error_response)
}
