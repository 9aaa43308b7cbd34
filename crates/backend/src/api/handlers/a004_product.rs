use axum::extract::{Path, Query};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use super::{error_response, parse_id, ApiError, PaginatedResponse};
use crate::domain::a004_product;
use contracts::domain::a004_product::aggregate::{Product, ProductDto};

#[derive(Debug, Deserialize)]
pub struct ListProductsQuery {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub sort_by: Option<String>,
    pub sort_desc: Option<bool>,
    pub search: Option<String>,
    pub is_visible: Option<bool>,
    pub brand_id: Option<String>,
}

/// GET /api/product
pub async fn list_all() -> Result<Json<Vec<Product>>, ApiError> {
    match a004_product::service::list_all().await {
        Ok(v) => Ok(Json(v)),
        Err(e) => Err(error_response(e)),
    }
}

/// GET /api/product/list
pub async fn list_paginated(
    Query(query): Query<ListProductsQuery>,
) -> Result<Json<PaginatedResponse<Product>>, ApiError> {
    let limit = query.limit.unwrap_or(100);
    let offset = query.offset.unwrap_or(0);
    let sort_by = query.sort_by.unwrap_or_else(|| "name".to_string());
    let sort_desc = query.sort_desc.unwrap_or(false);
    let search = query.search.unwrap_or_default();

    match a004_product::service::list_paginated(
        limit,
        offset,
        &sort_by,
        sort_desc,
        &search,
        query.is_visible,
        query.brand_id.as_deref(),
    )
    .await
    {
        Ok((items, total)) => Ok(Json(PaginatedResponse::new(items, total, limit, offset))),
        Err(e) => Err(error_response(e)),
    }
}

/// GET /api/product/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Product>, ApiError> {
    let uuid = parse_id(&id)?;
    match a004_product::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(error_response(
            contracts::domain::common::DomainError::NotFound,
        )),
        Err(e) => Err(error_response(e)),
    }
}

/// POST /api/product
pub async fn upsert(Json(dto): Json<ProductDto>) -> Result<Json<serde_json::Value>, ApiError> {
    let result = if let Some(id) = dto.id.clone() {
        a004_product::service::update(dto).await.map(|_| id)
    } else {
        a004_product::service::create(dto)
            .await
            .map(|id| id.to_string())
    };
    match result {
        Ok(id) => Ok(Json(json!({"id": id}))),
        Err(e) => Err(error_response(e)),
    }
}

/// DELETE /api/product/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), ApiError> {
    let uuid = parse_id(&id)?;
    a004_product::service::delete(uuid)
        .await
        .map_err(error_response)
}

/// POST /api/product/:id/restore
pub async fn restore(Path(id): Path<String>) -> Result<(), ApiError> {
    let uuid = parse_id(&id)?;
    a004_product::service::restore(uuid)
        .await
        .map_err(error_response)
}
