use axum::extract::{Path, Query};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use super::{error_response, parse_id, ApiError, PaginatedResponse};
use crate::domain::a001_brand;
use contracts::domain::a001_brand::aggregate::{Brand, BrandDto};

#[derive(Debug, Deserialize)]
pub struct ListBrandsQuery {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub sort_by: Option<String>,
    pub sort_desc: Option<bool>,
    pub search: Option<String>,
    pub is_visible: Option<bool>,
}

/// GET /api/brand
pub async fn list_all() -> Result<Json<Vec<Brand>>, ApiError> {
    match a001_brand::service::list_all().await {
        Ok(v) => Ok(Json(v)),
        Err(e) => Err(error_response(e)),
    }
}

/// GET /api/brand/list
pub async fn list_paginated(
    Query(query): Query<ListBrandsQuery>,
) -> Result<Json<PaginatedResponse<Brand>>, ApiError> {
    let limit = query.limit.unwrap_or(100);
    let offset = query.offset.unwrap_or(0);
    let sort_by = query.sort_by.unwrap_or_else(|| "name".to_string());
    let sort_desc = query.sort_desc.unwrap_or(false);
    let search = query.search.unwrap_or_default();

    match a001_brand::service::list_paginated(
        limit,
        offset,
        &sort_by,
        sort_desc,
        &search,
        query.is_visible,
    )
    .await
    {
        Ok((items, total)) => Ok(Json(PaginatedResponse::new(items, total, limit, offset))),
        Err(e) => Err(error_response(e)),
    }
}

/// GET /api/brand/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Brand>, ApiError> {
    let uuid = parse_id(&id)?;
    match a001_brand::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(error_response(
            contracts::domain::common::DomainError::NotFound,
        )),
        Err(e) => Err(error_response(e)),
    }
}

/// POST /api/brand
pub async fn upsert(Json(dto): Json<BrandDto>) -> Result<Json<serde_json::Value>, ApiError> {
    let result = if let Some(id) = dto.id.clone() {
        a001_brand::service::update(dto).await.map(|_| id)
    } else {
        a001_brand::service::create(dto)
            .await
            .map(|id| id.to_string())
    };
    match result {
        Ok(id) => Ok(Json(json!({"id": id}))),
        Err(e) => Err(error_response(e)),
    }
}

/// DELETE /api/brand/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), ApiError> {
    let uuid = parse_id(&id)?;
    a001_brand::service::delete(uuid).await.map_err(error_response)
}

/// POST /api/brand/:id/restore
pub async fn restore(Path(id): Path<String>) -> Result<(), ApiError> {
    let uuid = parse_id(&id)?;
    a001_brand::service::restore(uuid).await.map_err(error_response)
}
