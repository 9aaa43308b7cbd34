use axum::extract::Path;
use axum::Json;
use serde_json::json;

use super::{error_response, parse_id, ApiError};
use crate::domain::a002_category;
use contracts::domain::a002_category::aggregate::{Category, CategoryDto};
use contracts::domain::a004_product::aggregate::Product;

/// GET /api/category
pub async fn list_all() -> Result<Json<Vec<Category>>, ApiError> {
    match a002_category::service::list_all().await {
        Ok(v) => Ok(Json(v)),
        Err(e) => Err(error_response(e)),
    }
}

/// GET /api/category/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Category>, ApiError> {
    let uuid = parse_id(&id)?;
    match a002_category::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(error_response(
            contracts::domain::common::DomainError::NotFound,
        )),
        Err(e) => Err(error_response(e)),
    }
}

/// POST /api/category
pub async fn upsert(Json(dto): Json<CategoryDto>) -> Result<Json<serde_json::Value>, ApiError> {
    let result = if let Some(id) = dto.id.clone() {
        a002_category::service::update(dto).await.map(|_| id)
    } else {
        a002_category::service::create(dto)
            .await
            .map(|id| id.to_string())
    };
    match result {
        Ok(id) => Ok(Json(json!({"id": id}))),
        Err(e) => Err(error_response(e)),
    }
}

/// DELETE /api/category/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), ApiError> {
    let uuid = parse_id(&id)?;
    a002_category::service::delete(uuid)
        .await
        .map_err(error_response)
}

/// POST /api/category/:id/restore
pub async fn restore(Path(id): Path<String>) -> Result<(), ApiError> {
    let uuid = parse_id(&id)?;
    a002_category::service::restore(uuid)
        .await
        .map_err(error_response)
}

/// GET /api/category/:id/products
pub async fn products_of(Path(id): Path<String>) -> Result<Json<Vec<Product>>, ApiError> {
    let uuid = parse_id(&id)?;
    match a002_category::service::products_of(uuid).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => Err(error_response(e)),
    }
}

/// POST /api/category/:id/products/:product_id
pub async fn attach_product(
    Path((id, product_id)): Path<(String, String)>,
) -> Result<(), ApiError> {
    let category = parse_id(&id)?;
    let product = parse_id(&product_id)?;
    a002_category::service::attach_product(category, product)
        .await
        .map_err(error_response)
}

/// DELETE /api/category/:id/products/:product_id
pub async fn detach_product(
    Path((id, product_id)): Path<(String, String)>,
) -> Result<(), ApiError> {
    let category = parse_id(&id)?;
    let product = parse_id(&product_id)?;
    a002_category::service::detach_product(category, product)
        .await
        .map_err(error_response)
}
