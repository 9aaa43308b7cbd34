// Aggregate handlers (a001-a005)
pub mod a001_brand;
pub mod a002_category;
pub mod a003_customer;
pub mod a004_product;
pub mod a005_order;

use axum::http::StatusCode;
use axum::Json;
use contracts::domain::common::DomainError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub type ApiError = (StatusCode, Json<Value>);

/// Map a domain failure to its HTTP shape. Storage failures are logged
/// server-side and surface as an opaque 500.
pub fn error_response(err: DomainError) -> ApiError {
    let status = match &err {
        DomainError::NotFound => StatusCode::NOT_FOUND,
        DomainError::UniquenessConflict { .. } => StatusCode::CONFLICT,
        DomainError::Storage(e) => {
            tracing::error!("Storage error: {:#}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "internal server error"})),
            );
        }
        _ => StatusCode::BAD_REQUEST,
    };
    (status, Json(json!({"error": err.to_string()})))
}

pub fn parse_id(id: &str) -> Result<uuid::Uuid, ApiError> {
    uuid::Uuid::parse_str(id).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "invalid ID"})),
        )
    })
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub sort_by: Option<String>,
    pub sort_desc: Option<bool>,
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
}

impl<T> PaginatedResponse<T> {
    pub fn new(items: Vec<T>, total: u64, limit: u64, offset: u64) -> Self {
        let page = if limit > 0 { offset / limit } else { 0 };
        let total_pages = if limit > 0 {
            (total + limit - 1) / limit
        } else {
            0
        };
        Self {
            items,
            total,
            page,
            page_size: limit,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_math() {
        let r = PaginatedResponse::<u8>::new(vec![], 101, 20, 40);
        assert_eq!(r.page, 2);
        assert_eq!(r.total_pages, 6);

        let r = PaginatedResponse::<u8>::new(vec![], 0, 20, 0);
        assert_eq!(r.total_pages, 0);

        let r = PaginatedResponse::<u8>::new(vec![], 5, 0, 0);
        assert_eq!(r.page, 0);
        assert_eq!(r.total_pages, 0);
    }

    #[test]
    fn test_error_status_mapping() {
        let (status, _) = error_response(DomainError::NotFound);
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = error_response(DomainError::UniquenessConflict { field: "slug" });
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = error_response(DomainError::Validation("bad".into()));
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = error_response(DomainError::HierarchyCycle);
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = error_response(DomainError::Storage(anyhow::anyhow!("boom")));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.0["error"], "internal server error");
    }

    #[test]
    fn test_parse_id_rejects_garbage() {
        assert!(parse_id("not-a-uuid").is_err());
        assert!(parse_id("6f7c2f4e-0000-0000-0000-000000000000").is_ok());
    }
}
