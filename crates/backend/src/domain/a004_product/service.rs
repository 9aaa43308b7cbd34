use super::repository;
use crate::domain::a001_brand;
use contracts::domain::a004_product::aggregate::{Product, ProductDto};
use contracts::domain::common::DomainError;
use uuid::Uuid;

async fn ensure_unique(aggregate: &Product, exclude: Option<Uuid>) -> Result<(), DomainError> {
    if repository::name_taken(&aggregate.name, exclude).await? {
        return Err(DomainError::UniquenessConflict { field: "name" });
    }
    if repository::slug_taken(&aggregate.slug, exclude).await? {
        return Err(DomainError::UniquenessConflict { field: "slug" });
    }
    if repository::sku_taken(&aggregate.sku, exclude).await? {
        return Err(DomainError::UniquenessConflict { field: "sku" });
    }
    Ok(())
}

/// The referenced brand must exist and be live.
async fn check_brand(aggregate: &Product) -> Result<(), DomainError> {
    let brand = match aggregate.brand_id.as_deref() {
        Some(brand) => brand,
        None => return Ok(()),
    };
    let brand_id = Uuid::parse_str(brand)
        .map_err(|_| DomainError::Validation("invalid brand ID".into()))?;
    match a001_brand::repository::get_by_id(brand_id).await? {
        Some(b) if !b.base.metadata.is_deleted => Ok(()),
        _ => Err(DomainError::MissingReference { entity: "brand" }),
    }
}

pub async fn create(dto: ProductDto) -> Result<Uuid, DomainError> {
    let mut aggregate = Product::new_for_insert(
        dto.name,
        dto.description,
        dto.sku,
        dto.price,
        dto.quantity,
        dto.product_type,
        dto.is_visible.unwrap_or(true),
        dto.is_featured.unwrap_or(false),
        dto.published_at,
        dto.image_path,
        dto.brand_id,
    );

    aggregate.validate().map_err(DomainError::Validation)?;
    check_brand(&aggregate).await?;
    ensure_unique(&aggregate, None).await?;
    aggregate.before_write();

    let id = repository::insert(&aggregate).await?;
    Ok(id)
}

pub async fn update(dto: ProductDto) -> Result<(), DomainError> {
    let id = dto
        .id
        .as_deref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| DomainError::Validation("invalid product ID".into()))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or(DomainError::NotFound)?;
    if aggregate.base.metadata.is_deleted {
        return Err(DomainError::NotFound);
    }

    aggregate.update(&dto);
    aggregate.validate().map_err(DomainError::Validation)?;
    check_brand(&aggregate).await?;
    ensure_unique(&aggregate, Some(id)).await?;
    aggregate.before_write();

    repository::update(&aggregate).await?;
    Ok(())
}

pub async fn delete(id: Uuid) -> Result<(), DomainError> {
    if repository::soft_delete(id).await? {
        Ok(())
    } else {
        Err(DomainError::NotFound)
    }
}

pub async fn restore(id: Uuid) -> Result<(), DomainError> {
    if repository::restore(id).await? {
        Ok(())
    } else {
        Err(DomainError::NotFound)
    }
}

pub async fn get_by_id(id: Uuid) -> Result<Option<Product>, DomainError> {
    Ok(repository::get_by_id(id).await?)
}

pub async fn list_all() -> Result<Vec<Product>, DomainError> {
    Ok(repository::list_all().await?)
}

#[allow(clippy::too_many_arguments)]
pub async fn list_paginated(
    limit: u64,
    offset: u64,
    sort_by: &str,
    sort_desc: bool,
    q: &str,
    is_visible: Option<bool>,
    brand_id: Option<&str>,
) -> Result<(Vec<Product>, u64), DomainError> {
    Ok(
        repository::list_paginated(limit, offset, sort_by, sort_desc, q, is_visible, brand_id)
            .await?,
    )
}
