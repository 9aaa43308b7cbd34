use super::repository;
use contracts::domain::a001_brand::aggregate::{Brand, BrandDto};
use contracts::domain::common::DomainError;
use uuid::Uuid;

/// Per-field uniqueness check, scoped to every record except the one edited.
///
/// The unique indexes on a001_brand are the hard guarantee; this pre-check
/// only exists to report the offending field to the user.
async fn ensure_unique(aggregate: &Brand, exclude: Option<Uuid>) -> Result<(), DomainError> {
    if repository::name_taken(&aggregate.name, exclude).await? {
        return Err(DomainError::UniquenessConflict { field: "name" });
    }
    if repository::slug_taken(&aggregate.slug, exclude).await? {
        return Err(DomainError::UniquenessConflict { field: "slug" });
    }
    Ok(())
}

pub async fn create(dto: BrandDto) -> Result<Uuid, DomainError> {
    let mut aggregate = Brand::new_for_insert(
        dto.name,
        dto.description,
        dto.is_visible.unwrap_or(true),
        dto.primary_hex,
    );

    aggregate.validate().map_err(DomainError::Validation)?;
    ensure_unique(&aggregate, None).await?;
    aggregate.before_write();

    let id = repository::insert(&aggregate).await?;
    Ok(id)
}

pub async fn update(dto: BrandDto) -> Result<(), DomainError> {
    let id = dto
        .id
        .as_deref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| DomainError::Validation("invalid brand ID".into()))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or(DomainError::NotFound)?;
    if aggregate.base.metadata.is_deleted {
        return Err(DomainError::NotFound);
    }

    aggregate.update(&dto);
    aggregate.validate().map_err(DomainError::Validation)?;
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

pub async fn get_by_id(id: Uuid) -> Result<Option<Brand>, DomainError> {
    Ok(repository::get_by_id(id).await?)
}

pub async fn list_all() -> Result<Vec<Brand>, DomainError> {
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
) -> Result<(Vec<Brand>, u64), DomainError> {
    Ok(repository::list_paginated(limit, offset, sort_by, sort_desc, q, is_visible).await?)
}
