use super::repository;
use crate::domain::a004_product;
use contracts::domain::a002_category::aggregate::{creates_cycle, Category, CategoryDto};
use contracts::domain::a004_product::aggregate::Product;
use contracts::domain::common::DomainError;
use uuid::Uuid;

/// The proposed parent must exist, be live, and not make the edited record
/// its own ancestor. `editing` is None during create (a fresh ID cannot sit
/// on its own ancestor chain yet).
async fn check_parent(aggregate: &Category, editing: Option<Uuid>) -> Result<(), DomainError> {
    let parent = match aggregate.parent_uuid() {
        Some(parent) => parent,
        None => return Ok(()),
    };

    match repository::get_by_id(parent).await? {
        Some(p) if !p.base.metadata.is_deleted => {}
        _ => return Err(DomainError::MissingReference { entity: "category" }),
    }

    if let Some(id) = editing {
        let parents = repository::parent_map().await?;
        if creates_cycle(id, parent, &parents) {
            return Err(DomainError::HierarchyCycle);
        }
    }
    Ok(())
}

pub async fn create(dto: CategoryDto) -> Result<Uuid, DomainError> {
    let mut aggregate = Category::new_for_insert(
        dto.name,
        dto.description,
        dto.is_visible.unwrap_or(true),
        dto.parent_id,
    );

    aggregate.validate().map_err(DomainError::Validation)?;
    check_parent(&aggregate, None).await?;
    if repository::slug_taken(&aggregate.slug, None).await? {
        return Err(DomainError::UniquenessConflict { field: "slug" });
    }
    aggregate.before_write();

    let id = repository::insert(&aggregate).await?;
    Ok(id)
}

pub async fn update(dto: CategoryDto) -> Result<(), DomainError> {
    let id = dto
        .id
        .as_deref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| DomainError::Validation("invalid category ID".into()))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or(DomainError::NotFound)?;
    if aggregate.base.metadata.is_deleted {
        return Err(DomainError::NotFound);
    }

    aggregate.update(&dto);
    aggregate.validate().map_err(DomainError::Validation)?;
    check_parent(&aggregate, Some(id)).await?;
    if repository::slug_taken(&aggregate.slug, Some(id)).await? {
        return Err(DomainError::UniquenessConflict { field: "slug" });
    }
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

pub async fn get_by_id(id: Uuid) -> Result<Option<Category>, DomainError> {
    Ok(repository::get_by_id(id).await?)
}

pub async fn list_all() -> Result<Vec<Category>, DomainError> {
    Ok(repository::list_all().await?)
}

async fn check_pair(category_id: Uuid, product_id: Uuid) -> Result<(), DomainError> {
    match repository::get_by_id(category_id).await? {
        Some(c) if !c.base.metadata.is_deleted => {}
        _ => return Err(DomainError::NotFound),
    }
    if !a004_product::repository::exists(product_id).await? {
        return Err(DomainError::MissingReference { entity: "product" });
    }
    Ok(())
}

/// Idempotent for callers: attaching an already-attached pair is a success.
pub async fn attach_product(category_id: Uuid, product_id: Uuid) -> Result<(), DomainError> {
    check_pair(category_id, product_id).await?;
    repository::attach(category_id, product_id).await?;
    Ok(())
}

pub async fn detach_product(category_id: Uuid, product_id: Uuid) -> Result<(), DomainError> {
    check_pair(category_id, product_id).await?;
    if repository::detach(category_id, product_id).await? {
        Ok(())
    } else {
        Err(DomainError::NotFound)
    }
}

pub async fn products_of(category_id: Uuid) -> Result<Vec<Product>, DomainError> {
    match repository::get_by_id(category_id).await? {
        Some(c) if !c.base.metadata.is_deleted => {}
        _ => return Err(DomainError::NotFound),
    }
    let ids = repository::product_ids_of(category_id).await?;
    Ok(a004_product::repository::get_by_ids(&ids).await?)
}
