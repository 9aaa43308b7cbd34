use super::repository;
use contracts::domain::a003_customer::aggregate::{Customer, CustomerDto};
use contracts::domain::common::DomainError;
use uuid::Uuid;

pub async fn create(dto: CustomerDto) -> Result<Uuid, DomainError> {
    let mut aggregate = Customer::new_for_insert(dto.name, dto.email, dto.phone, dto.address);

    aggregate.validate().map_err(DomainError::Validation)?;
    if repository::email_taken(&aggregate.email, None).await? {
        return Err(DomainError::UniquenessConflict { field: "email" });
    }
    aggregate.before_write();

    let id = repository::insert(&aggregate).await?;
    Ok(id)
}

pub async fn update(dto: CustomerDto) -> Result<(), DomainError> {
    let id = dto
        .id
        .as_deref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| DomainError::Validation("invalid customer ID".into()))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or(DomainError::NotFound)?;
    if aggregate.base.metadata.is_deleted {
        return Err(DomainError::NotFound);
    }

    aggregate.update(&dto);
    aggregate.validate().map_err(DomainError::Validation)?;
    if repository::email_taken(&aggregate.email, Some(id)).await? {
        return Err(DomainError::UniquenessConflict { field: "email" });
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

pub async fn get_by_id(id: Uuid) -> Result<Option<Customer>, DomainError> {
    Ok(repository::get_by_id(id).await?)
}

pub async fn list_all() -> Result<Vec<Customer>, DomainError> {
    Ok(repository::list_all().await?)
}

pub async fn list_paginated(
    limit: u64,
    offset: u64,
    sort_by: &str,
    sort_desc: bool,
    q: &str,
) -> Result<(Vec<Customer>, u64), DomainError> {
    Ok(repository::list_paginated(limit, offset, sort_by, sort_desc, q).await?)
}
