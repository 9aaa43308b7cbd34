use super::repository;
use crate::domain::{a003_customer, a004_product};
use contracts::domain::a005_order::aggregate::{Order, OrderDto, OrderLine, PendingBadge};
use contracts::domain::common::DomainError;
use rand::Rng;
use uuid::Uuid;

const NUMBER_ALLOC_ATTEMPTS: u32 = 16;

/// Tokens are drawn from this range, giving 6 or 7 digits
const NUMBER_TOKEN_RANGE: std::ops::Range<u32> = 100_000..10_000_000;

fn format_number(token: u32) -> String {
    format!("OR-{}", token)
}

/// Draw "OR-" + random numeric token, retrying on collision. The unique
/// index on the number column catches the race this check cannot.
async fn allocate_number() -> Result<String, DomainError> {
    for _ in 0..NUMBER_ALLOC_ATTEMPTS {
        let token: u32 = rand::thread_rng().gen_range(NUMBER_TOKEN_RANGE);
        let number = format_number(token);
        if !repository::number_exists(&number).await? {
            return Ok(number);
        }
    }
    Err(DomainError::Storage(anyhow::anyhow!(
        "could not allocate a free order number after {} attempts",
        NUMBER_ALLOC_ATTEMPTS
    )))
}

fn lines_from_dto(dto: &OrderDto) -> Vec<OrderLine> {
    dto.items
        .iter()
        .map(|item| OrderLine {
            product_id: item.product_id.clone(),
            quantity: item.quantity,
            unit_price: item.unit_price,
        })
        .collect()
}

/// The customer and every line product must exist and be live.
async fn check_references(aggregate: &Order) -> Result<(), DomainError> {
    let customer_id = Uuid::parse_str(&aggregate.customer_id)
        .map_err(|_| DomainError::Validation("invalid customer ID".into()))?;
    if !a003_customer::repository::exists(customer_id).await? {
        return Err(DomainError::MissingReference { entity: "customer" });
    }
    for line in &aggregate.lines {
        let product_id = Uuid::parse_str(&line.product_id)
            .map_err(|_| DomainError::Validation("invalid product ID".into()))?;
        if !a004_product::repository::exists(product_id).await? {
            return Err(DomainError::MissingReference { entity: "product" });
        }
    }
    Ok(())
}

pub async fn create(dto: OrderDto) -> Result<Uuid, DomainError> {
    let number = allocate_number().await?;
    let lines = lines_from_dto(&dto);
    let mut aggregate =
        Order::new_for_insert(number, dto.customer_id.clone(), dto.status, dto.notes, lines);

    aggregate.validate().map_err(DomainError::Validation)?;
    check_references(&aggregate).await?;
    aggregate.before_write();

    let id = repository::insert(&aggregate).await?;
    Ok(id)
}

pub async fn update(dto: OrderDto) -> Result<(), DomainError> {
    let id = dto
        .id
        .as_deref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| DomainError::Validation("invalid order ID".into()))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or(DomainError::NotFound)?;
    if aggregate.base.metadata.is_deleted {
        return Err(DomainError::NotFound);
    }

    // Status moves through the machine before any other field is applied
    aggregate.transition_to(dto.status)?;

    let lines = lines_from_dto(&dto);
    aggregate.update(&dto, lines);
    aggregate.validate().map_err(DomainError::Validation)?;
    check_references(&aggregate).await?;
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

pub async fn get_by_id(id: Uuid) -> Result<Option<Order>, DomainError> {
    Ok(repository::get_by_id(id).await?)
}

pub async fn list_all() -> Result<Vec<Order>, DomainError> {
    Ok(repository::list_all().await?)
}

pub async fn list_paginated(
    limit: u64,
    offset: u64,
    sort_by: &str,
    sort_desc: bool,
    q: &str,
    status: Option<contracts::enums::OrderStatus>,
) -> Result<(Vec<Order>, u64), DomainError> {
    Ok(repository::list_paginated(limit, offset, sort_by, sort_desc, q, status).await?)
}

/// Live pending count for the navigation badge
pub async fn pending_badge() -> Result<PendingBadge, DomainError> {
    let count = repository::pending_count().await?;
    Ok(PendingBadge::from_count(count))
}

#[cfg(test)]
mod tests {
    use super::{format_number, NUMBER_TOKEN_RANGE};

    #[test]
    fn test_number_format() {
        assert_eq!(format_number(100_000), "OR-100000");
        assert_eq!(format_number(9_999_999), "OR-9999999");
    }

    #[test]
    fn test_number_token_range_gives_six_or_seven_digits() {
        let shortest = format_number(NUMBER_TOKEN_RANGE.start);
        let longest = format_number(NUMBER_TOKEN_RANGE.end - 1);
        assert_eq!(shortest.len(), "OR-".len() + 6);
        assert_eq!(longest.len(), "OR-".len() + 7);
        assert!(shortest.starts_with("OR-"));
    }
}
