use chrono::Utc;
use contracts::domain::a004_product::aggregate::{Product, ProductId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use contracts::enums::ProductType;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a004_product")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub sku: String,
    pub price: f64,
    pub quantity: i32,
    pub product_type: String,
    pub is_visible: bool,
    pub is_featured: bool,
    pub published_at: Option<String>,
    pub image_path: Option<String>,
    pub brand_id: Option<String>,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Product {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        Product {
            base: BaseAggregate::with_metadata(ProductId(uuid), metadata),
            name: m.name,
            slug: m.slug,
            description: m.description,
            sku: m.sku,
            price: m.price,
            quantity: m.quantity,
            product_type: ProductType::from_code(&m.product_type)
                .unwrap_or(ProductType::Deliverable),
            is_visible: m.is_visible,
            is_featured: m.is_featured,
            published_at: m.published_at,
            image_path: m.image_path,
            brand_id: m.brand_id,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn active_from(aggregate: &Product) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.to_string_id()),
        name: Set(aggregate.name.clone()),
        slug: Set(aggregate.slug.clone()),
        description: Set(aggregate.description.clone()),
        sku: Set(aggregate.sku.clone()),
        price: Set(aggregate.price),
        quantity: Set(aggregate.quantity),
        product_type: Set(aggregate.product_type.code().to_string()),
        is_visible: Set(aggregate.is_visible),
        is_featured: Set(aggregate.is_featured),
        published_at: Set(aggregate.published_at.clone()),
        image_path: Set(aggregate.image_path.clone()),
        brand_id: Set(aggregate.brand_id.clone()),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

fn list_condition(q: &str, is_visible: Option<bool>, brand_id: Option<&str>) -> Condition {
    let mut cond = Condition::all().add(Column::IsDeleted.eq(false));
    if !q.is_empty() {
        cond = cond.add(
            Condition::any()
                .add(Column::Name.contains(q))
                .add(Column::Slug.contains(q))
                .add(Column::Description.contains(q))
                .add(Column::Sku.contains(q)),
        );
    }
    if let Some(visible) = is_visible {
        cond = cond.add(Column::IsVisible.eq(visible));
    }
    if let Some(brand) = brand_id {
        cond = cond.add(Column::BrandId.eq(brand));
    }
    cond
}

pub async fn list_all() -> anyhow::Result<Vec<Product>> {
    let mut items: Vec<Product> = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    items.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    Ok(items)
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
) -> anyhow::Result<(Vec<Product>, u64)> {
    let cond = list_condition(q, is_visible, brand_id);

    let total = Entity::find().filter(cond.clone()).count(conn()).await?;

    let mut query = Entity::find().filter(cond);
    query = match sort_by {
        "sku" => {
            if sort_desc {
                query.order_by_desc(Column::Sku)
            } else {
                query.order_by_asc(Column::Sku)
            }
        }
        "price" => {
            if sort_desc {
                query.order_by_desc(Column::Price)
            } else {
                query.order_by_asc(Column::Price)
            }
        }
        "quantity" => {
            if sort_desc {
                query.order_by_desc(Column::Quantity)
            } else {
                query.order_by_asc(Column::Quantity)
            }
        }
        "created_at" => {
            if sort_desc {
                query.order_by_desc(Column::CreatedAt)
            } else {
                query.order_by_asc(Column::CreatedAt)
            }
        }
        _ => {
            if sort_desc {
                query.order_by_desc(Column::Name)
            } else {
                query.order_by_asc(Column::Name)
            }
        }
    };

    let items: Vec<Product> = query
        .offset(offset)
        .limit(limit)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok((items, total))
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Product>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn get_by_ids(ids: &[Uuid]) -> anyhow::Result<Vec<Product>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let keys: Vec<String> = ids.iter().map(Uuid::to_string).collect();
    let mut items: Vec<Product> = Entity::find()
        .filter(Column::Id.is_in(keys))
        .filter(Column::IsDeleted.eq(false))
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    items.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    Ok(items)
}

pub async fn exists(id: Uuid) -> anyhow::Result<bool> {
    let count = Entity::find()
        .filter(Column::Id.eq(id.to_string()))
        .filter(Column::IsDeleted.eq(false))
        .count(conn())
        .await?;
    Ok(count > 0)
}

pub async fn name_taken(name: &str, exclude: Option<Uuid>) -> anyhow::Result<bool> {
    let mut query = Entity::find().filter(Column::Name.eq(name));
    if let Some(id) = exclude {
        query = query.filter(Column::Id.ne(id.to_string()));
    }
    Ok(query.count(conn()).await? > 0)
}

pub async fn slug_taken(slug: &str, exclude: Option<Uuid>) -> anyhow::Result<bool> {
    let mut query = Entity::find().filter(Column::Slug.eq(slug));
    if let Some(id) = exclude {
        query = query.filter(Column::Id.ne(id.to_string()));
    }
    Ok(query.count(conn()).await? > 0)
}

pub async fn sku_taken(sku: &str, exclude: Option<Uuid>) -> anyhow::Result<bool> {
    let mut query = Entity::find().filter(Column::Sku.eq(sku));
    if let Some(id) = exclude {
        query = query.filter(Column::Id.ne(id.to_string()));
    }
    Ok(query.count(conn()).await? > 0)
}

pub async fn insert(aggregate: &Product) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    active_from(aggregate).insert(conn()).await?;
    Ok(uuid)
}

pub async fn update(aggregate: &Product) -> anyhow::Result<()> {
    let mut active = active_from(aggregate);
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.update(conn()).await?;
    Ok(())
}

pub async fn soft_delete(id: Uuid) -> anyhow::Result<bool> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::IsDeleted, Expr::value(true))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id.to_string()))
        .filter(Column::IsDeleted.eq(false))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}

pub async fn restore(id: Uuid) -> anyhow::Result<bool> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::IsDeleted, Expr::value(false))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id.to_string()))
        .filter(Column::IsDeleted.eq(true))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, QueryTrait};

    fn search_sql(q: &str) -> String {
        Entity::find()
            .filter(list_condition(q, None, None))
            .build(DatabaseBackend::Sqlite)
            .to_string()
    }

    #[test]
    fn test_search_matches_name_slug_and_description() {
        let sql = search_sql("gizmo");
        assert!(sql.contains("\"name\" LIKE"));
        assert!(sql.contains("\"slug\" LIKE"));
        assert!(sql.contains("\"description\" LIKE"));
    }

    #[test]
    fn test_empty_search_adds_no_like_clauses() {
        let sql = search_sql("");
        assert!(!sql.contains("LIKE"));
        assert!(sql.contains("\"is_deleted\""));
    }
}
