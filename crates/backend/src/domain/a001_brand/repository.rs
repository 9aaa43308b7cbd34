use chrono::Utc;
use contracts::domain::a001_brand::aggregate::{Brand, BrandId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a001_brand")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub is_visible: bool,
    pub primary_hex: Option<String>,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Brand {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        Brand {
            base: BaseAggregate::with_metadata(BrandId(uuid), metadata),
            name: m.name,
            slug: m.slug,
            description: m.description,
            is_visible: m.is_visible,
            primary_hex: m.primary_hex,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn active_from(aggregate: &Brand) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.to_string_id()),
        name: Set(aggregate.name.clone()),
        slug: Set(aggregate.slug.clone()),
        description: Set(aggregate.description.clone()),
        is_visible: Set(aggregate.is_visible),
        primary_hex: Set(aggregate.primary_hex.clone()),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

fn list_condition(q: &str, is_visible: Option<bool>) -> Condition {
    let mut cond = Condition::all().add(Column::IsDeleted.eq(false));
    if !q.is_empty() {
        cond = cond.add(
            Condition::any()
                .add(Column::Name.contains(q))
                .add(Column::Slug.contains(q))
                .add(Column::Description.contains(q)),
        );
    }
    if let Some(visible) = is_visible {
        cond = cond.add(Column::IsVisible.eq(visible));
    }
    cond
}

pub async fn list_all() -> anyhow::Result<Vec<Brand>> {
    let mut items: Vec<Brand> = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    items.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    Ok(items)
}

/// Paginated list with substring search and the ternary visibility filter
pub async fn list_paginated(
    limit: u64,
    offset: u64,
    sort_by: &str,
    sort_desc: bool,
    q: &str,
    is_visible: Option<bool>,
) -> anyhow::Result<(Vec<Brand>, u64)> {
    let cond = list_condition(q, is_visible);

    let total = Entity::find().filter(cond.clone()).count(conn()).await?;

    let mut query = Entity::find().filter(cond);
    query = match sort_by {
        "slug" => {
            if sort_desc {
                query.order_by_desc(Column::Slug)
            } else {
                query.order_by_asc(Column::Slug)
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

    let items: Vec<Brand> = query
        .offset(offset)
        .limit(limit)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok((items, total))
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Brand>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
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

pub async fn insert(aggregate: &Brand) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    active_from(aggregate).insert(conn()).await?;
    Ok(uuid)
}

pub async fn update(aggregate: &Brand) -> anyhow::Result<()> {
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

/// Clear the soft-delete flag; the record reappears unchanged
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
