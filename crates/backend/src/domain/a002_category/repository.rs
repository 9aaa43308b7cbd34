use chrono::Utc;
use contracts::domain::a002_category::aggregate::{Category, CategoryId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_category")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub is_visible: bool,
    pub parent_id: Option<String>,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Category {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        Category {
            base: BaseAggregate::with_metadata(CategoryId(uuid), metadata),
            name: m.name,
            slug: m.slug,
            description: m.description,
            is_visible: m.is_visible,
            parent_id: m.parent_id,
        }
    }
}

/// Category x product association rows (timestamps only beyond the pair)
pub mod pivot {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "a002_category_product")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub category_id: String,
        #[sea_orm(primary_key, auto_increment = false)]
        pub product_id: String,
        pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn active_from(aggregate: &Category) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.to_string_id()),
        name: Set(aggregate.name.clone()),
        slug: Set(aggregate.slug.clone()),
        description: Set(aggregate.description.clone()),
        is_visible: Set(aggregate.is_visible),
        parent_id: Set(aggregate.parent_id.clone()),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

pub async fn list_all() -> anyhow::Result<Vec<Category>> {
    let mut items: Vec<Category> = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    // Roots first, then by name (case-insensitive)
    items.sort_by(|a, b| match (a.parent_id.is_none(), b.parent_id.is_none()) {
        (true, false) => std::cmp::Ordering::Less,
        (false, true) => std::cmp::Ordering::Greater,
        _ => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
    });
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Category>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn slug_taken(slug: &str, exclude: Option<Uuid>) -> anyhow::Result<bool> {
    let mut query = Entity::find().filter(Column::Slug.eq(slug));
    if let Some(id) = exclude {
        query = query.filter(Column::Id.ne(id.to_string()));
    }
    Ok(query.count(conn()).await? > 0)
}

/// Parent pointer of every live category, for the ancestor walk
pub async fn parent_map() -> anyhow::Result<HashMap<Uuid, Option<Uuid>>> {
    let rows = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .all(conn())
        .await?;
    let mut map = HashMap::with_capacity(rows.len());
    for row in rows {
        let id = match Uuid::parse_str(&row.id) {
            Ok(id) => id,
            Err(_) => continue,
        };
        let parent = row.parent_id.as_deref().and_then(|s| Uuid::parse_str(s).ok());
        map.insert(id, parent);
    }
    Ok(map)
}

pub async fn insert(aggregate: &Category) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    active_from(aggregate).insert(conn()).await?;
    Ok(uuid)
}

pub async fn update(aggregate: &Category) -> anyhow::Result<()> {
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

// ============================================================================
// Product association
// ============================================================================

pub async fn is_attached(category_id: Uuid, product_id: Uuid) -> anyhow::Result<bool> {
    let count = pivot::Entity::find()
        .filter(pivot::Column::CategoryId.eq(category_id.to_string()))
        .filter(pivot::Column::ProductId.eq(product_id.to_string()))
        .count(conn())
        .await?;
    Ok(count > 0)
}

/// Returns false when the pair was already attached
pub async fn attach(category_id: Uuid, product_id: Uuid) -> anyhow::Result<bool> {
    if is_attached(category_id, product_id).await? {
        return Ok(false);
    }
    let active = pivot::ActiveModel {
        category_id: Set(category_id.to_string()),
        product_id: Set(product_id.to_string()),
        created_at: Set(Some(Utc::now())),
    };
    active.insert(conn()).await?;
    Ok(true)
}

/// Returns false when no such association existed
pub async fn detach(category_id: Uuid, product_id: Uuid) -> anyhow::Result<bool> {
    let result = pivot::Entity::delete_many()
        .filter(pivot::Column::CategoryId.eq(category_id.to_string()))
        .filter(pivot::Column::ProductId.eq(product_id.to_string()))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}

pub async fn product_ids_of(category_id: Uuid) -> anyhow::Result<Vec<Uuid>> {
    let rows = pivot::Entity::find()
        .filter(pivot::Column::CategoryId.eq(category_id.to_string()))
        .all(conn())
        .await?;
    Ok(rows
        .into_iter()
        .filter_map(|r| Uuid::parse_str(&r.product_id).ok())
        .collect())
}
