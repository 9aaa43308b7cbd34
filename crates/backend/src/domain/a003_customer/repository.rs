use chrono::Utc;
use contracts::domain::a003_customer::aggregate::{Customer, CustomerId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a003_customer")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Customer {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        Customer {
            base: BaseAggregate::with_metadata(CustomerId(uuid), metadata),
            name: m.name,
            email: m.email,
            phone: m.phone,
            address: m.address,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn active_from(aggregate: &Customer) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.to_string_id()),
        name: Set(aggregate.name.clone()),
        email: Set(aggregate.email.clone()),
        phone: Set(aggregate.phone.clone()),
        address: Set(aggregate.address.clone()),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

fn list_condition(q: &str) -> Condition {
    let mut cond = Condition::all().add(Column::IsDeleted.eq(false));
    if !q.is_empty() {
        cond = cond.add(
            Condition::any()
                .add(Column::Name.contains(q))
                .add(Column::Email.contains(q))
                .add(Column::Phone.contains(q)),
        );
    }
    cond
}

pub async fn list_all() -> anyhow::Result<Vec<Customer>> {
    let mut items: Vec<Customer> = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    items.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    Ok(items)
}

pub async fn list_paginated(
    limit: u64,
    offset: u64,
    sort_by: &str,
    sort_desc: bool,
    q: &str,
) -> anyhow::Result<(Vec<Customer>, u64)> {
    let cond = list_condition(q);

    let total = Entity::find().filter(cond.clone()).count(conn()).await?;

    let mut query = Entity::find().filter(cond);
    query = match sort_by {
        "email" => {
            if sort_desc {
                query.order_by_desc(Column::Email)
            } else {
                query.order_by_asc(Column::Email)
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

    let items: Vec<Customer> = query
        .offset(offset)
        .limit(limit)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok((items, total))
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Customer>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn email_taken(email: &str, exclude: Option<Uuid>) -> anyhow::Result<bool> {
    let mut query = Entity::find().filter(Column::Email.eq(email));
    if let Some(id) = exclude {
        query = query.filter(Column::Id.ne(id.to_string()));
    }
    Ok(query.count(conn()).await? > 0)
}

pub async fn exists(id: Uuid) -> anyhow::Result<bool> {
    let count = Entity::find()
        .filter(Column::Id.eq(id.to_string()))
        .filter(Column::IsDeleted.eq(false))
        .count(conn())
        .await?;
    Ok(count > 0)
}

pub async fn insert(aggregate: &Customer) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    active_from(aggregate).insert(conn()).await?;
    Ok(uuid)
}

pub async fn update(aggregate: &Customer) -> anyhow::Result<()> {
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
