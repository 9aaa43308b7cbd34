use chrono::Utc;
use contracts::domain::a005_order::aggregate::{Order, OrderId, OrderLine};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use contracts::enums::OrderStatus;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{
    ColumnTrait, Condition, DatabaseTransaction, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a005_order")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub number: String,
    pub customer_id: String,
    pub status: String,
    pub notes: Option<String>,
    pub total_price: f64,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Line rows; one row per wizard repeater entry, keyed by their own UUID
pub mod line {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "a005_order_line")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: String,
        pub order_id: String,
        pub product_id: String,
        pub quantity: i32,
        pub unit_price: f64,
        pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

fn assemble(m: Model, lines: Vec<OrderLine>) -> Order {
    let metadata = EntityMetadata {
        created_at: m.created_at.unwrap_or_else(Utc::now),
        updated_at: m.updated_at.unwrap_or_else(Utc::now),
        is_deleted: m.is_deleted,
        version: m.version,
    };
    let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

    Order {
        base: BaseAggregate::with_metadata(OrderId(uuid), metadata),
        number: m.number,
        customer_id: m.customer_id,
        status: OrderStatus::from_code(&m.status).unwrap_or(OrderStatus::Pending),
        notes: m.notes,
        total_price: m.total_price,
        lines,
    }
}

fn line_from_row(row: line::Model) -> OrderLine {
    OrderLine {
        product_id: row.product_id,
        quantity: row.quantity,
        unit_price: row.unit_price,
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn active_from(aggregate: &Order) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.to_string_id()),
        number: Set(aggregate.number.clone()),
        customer_id: Set(aggregate.customer_id.clone()),
        status: Set(aggregate.status.code().to_string()),
        notes: Set(aggregate.notes.clone()),
        total_price: Set(aggregate.total_price),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

async fn insert_lines(txn: &DatabaseTransaction, aggregate: &Order) -> anyhow::Result<()> {
    for l in &aggregate.lines {
        let active = line::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            order_id: Set(aggregate.to_string_id()),
            product_id: Set(l.product_id.clone()),
            quantity: Set(l.quantity),
            unit_price: Set(l.unit_price),
            created_at: Set(Some(Utc::now())),
        };
        active.insert(txn).await?;
    }
    Ok(())
}

async fn lines_of(order_id: &str) -> anyhow::Result<Vec<OrderLine>> {
    let rows = line::Entity::find()
        .filter(line::Column::OrderId.eq(order_id))
        .order_by_asc(line::Column::CreatedAt)
        .all(conn())
        .await?;
    Ok(rows.into_iter().map(line_from_row).collect())
}

/// Load lines for a batch of orders and group them by order id
async fn lines_grouped(order_ids: &[String]) -> anyhow::Result<HashMap<String, Vec<OrderLine>>> {
    if order_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = line::Entity::find()
        .filter(line::Column::OrderId.is_in(order_ids.to_vec()))
        .order_by_asc(line::Column::CreatedAt)
        .all(conn())
        .await?;
    let mut grouped: HashMap<String, Vec<OrderLine>> = HashMap::new();
    for row in rows {
        grouped
            .entry(row.order_id.clone())
            .or_default()
            .push(line_from_row(row));
    }
    Ok(grouped)
}

fn list_condition(q: &str, status: Option<OrderStatus>) -> Condition {
    let mut cond = Condition::all().add(Column::IsDeleted.eq(false));
    if !q.is_empty() {
        cond = cond.add(
            Condition::any()
                .add(Column::Number.contains(q))
                .add(Column::Notes.contains(q)),
        );
    }
    if let Some(status) = status {
        cond = cond.add(Column::Status.eq(status.code()));
    }
    cond
}

pub async fn list_all() -> anyhow::Result<Vec<Order>> {
    let rows = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .order_by_desc(Column::CreatedAt)
        .all(conn())
        .await?;
    let ids: Vec<String> = rows.iter().map(|r| r.id.clone()).collect();
    let mut grouped = lines_grouped(&ids).await?;
    Ok(rows
        .into_iter()
        .map(|r| {
            let lines = grouped.remove(&r.id).unwrap_or_default();
            assemble(r, lines)
        })
        .collect())
}

pub async fn list_paginated(
    limit: u64,
    offset: u64,
    sort_by: &str,
    sort_desc: bool,
    q: &str,
    status: Option<OrderStatus>,
) -> anyhow::Result<(Vec<Order>, u64)> {
    let cond = list_condition(q, status);

    let total = Entity::find().filter(cond.clone()).count(conn()).await?;

    let mut query = Entity::find().filter(cond);
    query = match sort_by {
        "number" => {
            if sort_desc {
                query.order_by_desc(Column::Number)
            } else {
                query.order_by_asc(Column::Number)
            }
        }
        "total_price" => {
            if sort_desc {
                query.order_by_desc(Column::TotalPrice)
            } else {
                query.order_by_asc(Column::TotalPrice)
            }
        }
        "status" => {
            if sort_desc {
                query.order_by_desc(Column::Status)
            } else {
                query.order_by_asc(Column::Status)
            }
        }
        _ => {
            if sort_desc {
                query.order_by_desc(Column::CreatedAt)
            } else {
                query.order_by_asc(Column::CreatedAt)
            }
        }
    };

    let rows = query.offset(offset).limit(limit).all(conn()).await?;
    let ids: Vec<String> = rows.iter().map(|r| r.id.clone()).collect();
    let mut grouped = lines_grouped(&ids).await?;
    let items = rows
        .into_iter()
        .map(|r| {
            let lines = grouped.remove(&r.id).unwrap_or_default();
            assemble(r, lines)
        })
        .collect();

    Ok((items, total))
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Order>> {
    let row = Entity::find_by_id(id.to_string()).one(conn()).await?;
    match row {
        Some(row) => {
            let lines = lines_of(&row.id).await?;
            Ok(Some(assemble(row, lines)))
        }
        None => Ok(None),
    }
}

pub async fn number_exists(number: &str) -> anyhow::Result<bool> {
    let count = Entity::find()
        .filter(Column::Number.eq(number))
        .count(conn())
        .await?;
    Ok(count > 0)
}

pub async fn pending_count() -> anyhow::Result<u64> {
    let count = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .filter(Column::Status.eq(OrderStatus::Pending.code()))
        .count(conn())
        .await?;
    Ok(count)
}

/// Header and lines land together or not at all
pub async fn insert(aggregate: &Order) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    let txn = conn().begin().await?;
    active_from(aggregate).insert(&txn).await?;
    insert_lines(&txn, aggregate).await?;
    txn.commit().await?;
    Ok(uuid)
}

/// Replaces the line set wholesale inside one transaction
pub async fn update(aggregate: &Order) -> anyhow::Result<()> {
    let txn = conn().begin().await?;

    let mut active = active_from(aggregate);
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.update(&txn).await?;

    line::Entity::delete_many()
        .filter(line::Column::OrderId.eq(aggregate.to_string_id()))
        .exec(&txn)
        .await?;
    insert_lines(&txn, aggregate).await?;

    txn.commit().await?;
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
