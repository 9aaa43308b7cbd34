use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};

use crate::shared::config;

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

/// Connect to SQLite and bootstrap the schema.
///
/// Every uniqueness rule of the domain (brand name/slug, product
/// name/slug/sku, category slug, customer email, order number, category ×
/// product pair) is backed by a unique index here, so check-then-write races
/// between concurrent admins resolve at the constraint instead of producing
/// duplicate rows.
pub async fn initialize_database() -> anyhow::Result<()> {
    let cfg = config::load_config()?;
    let db_path = config::get_database_path(&cfg)?;
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Normalize path separators and ensure proper URL form on Windows
    let normalized = db_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);

    let conn = Database::connect(&db_url).await?;
    bootstrap_schema(&conn).await?;

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}

async fn execute(conn: &DatabaseConnection, sql: &str) -> anyhow::Result<()> {
    conn.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        sql.to_string(),
    ))
    .await?;
    Ok(())
}

async fn bootstrap_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    tracing::info!("Bootstrapping database schema");

    execute(
        conn,
        r#"
        CREATE TABLE IF NOT EXISTS a001_brand (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            slug TEXT NOT NULL,
            description TEXT,
            is_visible INTEGER NOT NULL DEFAULT 1,
            primary_hex TEXT,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
    "#,
    )
    .await?;
    execute(
        conn,
        "CREATE UNIQUE INDEX IF NOT EXISTS ux_a001_brand_name ON a001_brand(name);",
    )
    .await?;
    execute(
        conn,
        "CREATE UNIQUE INDEX IF NOT EXISTS ux_a001_brand_slug ON a001_brand(slug);",
    )
    .await?;

    execute(
        conn,
        r#"
        CREATE TABLE IF NOT EXISTS a002_category (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            slug TEXT NOT NULL,
            description TEXT,
            is_visible INTEGER NOT NULL DEFAULT 1,
            parent_id TEXT,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
    "#,
    )
    .await?;
    execute(
        conn,
        "CREATE UNIQUE INDEX IF NOT EXISTS ux_a002_category_slug ON a002_category(slug);",
    )
    .await?;

    // Category <-> product pivot; the primary key doubles as the pair index
    execute(
        conn,
        r#"
        CREATE TABLE IF NOT EXISTS a002_category_product (
            category_id TEXT NOT NULL,
            product_id TEXT NOT NULL,
            created_at TEXT,
            PRIMARY KEY (category_id, product_id)
        );
    "#,
    )
    .await?;

    execute(
        conn,
        r#"
        CREATE TABLE IF NOT EXISTS a003_customer (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            phone TEXT,
            address TEXT,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
    "#,
    )
    .await?;
    execute(
        conn,
        "CREATE UNIQUE INDEX IF NOT EXISTS ux_a003_customer_email ON a003_customer(email);",
    )
    .await?;

    execute(
        conn,
        r#"
        CREATE TABLE IF NOT EXISTS a004_product (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            slug TEXT NOT NULL,
            description TEXT,
            sku TEXT NOT NULL,
            price REAL NOT NULL DEFAULT 0,
            quantity INTEGER NOT NULL DEFAULT 0,
            product_type TEXT NOT NULL,
            is_visible INTEGER NOT NULL DEFAULT 1,
            is_featured INTEGER NOT NULL DEFAULT 0,
            published_at TEXT,
            image_path TEXT,
            brand_id TEXT,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
    "#,
    )
    .await?;
    execute(
        conn,
        "CREATE UNIQUE INDEX IF NOT EXISTS ux_a004_product_name ON a004_product(name);",
    )
    .await?;
    execute(
        conn,
        "CREATE UNIQUE INDEX IF NOT EXISTS ux_a004_product_slug ON a004_product(slug);",
    )
    .await?;
    execute(
        conn,
        "CREATE UNIQUE INDEX IF NOT EXISTS ux_a004_product_sku ON a004_product(sku);",
    )
    .await?;

    execute(
        conn,
        r#"
        CREATE TABLE IF NOT EXISTS a005_order (
            id TEXT PRIMARY KEY NOT NULL,
            number TEXT NOT NULL,
            customer_id TEXT NOT NULL,
            status TEXT NOT NULL,
            notes TEXT,
            total_price REAL NOT NULL DEFAULT 0,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
    "#,
    )
    .await?;
    execute(
        conn,
        "CREATE UNIQUE INDEX IF NOT EXISTS ux_a005_order_number ON a005_order(number);",
    )
    .await?;

    execute(
        conn,
        r#"
        CREATE TABLE IF NOT EXISTS a005_order_line (
            id TEXT PRIMARY KEY NOT NULL,
            order_id TEXT NOT NULL,
            product_id TEXT NOT NULL,
            quantity INTEGER NOT NULL,
            unit_price REAL NOT NULL,
            created_at TEXT
        );
    "#,
    )
    .await?;
    execute(
        conn,
        "CREATE INDEX IF NOT EXISTS ix_a005_order_line_order ON a005_order_line(order_id);",
    )
    .await?;

    Ok(())
}
