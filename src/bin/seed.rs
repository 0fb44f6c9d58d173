use pos_backend::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    services::user_service::hash_password,
};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm).await?;
    let pool = orm.get_postgres_connection_pool();

    let admin_id = ensure_user(pool, "admin@example.com", "Admin", "admin123", "ADMIN").await?;
    let cashier_id = ensure_user(pool, "cashier@example.com", "Cashier", "cashier123", "USER").await?;
    seed_products(pool).await?;

    println!("Seed completed. Admin ID: {admin_id}, Cashier ID: {cashier_id}");
    Ok(())
}

async fn ensure_user(
    pool: &PgPool,
    email: &str,
    name: &str,
    password: &str,
    role: &str,
) -> anyhow::Result<Uuid> {
    let password_hash = hash_password(password).map_err(|e| anyhow::anyhow!(e.to_string()))?;

    let (user_id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO users (id, email, name, password_hash, role)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (email) DO UPDATE SET role = EXCLUDED.role
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(name)
    .bind(password_hash)
    .bind(role)
    .fetch_one(pool)
    .await?;

    println!("Ensured user {email} (role={role})");
    Ok(user_id)
}

async fn seed_products(pool: &PgPool) -> anyhow::Result<()> {
    let products = [
        ("Espresso", "Single shot", Decimal::new(450, 2)),
        ("Cappuccino", "Espresso with steamed milk foam", Decimal::new(750, 2)),
        ("Croissant", "Butter croissant baked daily", Decimal::new(600, 2)),
        ("Mineral Water", "500ml bottle", Decimal::new(300, 2)),
    ];

    for (name, description, price) in products {
        sqlx::query(
            r#"
            INSERT INTO products (id, name, description, price)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(description)
        .bind(price)
        .execute(pool)
        .await?;
    }

    println!("Seeded products");
    Ok(())
}
