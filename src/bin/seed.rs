use argon2::{
    Argon2, PasswordHasher,
    password_hash::{rand_core::OsRng, SaltString},
};
use apparel_shop_api::{config::AppConfig, db::create_pool};
use rust_decimal::Decimal;
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    // Ensure migrations are applied.
    sqlx::migrate!("./migrations").run(&pool).await?;

    let admin_id = ensure_user_with_role(&pool, "admin@example.com", "admin123", "admin").await?;
    let user_id = ensure_user_with_role(&pool, "user@example.com", "user123", "customer").await?;

    let shoes = ensure_category(&pool, "Shoes", "numeric").await?;
    let shirts = ensure_category(&pool, "T-Shirts", "alpha").await?;
    let brand = ensure_brand(&pool, "Northfield").await?;

    let size_42 = ensure_numeric_size(&pool, 42).await?;
    let size_m = ensure_alpha_size(&pool, "M").await?;
    let black = ensure_color(&pool, "Black", "#000000").await?;
    let white = ensure_color(&pool, "White", "#FFFFFF").await?;

    let runner = ensure_product(&pool, "Trail Runner", brand, shoes).await?;
    let tee = ensure_product(&pool, "Logo Tee", brand, shirts).await?;

    ensure_product_size(&pool, runner, size_42, Decimal::new(12999, 2), 25).await?;
    ensure_product_size(&pool, tee, size_m, Decimal::new(2499, 2), 100).await?;
    ensure_product_color(&pool, runner, black, Decimal::ZERO).await?;
    ensure_product_color(&pool, runner, white, Decimal::new(500, 2)).await?;
    ensure_product_color(&pool, tee, black, Decimal::ZERO).await?;

    println!("Seed completed. Admin ID: {admin_id}, User ID: {user_id}");
    Ok(())
}

async fn ensure_user_with_role(
    pool: &sqlx::PgPool,
    email: &str,
    password: &str,
    role: &str,
) -> anyhow::Result<Uuid> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string();

    let row: Option<(Uuid,)> = sqlx::query_as(
        r#"
        INSERT INTO users (id, email, password_hash, role)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (email) DO UPDATE SET role = EXCLUDED.role
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(password_hash)
    .bind(role)
    .fetch_optional(pool)
    .await?;

    let user_id = match row {
        Some((id,)) => id,
        None => {
            let existing: (Uuid,) = sqlx::query_as("SELECT id FROM users WHERE email = $1")
                .bind(email)
                .fetch_one(pool)
                .await?;
            existing.0
        }
    };

    println!("Ensured user {email} (role={role})");
    Ok(user_id)
}

async fn ensure_category(pool: &sqlx::PgPool, name: &str, size_type: &str) -> anyhow::Result<Uuid> {
    let row: (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO categories (id, name, size_type)
        VALUES ($1, $2, $3)
        ON CONFLICT (name) DO UPDATE SET size_type = EXCLUDED.size_type
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(size_type)
    .fetch_one(pool)
    .await?;
    Ok(row.0)
}

async fn ensure_brand(pool: &sqlx::PgPool, name: &str) -> anyhow::Result<Uuid> {
    let row: (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO brands (id, name)
        VALUES ($1, $2)
        ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .fetch_one(pool)
    .await?;
    Ok(row.0)
}

async fn ensure_numeric_size(pool: &sqlx::PgPool, value: i32) -> anyhow::Result<Uuid> {
    if let Some((id,)) = sqlx::query_as::<_, (Uuid,)>(
        "SELECT id FROM sizes WHERE size_type = 'numeric' AND numeric_size = $1",
    )
    .bind(value)
    .fetch_optional(pool)
    .await?
    {
        return Ok(id);
    }
    let row: (Uuid,) = sqlx::query_as(
        "INSERT INTO sizes (id, size_type, numeric_size) VALUES ($1, 'numeric', $2) RETURNING id",
    )
    .bind(Uuid::new_v4())
    .bind(value)
    .fetch_one(pool)
    .await?;
    Ok(row.0)
}

async fn ensure_alpha_size(pool: &sqlx::PgPool, value: &str) -> anyhow::Result<Uuid> {
    if let Some((id,)) = sqlx::query_as::<_, (Uuid,)>(
        "SELECT id FROM sizes WHERE size_type = 'alpha' AND alpha_size = $1",
    )
    .bind(value)
    .fetch_optional(pool)
    .await?
    {
        return Ok(id);
    }
    let row: (Uuid,) = sqlx::query_as(
        "INSERT INTO sizes (id, size_type, alpha_size) VALUES ($1, 'alpha', $2) RETURNING id",
    )
    .bind(Uuid::new_v4())
    .bind(value)
    .fetch_one(pool)
    .await?;
    Ok(row.0)
}

async fn ensure_color(pool: &sqlx::PgPool, name: &str, hex: &str) -> anyhow::Result<Uuid> {
    let row: (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO colors (id, name, hex_code)
        VALUES ($1, $2, $3)
        ON CONFLICT (name) DO UPDATE SET hex_code = EXCLUDED.hex_code
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(hex)
    .fetch_one(pool)
    .await?;
    Ok(row.0)
}

async fn ensure_product(
    pool: &sqlx::PgPool,
    name: &str,
    brand_id: Uuid,
    category_id: Uuid,
) -> anyhow::Result<Uuid> {
    if let Some((id,)) = sqlx::query_as::<_, (Uuid,)>("SELECT id FROM products WHERE name = $1")
        .bind(name)
        .fetch_optional(pool)
        .await?
    {
        return Ok(id);
    }
    let row: (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO products (id, name, brand_id, category_id)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(brand_id)
    .bind(category_id)
    .fetch_one(pool)
    .await?;
    Ok(row.0)
}

async fn ensure_product_size(
    pool: &sqlx::PgPool,
    product_id: Uuid,
    size_id: Uuid,
    price: Decimal,
    quantity: i32,
) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO product_sizes (id, product_id, size_id, price, quantity)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (product_id, size_id) DO UPDATE SET price = EXCLUDED.price
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(product_id)
    .bind(size_id)
    .bind(price)
    .bind(quantity)
    .execute(pool)
    .await?;
    Ok(())
}

async fn ensure_product_color(
    pool: &sqlx::PgPool,
    product_id: Uuid,
    color_id: Uuid,
    price_modifier: Decimal,
) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO product_colors (id, product_id, color_id, price_modifier, is_available)
        VALUES ($1, $2, $3, $4, TRUE)
        ON CONFLICT (product_id, color_id) DO UPDATE SET price_modifier = EXCLUDED.price_modifier
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(product_id)
    .bind(color_id)
    .bind(price_modifier)
    .execute(pool)
    .await?;
    Ok(())
}
