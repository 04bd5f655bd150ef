//! Wipes the catalog and fills it with generated demo produce.

use anyhow::Context;
use farmlok::configuration::get_configuration;
use farmlok::telemetry::{get_subscriber, init_subscriber};
use rand::seq::SliceRandom;
use rand::Rng;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

const CATEGORIES: [&str; 6] = [
    "Vegetables",
    "Fruits",
    "Grains",
    "Dairy",
    "Pulses",
    "Organic",
];

const LOCATIONS: [&str; 6] = [
    "Delhi",
    "Noida",
    "Greater Noida",
    "Ghaziabad",
    "Meerut",
    "Gurgaon",
];

const PRODUCT_NAMES: [&str; 20] = [
    "Tomato", "Potato", "Onion", "Carrot", "Spinach", "Cabbage", "Apple", "Banana", "Mango",
    "Orange", "Milk", "Cheese", "Butter", "Wheat", "Rice", "Corn", "Chickpeas", "Lentils",
    "Beans", "Peas",
];

const DESCRIPTIONS: [&str; 5] = [
    "Fresh farm product",
    "Organic and healthy",
    "Direct from farmers",
    "High quality produce",
    "Naturally grown",
];

const PRODUCT_COUNT: usize = 2000;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("farmlok-seed".into(), "info".into());
    init_subscriber(subscriber);

    let settings = get_configuration().context("failed to read configuration")?;

    let pg_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&settings.database.connection_string())
        .await
        .context("failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&pg_pool)
        .await
        .context("failed to run migrations")?;

    sqlx::query("DELETE FROM products").execute(&pg_pool).await?;
    sqlx::query("DELETE FROM users").execute(&pg_pool).await?;

    let user_id: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO users (name, email, google_id, created_at, updated_at)
        VALUES ($1, $2, $3, NOW(), NOW())
        RETURNING id
        "#,
    )
    .bind("Demo Farmer")
    .bind("demo.farmer@farmlok.dev")
    .bind("seed-demo-farmer")
    .fetch_one(&pg_pool)
    .await
    .context("failed to insert demo user")?;

    let mut rng = rand::thread_rng();
    for i in 1..=PRODUCT_COUNT {
        let name = format!("{} {}", PRODUCT_NAMES.choose(&mut rng).unwrap(), i);
        let description = *DESCRIPTIONS.choose(&mut rng).unwrap();
        let price = rng.gen_range(20..520) as f64;
        let category = *CATEGORIES.choose(&mut rng).unwrap();
        let stock: i32 = rng.gen_range(1..=100);
        let location = *LOCATIONS.choose(&mut rng).unwrap();
        let rating = (rng.gen_range(0.0..=5.0_f64) * 10.0).round() / 10.0;

        sqlx::query(
            r#"
            INSERT INTO products (name, description, price, category, stock, location, rating,
                                  created_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW(), NOW())
            "#,
        )
        .bind(&name)
        .bind(description)
        .bind(price)
        .bind(category)
        .bind(stock)
        .bind(location)
        .bind(rating)
        .bind(user_id)
        .execute(&pg_pool)
        .await
        .with_context(|| format!("failed to insert product {}", name))?;
    }

    tracing::info!("Seeded {} products for user {}", PRODUCT_COUNT, user_id);
    Ok(())
}
