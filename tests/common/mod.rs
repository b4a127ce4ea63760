#![allow(dead_code)]

use chrono::{Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use sea_orm::ActiveValue::NotSet;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, Set};
use storefront_api::{
    db::run_migrations,
    entity::{product_variants, products},
    state::AppState,
};

/// Fresh in-memory database with every migration applied.
pub async fn setup_state() -> anyhow::Result<AppState> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    // A second pooled connection would open a second, empty in-memory database.
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let orm = Database::connect(options).await?;
    run_migrations(&orm).await?;
    Ok(AppState { orm })
}

/// Fixed timestamp `minutes` after 2025-01-01T00:00:00Z.
pub fn at(minutes: i64) -> DateTimeWithTimeZone {
    let base = Utc
        .with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
        .single()
        .expect("valid base timestamp");
    (base + Duration::minutes(minutes)).into()
}

pub async fn insert_product(
    state: &AppState,
    name: &str,
    description: Option<&str>,
    category: &str,
    created_at: DateTimeWithTimeZone,
) -> anyhow::Result<products::Model> {
    let product = products::ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        description: Set(description.map(str::to_string)),
        category: Set(category.to_string()),
        created_at: Set(created_at),
        updated_at: Set(created_at),
    }
    .insert(&state.orm)
    .await?;
    Ok(product)
}

pub async fn insert_variant(
    state: &AppState,
    product_id: i32,
    size: &str,
    color: &str,
) -> anyhow::Result<product_variants::Model> {
    insert_variant_with_stock(state, product_id, size, color, 10).await
}

pub async fn insert_variant_with_stock(
    state: &AppState,
    product_id: i32,
    size: &str,
    color: &str,
    stock: i32,
) -> anyhow::Result<product_variants::Model> {
    let variant = product_variants::ActiveModel {
        id: NotSet,
        product_id: Set(product_id),
        size: Set(size.to_string()),
        color: Set(color.to_string()),
        stock: Set(stock),
        price_50_u: Set(Decimal::new(1250, 2)),
        price_100_u: Set(Decimal::new(1100, 2)),
        price_200_u: Set(Decimal::new(950, 2)),
        is_available: Set(true),
        created_at: Set(at(0)),
        updated_at: Set(at(0)),
    }
    .insert(&state.orm)
    .await?;
    Ok(variant)
}
