use rust_decimal::Decimal;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use storefront_api::{
    config::AppConfig,
    db::{create_orm_conn, now, run_migrations},
    entity::{
        product_variants::ActiveModel as VariantActive,
        products::{ActiveModel as ProductActive, Column as ProductCol, Entity as Products},
    },
};

struct SeedVariant {
    size: &'static str,
    color: &'static str,
    stock: i32,
    // Unit prices in cents for the 50 / 100 / 200 unit breakpoints.
    prices: [i64; 3],
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config).await?;
    // Ensure migrations are applied.
    run_migrations(&orm).await?;

    let catalog = vec![
        (
            "Classic Tee",
            "Heavyweight cotton t-shirt",
            "shirts",
            vec![
                SeedVariant { size: "S", color: "white", stock: 120, prices: [1250, 1100, 950] },
                SeedVariant { size: "M", color: "white", stock: 200, prices: [1250, 1100, 950] },
                SeedVariant { size: "L", color: "black", stock: 80, prices: [1300, 1150, 990] },
            ],
        ),
        (
            "Trail Hoodie",
            "Fleece-lined hoodie with zip pocket",
            "hoodies",
            vec![
                SeedVariant { size: "M", color: "grey", stock: 60, prices: [3400, 3100, 2850] },
                SeedVariant { size: "XL", color: "navy", stock: 0, prices: [3600, 3300, 2990] },
            ],
        ),
        (
            "Court Sneaker",
            "Low-top canvas sneaker",
            "shoes",
            vec![
                SeedVariant { size: "42", color: "white", stock: 40, prices: [4800, 4500, 4200] },
                SeedVariant { size: "44", color: "red", stock: 25, prices: [4800, 4500, 4200] },
            ],
        ),
    ];

    for (name, description, category, variants) in catalog {
        seed_product(&orm, name, description, category, variants).await?;
    }

    println!("Seed completed");
    Ok(())
}

async fn seed_product(
    orm: &DatabaseConnection,
    name: &str,
    description: &str,
    category: &str,
    variants: Vec<SeedVariant>,
) -> anyhow::Result<()> {
    let existing = Products::find()
        .filter(ProductCol::Name.eq(name))
        .one(orm)
        .await?;
    if existing.is_some() {
        println!("Product {name} already present");
        return Ok(());
    }

    let timestamp = now();
    let product = ProductActive {
        id: NotSet,
        name: Set(name.to_string()),
        description: Set(Some(description.to_string())),
        category: Set(category.to_string()),
        created_at: Set(timestamp),
        updated_at: Set(timestamp),
    }
    .insert(orm)
    .await?;

    for variant in variants {
        let [p50, p100, p200] = variant.prices;
        VariantActive {
            id: NotSet,
            product_id: Set(product.id),
            size: Set(variant.size.to_string()),
            color: Set(variant.color.to_string()),
            stock: Set(variant.stock),
            price_50_u: Set(Decimal::new(p50, 2)),
            price_100_u: Set(Decimal::new(p100, 2)),
            price_200_u: Set(Decimal::new(p200, 2)),
            is_available: Set(variant.stock > 0),
            created_at: Set(timestamp),
            updated_at: Set(timestamp),
        }
        .insert(orm)
        .await?;
    }

    println!("Seeded product {name}");
    Ok(())
}
