use std::collections::HashMap;

use sea_orm::sea_query::{Expr, Func, IntoColumnRef, SimpleExpr};
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, JoinType, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select,
};
use serde_json::json;
use validator::Validate;

use crate::{
    audit::audited,
    dto::products::ProductList,
    entity::{
        product_variants::{self, Column as VariantCol, Entity as ProductVariants},
        products::{self, Column as ProductCol, Entity as Products},
    },
    error::{AppError, AppResult},
    models::ProductWithVariants,
    response::{ApiResponse, Meta},
    routes::params::{PageOptions, ProductFilters, ProductQuery, SortOrder},
    state::AppState,
};

pub async fn search_products(
    state: &AppState,
    query: ProductQuery,
) -> AppResult<ApiResponse<ProductList>> {
    audited("products.search", json!(query), async {
        query.validate()?;
        search(&state.orm, query.page_options(), &query.filters()).await
    })
    .await
}

pub async fn get_product(
    state: &AppState,
    id: i32,
) -> AppResult<ApiResponse<ProductWithVariants>> {
    audited("products.find_one", json!({ "id": id }), async {
        let product = Products::find_by_id(id)
            .one(&state.orm)
            .await?
            .ok_or_else(|| AppError::not_found("Product", id))?;

        let variants = product
            .find_related(ProductVariants)
            .order_by_asc(VariantCol::Id)
            .all(&state.orm)
            .await?;

        Ok(ApiResponse::success(
            "Product",
            ProductWithVariants::new(product, variants),
            None,
        ))
    })
    .await
}

async fn search<C: ConnectionTrait>(
    db: &C,
    options: PageOptions,
    filters: &ProductFilters,
) -> AppResult<ApiResponse<ProductList>> {
    let finder = filtered_products(filters);

    let item_count = i64::try_from(finder.clone().count(db).await?).unwrap_or(i64::MAX);
    let take = u64::try_from(options.take)
        .map_err(|_| AppError::BadRequest(format!("invalid take {}", options.take)))?;

    let products = order_by_created(finder, options.order)
        .limit(take)
        .offset(options.skip())
        .all(db)
        .await?;

    let items = attach_variants(db, products, filters).await?;

    let meta = Meta::new(options.page, options.take, item_count);
    Ok(ApiResponse::success("Products", ProductList { items }, Some(meta)))
}

/// Products matching every filter. Size and color join the variants table,
/// so rows are made distinct to keep one row per product.
fn filtered_products(filters: &ProductFilters) -> Select<Products> {
    let mut condition = Condition::all();

    if let Some(keyword) = &filters.keyword {
        condition = condition.add(
            Condition::any()
                .add(ProductCol::Name.contains(keyword))
                .add(ProductCol::Description.contains(keyword))
                .add(ProductCol::Category.contains(keyword)),
        );
    }

    if let Some(category) = &filters.category {
        condition = condition.add(lower_eq((Products, ProductCol::Category), category));
    }

    let mut finder = Products::find();
    if filters.needs_variant_join() {
        finder = finder
            .join(
                JoinType::InnerJoin,
                products::Relation::ProductVariants.def(),
            )
            .distinct();
        condition = condition.add(variant_condition(filters));
    }

    finder.filter(condition)
}

fn variant_condition(filters: &ProductFilters) -> Condition {
    let mut condition = Condition::all();
    if let Some(size) = &filters.size {
        condition = condition.add(lower_eq((ProductVariants, VariantCol::Size), size));
    }
    if let Some(color) = &filters.color {
        condition = condition.add(lower_eq((ProductVariants, VariantCol::Color), color));
    }
    condition
}

fn lower_eq<C: IntoColumnRef>(column: C, value: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(column))).eq(value.to_lowercase())
}

// Ties on created_at fall back to id so pages never overlap.
fn order_by_created(finder: Select<Products>, order: SortOrder) -> Select<Products> {
    match order {
        SortOrder::Asc => finder
            .order_by_asc(ProductCol::CreatedAt)
            .order_by_asc(ProductCol::Id),
        SortOrder::Desc => finder
            .order_by_desc(ProductCol::CreatedAt)
            .order_by_desc(ProductCol::Id),
    }
}

async fn attach_variants<C: ConnectionTrait>(
    db: &C,
    products: Vec<products::Model>,
    filters: &ProductFilters,
) -> AppResult<Vec<ProductWithVariants>> {
    if products.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<i32> = products.iter().map(|p| p.id).collect();
    let mut finder = ProductVariants::find().filter(VariantCol::ProductId.is_in(ids));
    if filters.needs_variant_join() {
        finder = finder.filter(variant_condition(filters));
    }
    let variants = finder.order_by_asc(VariantCol::Id).all(db).await?;

    let mut by_product: HashMap<i32, Vec<product_variants::Model>> = HashMap::new();
    for variant in variants {
        by_product.entry(variant.product_id).or_default().push(variant);
    }

    Ok(products
        .into_iter()
        .map(|product| {
            let variants = by_product.remove(&product.id).unwrap_or_default();
            ProductWithVariants::new(product, variants)
        })
        .collect())
}
