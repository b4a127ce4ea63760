use std::collections::HashMap;

use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde_json::json;
use validator::Validate;

use crate::{
    audit::audited,
    db,
    dto::carts::{AddCartItemRequest, UpdateCartItemRequest, UpdateCartRequest},
    entity::{
        cart_items::{ActiveModel as CartItemActive, Column as ItemCol, Entity as CartItems},
        carts::{ActiveModel as CartActive, Entity as Carts, Model as CartModel},
        product_variants::{Column as VariantCol, Entity as ProductVariants},
        products::{Column as ProductCol, Entity as Products},
    },
    error::{AppError, AppResult},
    models::{
        Cart, CartDetails, CartItem, CartItemDetails, Product, ProductVariant, VariantWithProduct,
    },
    response::ApiResponse,
    state::AppState,
};

pub async fn create_cart(state: &AppState) -> AppResult<ApiResponse<CartDetails>> {
    audited("carts.create", json!({}), async {
        let now = db::now();
        let cart = CartActive {
            id: NotSet,
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&state.orm)
        .await?;

        Ok(ApiResponse::success(
            "Cart created",
            CartDetails::new(cart, Vec::new()),
            None,
        ))
    })
    .await
}

pub async fn update_cart(
    state: &AppState,
    cart_id: i32,
    payload: UpdateCartRequest,
) -> AppResult<ApiResponse<Cart>> {
    audited(
        "carts.update",
        json!({ "cart_id": cart_id, "cart": payload }),
        async {
            let txn = state.orm.begin().await?;

            let cart = Carts::find_by_id(cart_id)
                .lock_exclusive()
                .one(&txn)
                .await?
                .ok_or_else(|| AppError::not_found("Cart", cart_id))?;

            let mut active: CartActive = cart.into();
            active.updated_at = Set(db::now());
            let cart = active.update(&txn).await?;

            txn.commit().await?;

            Ok(ApiResponse::success("Updated", Cart::from(cart), None))
        },
    )
    .await
}

pub async fn get_cart(state: &AppState, cart_id: i32) -> AppResult<ApiResponse<CartDetails>> {
    audited("carts.find_one", json!({ "cart_id": cart_id }), async {
        let cart = load_cart_details(&state.orm, cart_id).await?;
        Ok(ApiResponse::success("Cart", cart, None))
    })
    .await
}

pub async fn add_item(
    state: &AppState,
    cart_id: i32,
    payload: AddCartItemRequest,
) -> AppResult<ApiResponse<CartItem>> {
    audited(
        "carts.add_item",
        json!({ "cart_id": cart_id, "item": payload }),
        async {
            payload.validate()?;

            let txn = state.orm.begin().await?;

            let cart = find_cart(&txn, cart_id).await?;

            ProductVariants::find_by_id(payload.product_variant_id)
                .one(&txn)
                .await?
                .ok_or_else(|| AppError::not_found("ProductVariant", payload.product_variant_id))?;

            let now = db::now();
            let item = CartItemActive {
                id: NotSet,
                cart_id: Set(cart.id),
                product_variant_id: Set(payload.product_variant_id),
                qty: Set(payload.qty),
                created_at: Set(now),
                updated_at: Set(now),
            }
            .insert(&txn)
            .await?;

            txn.commit().await?;

            Ok(ApiResponse::success("Item added", CartItem::from(item), None))
        },
    )
    .await
}

/// Patch one item and return the cart as re-read after the write, inside the
/// same transaction.
pub async fn update_item(
    state: &AppState,
    cart_id: i32,
    item_id: i32,
    payload: UpdateCartItemRequest,
) -> AppResult<ApiResponse<CartDetails>> {
    audited(
        "carts.update_item",
        json!({ "cart_id": cart_id, "item_id": item_id, "item": payload }),
        async {
            payload.validate()?;

            let txn = state.orm.begin().await?;

            find_cart(&txn, cart_id).await?;

            // Scoped to the cart: an item id from another cart is not found here.
            let item = CartItems::find()
                .filter(ItemCol::Id.eq(item_id))
                .filter(ItemCol::CartId.eq(cart_id))
                .lock_exclusive()
                .one(&txn)
                .await?
                .ok_or_else(|| AppError::not_found("CartItem", item_id))?;

            let mut active: CartItemActive = item.into();
            if let Some(qty) = payload.qty {
                active.qty = Set(qty);
            }
            active.updated_at = Set(db::now());
            active.update(&txn).await?;

            let cart = load_cart_details(&txn, cart_id).await?;

            txn.commit().await?;

            Ok(ApiResponse::success("Updated", cart, None))
        },
    )
    .await
}

async fn find_cart<C: ConnectionTrait>(db: &C, cart_id: i32) -> AppResult<CartModel> {
    Carts::find_by_id(cart_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found("Cart", cart_id))
}

async fn load_cart_details<C: ConnectionTrait>(db: &C, cart_id: i32) -> AppResult<CartDetails> {
    let cart = find_cart(db, cart_id).await?;

    let items = cart
        .find_related(CartItems)
        .order_by_asc(ItemCol::Id)
        .all(db)
        .await?;

    let variant_ids: Vec<i32> = items.iter().map(|item| item.product_variant_id).collect();
    let variants = if variant_ids.is_empty() {
        Vec::new()
    } else {
        ProductVariants::find()
            .filter(VariantCol::Id.is_in(variant_ids))
            .all(db)
            .await?
    };

    let product_ids: Vec<i32> = variants.iter().map(|variant| variant.product_id).collect();
    let products: HashMap<i32, Product> = if product_ids.is_empty() {
        HashMap::new()
    } else {
        Products::find()
            .filter(ProductCol::Id.is_in(product_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|product| (product.id, Product::from(product)))
            .collect()
    };

    let variants: HashMap<i32, VariantWithProduct> = variants
        .into_iter()
        .map(|variant| {
            let id = variant.id;
            let product = products.get(&variant.product_id).cloned();
            let variant = VariantWithProduct {
                variant: ProductVariant::from(variant),
                product,
            };
            (id, variant)
        })
        .collect();

    let cart_items = items
        .into_iter()
        .map(|item| {
            let product_variant = variants.get(&item.product_variant_id).cloned();
            CartItemDetails {
                item: CartItem::from(item),
                product_variant,
            }
        })
        .collect();

    Ok(CartDetails::new(cart, cart_items))
}
