mod common;

use common::{at, insert_product, insert_variant, setup_state};
use storefront_api::{
    dto::carts::{AddCartItemRequest, UpdateCartItemRequest, UpdateCartRequest},
    error::AppError,
    models::CartDetails,
    services::cart_service,
    state::AppState,
};

const MISSING: i32 = 999_999;

async fn new_cart(state: &AppState) -> anyhow::Result<CartDetails> {
    let response = cart_service::create_cart(state).await?;
    Ok(response.data.expect("created cart"))
}

async fn fetch(state: &AppState, cart_id: i32) -> anyhow::Result<CartDetails> {
    let response = cart_service::get_cart(state, cart_id).await?;
    Ok(response.data.expect("cart details"))
}

async fn add(state: &AppState, cart_id: i32, variant_id: i32, qty: i32) -> anyhow::Result<i32> {
    let response = cart_service::add_item(
        state,
        cart_id,
        AddCartItemRequest {
            product_variant_id: variant_id,
            qty,
        },
    )
    .await?;
    Ok(response.data.expect("cart item").id)
}

fn assert_not_found(err: AppError, expected_entity: &str, expected_id: i32) {
    match err {
        AppError::NotFound { entity, id } => {
            assert_eq!(entity, expected_entity);
            assert_eq!(id, expected_id);
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn new_cart_is_empty() -> anyhow::Result<()> {
    let state = setup_state().await?;

    let created = new_cart(&state).await?;
    assert!(created.cart_items.is_empty());

    let fetched = fetch(&state, created.id).await?;
    assert_eq!(fetched.id, created.id);
    assert!(fetched.cart_items.is_empty());
    Ok(())
}

#[tokio::test]
async fn added_item_is_returned_with_variant_and_product() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let product = insert_product(&state, "tee", Some("cotton"), "shirts", at(0)).await?;
    let variant = insert_variant(&state, product.id, "M", "white").await?;
    let cart = new_cart(&state).await?;

    add(&state, cart.id, variant.id, 3).await?;

    let fetched = fetch(&state, cart.id).await?;
    assert_eq!(fetched.cart_items.len(), 1);
    let line = &fetched.cart_items[0];
    assert_eq!(line.item.product_variant_id, variant.id);
    assert_eq!(line.item.qty, 3);

    let embedded = line.product_variant.as_ref().expect("variant loaded");
    assert_eq!(embedded.variant.id, variant.id);
    assert_eq!(embedded.product.as_ref().expect("product loaded").name, "tee");
    Ok(())
}

#[tokio::test]
async fn update_item_changes_only_that_item() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let product = insert_product(&state, "tee", None, "shirts", at(0)).await?;
    let small = insert_variant(&state, product.id, "S", "white").await?;
    let large = insert_variant(&state, product.id, "L", "white").await?;
    let cart = new_cart(&state).await?;

    let first = add(&state, cart.id, small.id, 3).await?;
    let second = add(&state, cart.id, large.id, 1).await?;

    let response = cart_service::update_item(
        &state,
        cart.id,
        first,
        UpdateCartItemRequest { qty: Some(5) },
    )
    .await?;
    let returned = response.data.expect("cart after update");
    assert_eq!(returned.cart_items.len(), 2);

    let fetched = fetch(&state, cart.id).await?;
    // The returned snapshot matches what a fresh read sees.
    assert_eq!(returned, fetched);

    let qty_of = |id: i32| {
        fetched
            .cart_items
            .iter()
            .find(|line| line.item.id == id)
            .map(|line| line.item.qty)
    };
    assert_eq!(qty_of(first), Some(5));
    assert_eq!(qty_of(second), Some(1));
    Ok(())
}

#[tokio::test]
async fn empty_item_patch_keeps_quantity() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let product = insert_product(&state, "tee", None, "shirts", at(0)).await?;
    let variant = insert_variant(&state, product.id, "M", "white").await?;
    let cart = new_cart(&state).await?;
    let item = add(&state, cart.id, variant.id, 4).await?;

    let response =
        cart_service::update_item(&state, cart.id, item, UpdateCartItemRequest::default()).await?;
    let returned = response.data.expect("cart");
    assert_eq!(returned.cart_items[0].item.qty, 4);
    Ok(())
}

#[tokio::test]
async fn missing_cart_is_not_found_everywhere() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let product = insert_product(&state, "tee", None, "shirts", at(0)).await?;
    let variant = insert_variant(&state, product.id, "M", "white").await?;

    let err = cart_service::get_cart(&state, MISSING).await.expect_err("get");
    assert_not_found(err, "Cart", MISSING);

    let err = cart_service::update_cart(&state, MISSING, UpdateCartRequest::default())
        .await
        .expect_err("update");
    assert_not_found(err, "Cart", MISSING);

    let err = cart_service::add_item(
        &state,
        MISSING,
        AddCartItemRequest {
            product_variant_id: variant.id,
            qty: 1,
        },
    )
    .await
    .expect_err("add item");
    assert_not_found(err, "Cart", MISSING);

    let err = cart_service::update_item(&state, MISSING, 1, UpdateCartItemRequest { qty: Some(2) })
        .await
        .expect_err("update item");
    assert_not_found(err, "Cart", MISSING);
    Ok(())
}

#[tokio::test]
async fn item_from_another_cart_is_not_found() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let product = insert_product(&state, "tee", None, "shirts", at(0)).await?;
    let variant = insert_variant(&state, product.id, "M", "white").await?;
    let owner = new_cart(&state).await?;
    let other = new_cart(&state).await?;
    let item = add(&state, owner.id, variant.id, 2).await?;

    let err = cart_service::update_item(&state, other.id, item, UpdateCartItemRequest { qty: Some(9) })
        .await
        .expect_err("cross-cart update must fail");
    assert_not_found(err, "CartItem", item);

    // The owning cart is untouched.
    let fetched = fetch(&state, owner.id).await?;
    assert_eq!(fetched.cart_items[0].item.qty, 2);
    Ok(())
}

#[tokio::test]
async fn missing_item_in_existing_cart_is_not_found() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let cart = new_cart(&state).await?;

    let err = cart_service::update_item(&state, cart.id, MISSING, UpdateCartItemRequest { qty: Some(1) })
        .await
        .expect_err("no such item");
    assert_not_found(err, "CartItem", MISSING);
    Ok(())
}

#[tokio::test]
async fn quantity_must_be_positive() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let product = insert_product(&state, "tee", None, "shirts", at(0)).await?;
    let variant = insert_variant(&state, product.id, "M", "white").await?;
    let cart = new_cart(&state).await?;

    let err = cart_service::add_item(
        &state,
        cart.id,
        AddCartItemRequest {
            product_variant_id: variant.id,
            qty: 0,
        },
    )
    .await
    .expect_err("qty 0 rejected");
    assert!(matches!(err, AppError::Validation(_)));

    let item = add(&state, cart.id, variant.id, 1).await?;
    let err = cart_service::update_item(&state, cart.id, item, UpdateCartItemRequest { qty: Some(-2) })
        .await
        .expect_err("negative qty rejected");
    assert!(matches!(err, AppError::Validation(_)));

    assert!(fetch(&state, cart.id).await?.cart_items.iter().all(|l| l.item.qty == 1));
    Ok(())
}

#[tokio::test]
async fn unknown_variant_is_not_found() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let cart = new_cart(&state).await?;

    let err = cart_service::add_item(
        &state,
        cart.id,
        AddCartItemRequest {
            product_variant_id: MISSING,
            qty: 1,
        },
    )
    .await
    .expect_err("variant does not exist");
    assert_not_found(err, "ProductVariant", MISSING);
    assert!(fetch(&state, cart.id).await?.cart_items.is_empty());
    Ok(())
}

#[tokio::test]
async fn update_cart_refreshes_timestamp_only() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let created = new_cart(&state).await?;

    let response = cart_service::update_cart(&state, created.id, UpdateCartRequest::default()).await?;
    let updated = response.data.expect("updated cart");
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);
    Ok(())
}
