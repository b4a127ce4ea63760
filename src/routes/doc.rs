use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        carts::{AddCartItemRequest, UpdateCartItemRequest, UpdateCartRequest},
        products::ProductList,
    },
    error::ErrorData,
    models::{
        Cart, CartDetails, CartItem, CartItemDetails, Product, ProductVariant, ProductWithVariants,
        VariantWithProduct,
    },
    response::{ApiResponse, Meta},
    routes::{carts, health, params, products},
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Storefront API", description = "Product catalog search and shopping carts"),
    paths(
        health::health_check,
        products::search_products,
        products::get_product,
        carts::create_cart,
        carts::update_cart,
        carts::get_cart,
        carts::add_item,
        carts::update_item
    ),
    components(
        schemas(
            Product,
            ProductVariant,
            ProductWithVariants,
            VariantWithProduct,
            Cart,
            CartItem,
            CartItemDetails,
            CartDetails,
            ProductList,
            AddCartItemRequest,
            UpdateCartItemRequest,
            UpdateCartRequest,
            params::ProductQuery,
            params::SortOrder,
            health::HealthData,
            ErrorData,
            Meta,
            ApiResponse<ProductList>,
            ApiResponse<ProductWithVariants>,
            ApiResponse<CartDetails>,
            ApiResponse<Cart>,
            ApiResponse<ErrorData>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Products", description = "Catalog search and lookup"),
        (name = "Carts", description = "Cart and cart item endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
