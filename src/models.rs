use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::{cart_items, carts, product_variants, products};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    pub id: i32,
    pub product_id: i32,
    pub size: String,
    pub color: String,
    pub stock: i32,
    #[serde(rename = "price50U")]
    pub price_50_u: Decimal,
    #[serde(rename = "price100U")]
    pub price_100_u: Decimal,
    #[serde(rename = "price200U")]
    pub price_200_u: Decimal,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A product together with its variants.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductWithVariants {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub variants: Vec<ProductVariant>,
}

/// A variant with the product it belongs to, as embedded in cart items.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VariantWithProduct {
    #[serde(flatten)]
    pub variant: ProductVariant,
    pub product: Option<Product>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: i32,
    pub cart_id: i32,
    pub product_variant_id: i32,
    pub qty: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartItemDetails {
    #[serde(flatten)]
    pub item: CartItem,
    pub product_variant: Option<VariantWithProduct>,
}

/// A cart with every item, each item's variant and that variant's product.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartDetails {
    pub id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub cart_items: Vec<CartItemDetails>,
}

impl From<products::Model> for Product {
    fn from(model: products::Model) -> Self {
        Product {
            id: model.id,
            name: model.name,
            description: model.description,
            category: model.category,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

impl From<product_variants::Model> for ProductVariant {
    fn from(model: product_variants::Model) -> Self {
        ProductVariant {
            id: model.id,
            product_id: model.product_id,
            size: model.size,
            color: model.color,
            stock: model.stock,
            price_50_u: model.price_50_u,
            price_100_u: model.price_100_u,
            price_200_u: model.price_200_u,
            is_available: model.is_available,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

impl ProductWithVariants {
    pub fn new(product: products::Model, variants: Vec<product_variants::Model>) -> Self {
        let product = Product::from(product);
        ProductWithVariants {
            id: product.id,
            name: product.name,
            description: product.description,
            category: product.category,
            created_at: product.created_at,
            updated_at: product.updated_at,
            variants: variants.into_iter().map(ProductVariant::from).collect(),
        }
    }
}

impl From<carts::Model> for Cart {
    fn from(model: carts::Model) -> Self {
        Cart {
            id: model.id,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

impl From<cart_items::Model> for CartItem {
    fn from(model: cart_items::Model) -> Self {
        CartItem {
            id: model.id,
            cart_id: model.cart_id,
            product_variant_id: model.product_variant_id,
            qty: model.qty,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

impl CartDetails {
    pub fn new(cart: carts::Model, cart_items: Vec<CartItemDetails>) -> Self {
        let cart = Cart::from(cart);
        CartDetails {
            id: cart.id,
            created_at: cart.created_at,
            updated_at: cart.updated_at,
            cart_items,
        }
    }
}
