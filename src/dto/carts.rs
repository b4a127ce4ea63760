use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

/// Cart fields a client may change.
///
/// Carts carry no client-writable scalar yet; unknown keys such as `id`,
/// `cartItems` or timestamps are ignored, so a patch only refreshes
/// `updatedAt`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateCartRequest {}

impl Validate for UpdateCartRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Ok(())
    }
}

#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
pub struct AddCartItemRequest {
    pub product_variant_id: i32,
    #[serde(default = "default_qty")]
    #[validate(range(min = 1, message = "qty must be at least 1"))]
    pub qty: i32,
}

/// Partial patch of a cart item; absent fields are left untouched.
#[derive(Debug, Default, Deserialize, Serialize, Validate, ToSchema)]
pub struct UpdateCartItemRequest {
    #[validate(range(min = 1, message = "qty must be at least 1"))]
    pub qty: Option<i32>,
}

fn default_qty() -> i32 {
    1
}
