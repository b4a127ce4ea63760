use serde::Serialize;
use utoipa::ToSchema;

use crate::models::ProductWithVariants;

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<ProductWithVariants>)]
    pub items: Vec<ProductWithVariants>,
}
