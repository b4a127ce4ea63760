pub mod cart_items;
pub mod carts;
pub mod product_variants;
pub mod products;

pub use cart_items::Entity as CartItems;
pub use carts::Entity as Carts;
pub use product_variants::Entity as ProductVariants;
pub use products::Entity as Products;
