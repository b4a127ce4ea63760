use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "product_variants")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub product_id: i32,
    pub size: String,
    pub color: String,
    pub stock: i32,
    #[sea_orm(column_name = "price_50_u", column_type = "Decimal(Some((10, 2)))")]
    pub price_50_u: Decimal,
    #[sea_orm(column_name = "price_100_u", column_type = "Decimal(Some((10, 2)))")]
    pub price_100_u: Decimal,
    #[sea_orm(column_name = "price_200_u", column_type = "Decimal(Some((10, 2)))")]
    pub price_200_u: Decimal,
    pub is_available: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::products::Entity",
        from = "Column::ProductId",
        to = "super::products::Column::Id"
    )]
    Products,
    #[sea_orm(has_many = "super::cart_items::Entity")]
    CartItems,
}

impl Related<super::products::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl Related<super::cart_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CartItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
