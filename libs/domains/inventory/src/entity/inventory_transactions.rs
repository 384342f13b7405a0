use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

use crate::models::TransactionType;

/// Sea-ORM Entity for the append-only stock ledger
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "inventory_transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub product_id: i32,
    pub transaction_type: TransactionType,
    pub quantity: i32,
    pub transaction_date: DateTimeWithTimeZone,
    pub notes: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::products::Entity",
        from = "Column::ProductId",
        to = "super::products::Column::Id",
        on_delete = "Cascade"
    )]
    Product,
}

impl Related<super::products::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::InventoryTransaction {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            product_id: model.product_id,
            transaction_type: model.transaction_type,
            quantity: model.quantity,
            transaction_date: model.transaction_date.into(),
            notes: model.notes,
        }
    }
}

impl ActiveModel {
    /// New ledger row dated now
    pub fn new_entry(
        product_id: i32,
        transaction_type: TransactionType,
        quantity: i32,
        notes: String,
    ) -> Self {
        Self {
            id: NotSet,
            product_id: Set(product_id),
            transaction_type: Set(transaction_type),
            quantity: Set(quantity),
            transaction_date: Set(chrono::Utc::now().into()),
            notes: Set(notes),
        }
    }
}
