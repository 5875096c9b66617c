use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "booking")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub trip_id: i32,
    pub seats: i32,
    pub total_amount: i64,
    /// Portion of `total_amount` paid from the wallet.
    pub wallet_amount: i64,
    /// Portion of `total_amount` left for the external payment gateway.
    pub gateway_amount: i64,
    /// One of `pending_payment`, `confirmed`, `cancelled`, `expired`.
    pub status: String,
    #[sea_orm(unique)]
    pub confirmation_code: String,
    pub payment_reference: Option<String>,
    pub expires_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::trip::Entity",
        from = "Column::TripId",
        to = "super::trip::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Trip,
}

impl ActiveModelBehavior for ActiveModel {}
