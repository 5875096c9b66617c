use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "trip")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub organizer_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub destination: String,
    pub start_date: Date,
    pub end_date: Date,
    /// One of `planning`, `upcoming`, `ongoing`, `completed`, `cancelled`.
    pub status: String,
    pub is_public: bool,
    pub max_participants: i32,
    /// Price per seat in minor currency units.
    pub price_per_person: i64,
    pub currency: String,
    /// JSON array of tag strings.
    pub tags: Json,
    pub cover_image_url: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::OrganizerId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Organizer,
    #[sea_orm(has_many = "super::trip_member::Entity")]
    TripMember,
}

impl Related<super::trip_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TripMember.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
