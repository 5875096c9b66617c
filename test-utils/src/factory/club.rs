//! Club factories.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a club owned by `owner_id` together with the owner membership row.
pub async fn create_club(
    db: &DatabaseConnection,
    owner_id: i32,
    is_private: bool,
) -> Result<entity::club::Model, DbErr> {
    let club = entity::club::ActiveModel {
        name: ActiveValue::Set(format!("Club {}", next_id())),
        description: ActiveValue::Set(None),
        owner_id: ActiveValue::Set(owner_id),
        is_private: ActiveValue::Set(is_private),
        created_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    create_club_member(db, club.id, owner_id, "owner").await?;

    Ok(club)
}

pub async fn create_club_member(
    db: &DatabaseConnection,
    club_id: i32,
    user_id: i32,
    role: &str,
) -> Result<entity::club_member::Model, DbErr> {
    entity::club_member::ActiveModel {
        club_id: ActiveValue::Set(club_id),
        user_id: ActiveValue::Set(user_id),
        role: ActiveValue::Set(role.to_string()),
        joined_at: ActiveValue::Set(Utc::now()),
    }
    .insert(db)
    .await
}
