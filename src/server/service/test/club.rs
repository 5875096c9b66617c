use crate::server::{
    error::AppError,
    model::{
        club::{ClubRole, CreateClubParams},
        notification::NotificationKind,
        user::User,
    },
    service::{club::ClubService, notification::NotificationService},
};
use test_utils::{builder::TestBuilder, factory};

use super::assert_status;

fn params(owner_id: i32, name: &str, is_private: bool) -> CreateClubParams {
    CreateClubParams {
        owner_id,
        name: name.to_string(),
        description: None,
        is_private,
    }
}

/// Tests creating a club.
///
/// Expected: owner membership exists and duplicate names conflict
#[tokio::test]
async fn create_adds_owner_and_rejects_duplicate_name() -> Result<(), AppError> {
    let test = TestBuilder::new().with_club_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::user::create_user(db).await?;

    let service = ClubService::new(db);
    let club = service.create(params(owner.id, "Coastal Cyclists", false)).await?;

    assert_eq!(club.member_count, 1);
    let members = service.members(club.id).await?;
    assert_eq!(members[0].user.id, owner.id);
    assert_eq!(members[0].role, ClubRole::Owner);

    assert_status(
        service.create(params(owner.id, "Coastal Cyclists", true)).await,
        409,
    );

    Ok(())
}

/// Tests joining clubs.
///
/// Expected: public join notifies the owner; repeat is 409; private club is 403
#[tokio::test]
async fn join_rules() -> Result<(), AppError> {
    let test = TestBuilder::new().with_club_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::user::create_user(db).await?;
    let traveller = factory::user::create_user(db).await?;
    let open = factory::club::create_club(db, owner.id, false).await?;
    let closed = factory::club::create_club(db, owner.id, true).await?;

    let service = ClubService::new(db);
    service.join(open.id, traveller.id).await?;
    assert_status(service.join(open.id, traveller.id).await, 409);
    assert_status(service.join(closed.id, traveller.id).await, 403);
    assert_eq!(service.get(open.id).await?.member_count, 2);

    let notifications = NotificationService::new(db)
        .list(owner.id, false, 0, 10)
        .await?;
    assert_eq!(notifications.total, 1);
    assert_eq!(notifications.items[0].kind, NotificationKind::ClubJoin);

    Ok(())
}

/// Tests leaving clubs.
///
/// Expected: member leaves, owner gets 400, non-member gets 404
#[tokio::test]
async fn leave_rules() -> Result<(), AppError> {
    let test = TestBuilder::new().with_club_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::user::create_user(db).await?;
    let member = factory::user::create_user(db).await?;
    let club = factory::club::create_club(db, owner.id, false).await?;
    factory::club::create_club_member(db, club.id, member.id, "member").await?;

    let service = ClubService::new(db);
    service.leave(club.id, member.id).await?;
    assert_status(service.leave(club.id, member.id).await, 404);
    assert_status(service.leave(club.id, owner.id).await, 400);

    Ok(())
}

/// Tests delete permissions.
///
/// Expected: 403 for a member, Ok for the owner
#[tokio::test]
async fn delete_by_owner() -> Result<(), AppError> {
    let test = TestBuilder::new().with_club_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = User::from_entity(factory::user::create_user(db).await?);
    let member = User::from_entity(factory::user::create_user(db).await?);
    let club = factory::club::create_club(db, owner.id, false).await?;

    let service = ClubService::new(db);
    assert_status(service.delete(club.id, &member).await, 403);
    service.delete(club.id, &owner).await?;
    assert_status(service.get(club.id).await, 404);

    Ok(())
}
