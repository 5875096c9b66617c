use super::*;

/// Tests listing followers and followed users.
///
/// Expected: Ok with the ids on each side of the edges
#[tokio::test]
async fn lists_both_directions() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let target = factory::user::create_user(db).await?;
    let first = factory::user::create_user(db).await?;
    let second = factory::user::create_user(db).await?;

    let repo = FollowRepository::new(db);
    repo.create(first.id, target.id).await?;
    repo.create(second.id, target.id).await?;
    repo.create(target.id, first.id).await?;

    let (followers, total) = repo.followers_paginated(target.id, 0, 10).await?;
    let mut follower_ids: Vec<i32> = followers.iter().map(|(id, _)| *id).collect();
    follower_ids.sort();
    assert_eq!(total, 2);
    assert_eq!(follower_ids, vec![first.id, second.id]);

    let (following, total) = repo.following_paginated(target.id, 0, 10).await?;
    assert_eq!(total, 1);
    assert_eq!(following[0].0, first.id);

    assert_eq!(repo.following_ids(target.id).await?, vec![first.id]);

    Ok(())
}

/// Tests that the page size limits the entries but not the total.
///
/// Expected: Ok with one entry and total 2
#[tokio::test]
async fn respects_page_size() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let target = factory::user::create_user(db).await?;
    let repo = FollowRepository::new(db);
    for _ in 0..2 {
        let follower = factory::user::create_user(db).await?;
        repo.create(follower.id, target.id).await?;
    }

    let (followers, total) = repo.followers_paginated(target.id, 0, 1).await?;

    assert_eq!(followers.len(), 1);
    assert_eq!(total, 2);

    Ok(())
}
