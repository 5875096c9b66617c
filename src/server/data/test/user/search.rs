use super::*;

/// Tests matching on username or display name, ordered by username.
///
/// Expected: Ok with matching users only
#[tokio::test]
async fn matches_username_or_display_name() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db)
        .username("zoya_hikes")
        .display_name("Zoya")
        .build()
        .await?;
    factory::user::UserFactory::new(db)
        .username("arjun")
        .display_name("Arjun Hikes Often")
        .build()
        .await?;
    factory::user::UserFactory::new(db)
        .username("meera")
        .display_name("Meera")
        .build()
        .await?;

    let (users, total) = UserRepository::new(db).search("hikes", 0, 10).await?;

    assert_eq!(total, 2);
    let usernames: Vec<&str> = users.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(usernames, vec!["arjun", "zoya_hikes"]);

    Ok(())
}

/// Tests pagination metadata of a search.
///
/// Expected: Ok with one item on the second page and the full total
#[tokio::test]
async fn paginates_results() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    for name in ["trek_a", "trek_b", "trek_c"] {
        factory::user::UserFactory::new(db).username(name).build().await?;
    }

    let (users, total) = UserRepository::new(db).search("trek", 1, 2).await?;

    assert_eq!(total, 3);
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].username, "trek_c");

    Ok(())
}

/// Tests that LIKE wildcards in the query match only themselves.
///
/// Expected: `a_b` finds the literal underscore only and `%` finds nothing else
#[tokio::test]
async fn treats_wildcards_literally() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db)
        .username("a_b")
        .display_name("Underscore")
        .build()
        .await?;
    factory::user::UserFactory::new(db)
        .username("axb")
        .display_name("Letter")
        .build()
        .await?;

    let repo = UserRepository::new(db);

    let (users, total) = repo.search("a_b", 0, 10).await?;
    assert_eq!(total, 1);
    assert_eq!(users[0].username, "a_b");

    let (_, total) = repo.search("%", 0, 10).await?;
    assert_eq!(total, 0);

    Ok(())
}
