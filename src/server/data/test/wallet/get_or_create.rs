use super::*;

/// Tests creating an empty wallet on first access.
///
/// Expected: Ok with zero balance, and the same wallet on the second call
#[tokio::test]
async fn creates_empty_wallet_once() -> Result<(), AppError> {
    let test = TestBuilder::new().with_wallet_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;

    let repo = WalletRepository::new(db);
    assert!(repo.find(user.id).await?.is_none());

    let wallet = repo.get_or_create(user.id).await?;
    assert_eq!(wallet.balance, 0);
    assert_eq!(wallet.currency, "INR");

    repo.set_balance(user.id, 5_000).await?;
    let wallet = repo.get_or_create(user.id).await?;
    assert_eq!(wallet.balance, 5_000);

    Ok(())
}
