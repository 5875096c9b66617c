use super::*;

fn entry(user_id: i32, reference: &str, amount: i64) -> NewWalletTransaction {
    NewWalletTransaction {
        user_id,
        kind: TransactionKind::Credit,
        amount,
        balance_after: amount,
        reference: reference.to_string(),
        description: "Top-up".to_string(),
        booking_id: None,
    }
}

/// Tests inserting a ledger row and finding it by reference.
///
/// Expected: Ok(Some(transaction))
#[tokio::test]
async fn finds_transaction_by_reference() -> Result<(), AppError> {
    let test = TestBuilder::new().with_wallet_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;

    let repo = WalletRepository::new(db);
    let inserted = repo.insert_transaction(entry(user.id, "topup:a", 10_000)).await?;

    let found = repo.find_transaction_by_reference("topup:a").await?;
    assert_eq!(found, Some(inserted));
    assert!(repo.find_transaction_by_reference("topup:b").await?.is_none());

    Ok(())
}

/// Tests the unique constraint on references.
///
/// Expected: Err on the second insert
#[tokio::test]
async fn rejects_duplicate_reference() -> Result<(), AppError> {
    let test = TestBuilder::new().with_wallet_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;

    let repo = WalletRepository::new(db);
    repo.insert_transaction(entry(user.id, "topup:dup", 10_000)).await?;

    assert!(repo
        .insert_transaction(entry(user.id, "topup:dup", 10_000))
        .await
        .is_err());

    Ok(())
}

/// Tests paginating a user's ledger.
///
/// Expected: Ok with the page size honoured and other users excluded
#[tokio::test]
async fn paginates_user_ledger() -> Result<(), AppError> {
    let test = TestBuilder::new().with_wallet_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let other = factory::user::create_user(db).await?;

    let repo = WalletRepository::new(db);
    for i in 0..3 {
        repo.insert_transaction(entry(user.id, &format!("ref:{}", i), 100))
            .await?;
    }
    repo.insert_transaction(entry(other.id, "ref:other", 100)).await?;

    let (transactions, total) = repo.transactions(user.id, 0, 2).await?;

    assert_eq!(total, 3);
    assert_eq!(transactions.len(), 2);
    assert!(transactions.iter().all(|t| t.user_id == user.id));

    Ok(())
}
