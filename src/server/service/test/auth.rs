use crate::server::{
    error::{auth::AuthError, AppError},
    model::user::RegisterParams,
    service::{auth::AuthService, wallet::WalletService},
};
use test_utils::{builder::TestBuilder, factory};

use super::assert_status;

fn params(email: &str, username: &str) -> RegisterParams {
    RegisterParams {
        email: email.to_string(),
        username: username.to_string(),
        password: "correct horse".to_string(),
        display_name: String::new(),
    }
}

/// Tests that the first registered user becomes admin and gets a wallet.
///
/// Expected: first user admin with an empty wallet, second user not admin
#[tokio::test]
async fn first_user_becomes_admin_with_wallet() -> Result<(), AppError> {
    let test = TestBuilder::new().with_wallet_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let service = AuthService::new(db);
    let first = service.register(params("a@example.com", "alpha")).await?;
    let second = service.register(params("b@example.com", "bravo")).await?;

    assert!(first.admin);
    assert!(!second.admin);
    assert_eq!(first.display_name, "alpha");
    assert_eq!(WalletService::new(db).get_wallet(first.id).await?.balance, 0);

    Ok(())
}

/// Tests duplicate email and username rejection.
///
/// Expected: 409 for both
#[tokio::test]
async fn rejects_taken_email_and_username() -> Result<(), AppError> {
    let test = TestBuilder::new().with_wallet_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let service = AuthService::new(db);
    service.register(params("a@example.com", "alpha")).await?;

    assert_status(service.register(params("a@example.com", "other")).await, 409);
    assert_status(service.register(params("new@example.com", "alpha")).await, 409);

    Ok(())
}

/// Tests input validation on registration.
///
/// Expected: 400 for a short password and a malformed email
#[tokio::test]
async fn validates_registration_input() -> Result<(), AppError> {
    let test = TestBuilder::new().with_wallet_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let service = AuthService::new(db);

    let mut short = params("a@example.com", "alpha");
    short.password = "short".to_string();
    assert_status(service.register(short).await, 400);

    assert_status(service.register(params("not-an-email", "alpha")).await, 400);

    Ok(())
}

/// Tests logging in with correct and incorrect credentials.
///
/// Expected: Ok for the right password, InvalidCredentials otherwise
#[tokio::test]
async fn login_checks_password() -> Result<(), AppError> {
    let test = TestBuilder::new().with_wallet_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let service = AuthService::new(db);
    let user = service.register(params("Traveller@Example.com", "traveller")).await?;

    let logged_in = service.login("traveller@example.com", "correct horse").await?;
    assert_eq!(logged_in.id, user.id);

    let wrong = service.login("traveller@example.com", "battery staple").await;
    assert!(matches!(
        wrong,
        Err(AppError::AuthErr(AuthError::InvalidCredentials))
    ));

    let unknown = service.login("nobody@example.com", "correct horse").await;
    assert!(matches!(
        unknown,
        Err(AppError::AuthErr(AuthError::InvalidCredentials))
    ));

    Ok(())
}

/// Tests that the factory placeholder hash never verifies.
///
/// Expected: InvalidCredentials
#[tokio::test]
async fn placeholder_hash_never_logs_in() -> Result<(), AppError> {
    let test = TestBuilder::new().with_wallet_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;

    let result = AuthService::new(db).login(&user.email, "anything").await;

    assert_status(result, 401);

    Ok(())
}
