//! Local email and password authentication.

use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{user::UserRepository, wallet::WalletRepository},
    error::{auth::AuthError, AppError},
    model::user::{CreateUserParams, RegisterParams, User},
    util::password::{hash_password, verify_password},
};

/// Minimum accepted password length in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a new account together with its empty wallet.
    ///
    /// The first account registered while no admin exists is made admin.
    ///
    /// # Returns
    /// - `Ok(User)` - The created user
    /// - `Err(AppError::BadRequest)` - Malformed email, empty username or short password
    /// - `Err(AppError::Conflict)` - Email or username already taken
    pub async fn register(&self, params: RegisterParams) -> Result<User, AppError> {
        validate_registration(&params)?;

        let user_repo = UserRepository::new(self.db);
        if user_repo.email_exists(&params.email).await? {
            return Err(AppError::Conflict("Email is already registered".to_string()));
        }
        if user_repo.username_exists(&params.username).await? {
            return Err(AppError::Conflict("Username is already taken".to_string()));
        }

        let password_hash = hash_password(&params.password)?;
        let display_name = if params.display_name.is_empty() {
            params.username.clone()
        } else {
            params.display_name
        };

        let txn = self.db.begin().await?;

        let admin = !UserRepository::new(&txn).admin_exists().await?;
        let user = UserRepository::new(&txn)
            .create(CreateUserParams {
                email: params.email,
                username: params.username,
                password_hash,
                display_name,
                admin,
            })
            .await?;
        WalletRepository::new(&txn).get_or_create(user.id).await?;

        txn.commit().await?;

        if user.admin {
            tracing::info!("User {} registered as the first admin", user.id);
        }

        Ok(user)
    }

    /// Checks credentials and returns the matching user.
    ///
    /// Unknown emails and wrong passwords produce the same error.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AppError> {
        let email = email.trim().to_lowercase();

        let Some((user, password_hash)) = UserRepository::new(self.db)
            .find_credentials_by_email(&email)
            .await?
        else {
            return Err(AuthError::InvalidCredentials.into());
        };

        if !verify_password(password, &password_hash) {
            return Err(AuthError::InvalidCredentials.into());
        }

        Ok(user)
    }
}

fn validate_registration(params: &RegisterParams) -> Result<(), AppError> {
    let valid_email = params
        .email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());
    if !valid_email {
        return Err(AppError::BadRequest("A valid email is required".to_string()));
    }
    if params.username.is_empty() {
        return Err(AppError::BadRequest("Username is required".to_string()));
    }
    if params.password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::BadRequest(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }

    Ok(())
}
