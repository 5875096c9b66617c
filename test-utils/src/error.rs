use thiserror::Error;

/// Errors that can occur while preparing a test context.
#[derive(Error, Debug)]
pub enum TestError {
    /// Failed to connect to the in-memory database or create a table.
    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),

    /// Failed to prepare the session store.
    #[error("Failed to prepare session store: {0}")]
    Session(String),

    /// A context part was read before it was created.
    #[error("Test context {0} is not initialized")]
    NotInitialized(&'static str),
}
