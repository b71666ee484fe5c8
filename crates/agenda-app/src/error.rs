use thiserror::Error;

/// Application-level errors (HTTP layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    StoreError(#[from] agenda_db::error::StoreError),

    #[error(transparent)]
    CoreError(#[from] agenda_core::error::CoreError),
}

pub type AppResult<T> = std::result::Result<T, AppError>;
