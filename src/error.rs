use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Referential integrity violation: {0}")]
    ReferentialIntegrity(String),

    #[error("ORM error")]
    OrmError(#[source] DbErr),
}

impl AppError {
    /// Rewrites a foreign-key violation raised while deleting a row into a
    /// message naming the blocked resource. Other errors pass through.
    pub fn restricted(self, message: &str) -> Self {
        match self {
            AppError::ReferentialIntegrity(_) => AppError::ReferentialIntegrity(message.into()),
            other => other,
        }
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(message)) => {
                AppError::ReferentialIntegrity(message)
            }
            _ => AppError::OrmError(err),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
