use thiserror::Error;

/// Database layer errors
#[derive(Error, Debug)]
pub enum DbError {
    #[error("Unique constraint violated on {table}.{column}")]
    UniqueViolation {
        table: &'static str,
        column: &'static str,
    },

    #[error("Record not found: {table} {id}")]
    RecordNotFound { table: &'static str, id: uuid::Uuid },

    #[error("Store lock poisoned")]
    LockPoisoned,

    #[error(transparent)]
    CoreError(#[from] openmensa_core::error::CoreError),
}

pub type DbResult<T> = std::result::Result<T, DbError>;
