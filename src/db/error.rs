// src/db/error.rs

use thiserror::Error;

/// Единственный тип ошибки демо-последовательности.
///
/// Для внешнего обработчика все варианты равнозначны: он печатает `Display`
/// и останавливает выполнение.
#[derive(Debug, Error)]
pub enum DbError {
    #[error(transparent)]
    Postgres(#[from] tokio_postgres::Error),

    #[error(transparent)]
    Sqlite(#[from] tokio_rusqlite::Error),

    #[error("no student with id={id}")]
    NotFound { id: i32 },

    #[error("student name is {len} characters long, at most 50 allowed")]
    NameTooLong { len: usize },

    #[error("connection task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// rusqlite внутри conn.call(...) отдаёт свой Error, заворачиваем через tokio_rusqlite
impl From<rusqlite::Error> for DbError {
    fn from(e: rusqlite::Error) -> Self {
        DbError::Sqlite(e.into())
    }
}

pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_mentions_id() {
        let e = DbError::NotFound { id: 42 };
        assert_eq!(e.to_string(), "no student with id=42");
    }

    #[test]
    fn sqlite_error_is_transparent() {
        let e: DbError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(e
            .to_string()
            .contains(&rusqlite::Error::QueryReturnedNoRows.to_string()));
    }
}
