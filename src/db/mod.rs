// src/db/mod.rs
//
// Здесь:
// 1) подключаем модули бэкендов и модели
// 2) объявляем трейты Connector / StudentStore, через которые работает runner

pub mod error;
pub mod postgres;
pub mod schema;
pub mod sqlite;
pub mod student;

use async_trait::async_trait;

pub use error::{DbError, DbResult};
pub use student::{NewStudent, Student};

/// Открывает соединение с базой.
#[async_trait]
pub trait Connector {
    type Store: StudentStore;

    /// Имя бэкенда для логов и строки подтверждения ("PostgreSQL", "SQLite").
    fn backend_name(&self) -> &'static str;

    async fn connect(&self) -> DbResult<Self::Store>;
}

/// Операции над таблицей students в рамках одного соединения.
///
/// Каждая запись коммитится сразу после выполнения.
#[async_trait]
pub trait StudentStore: Send + Sized {
    /// CREATE TABLE IF NOT EXISTS + commit.
    async fn ensure_table(&mut self) -> DbResult<()>;

    /// INSERT ... RETURNING id + commit. Возвращает id, выданный сервером.
    async fn insert(&mut self, student: &NewStudent) -> DbResult<i32>;

    /// SELECT по id. Отсутствие строки - ошибка.
    async fn fetch(&mut self, id: i32) -> DbResult<Student>;

    async fn close(self) -> DbResult<()>;
}
