// src/db/sqlite.rs
//
// Тот же контракт students поверх tokio_rusqlite. Нужен, чтобы гонять
// последовательность без живого PostgreSQL (тесты, локальный прогон).

use std::path::PathBuf;

use async_trait::async_trait;
use log::debug;
use rusqlite::{params, OptionalExtension};
use tokio_rusqlite::Connection;

use crate::db::error::{DbError, DbResult};
use crate::db::schema::{self, sqlite};
use crate::db::student::{NewStudent, Student};
use crate::db::{Connector, StudentStore};

/// None = база в памяти (живёт до close).
pub struct SqliteConnector {
    path: Option<PathBuf>,
}

impl SqliteConnector {
    pub fn in_memory() -> Self {
        Self { path: None }
    }

    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }
}

#[async_trait]
impl Connector for SqliteConnector {
    type Store = SqliteStudentStore;

    fn backend_name(&self) -> &'static str {
        "SQLite"
    }

    async fn connect(&self) -> DbResult<SqliteStudentStore> {
        let conn = match &self.path {
            Some(path) => {
                debug!("opening sqlite file {}", path.display());
                Connection::open(path.clone()).await?
            }
            None => Connection::open_in_memory().await?,
        };
        Ok(SqliteStudentStore { conn })
    }
}

pub struct SqliteStudentStore {
    conn: Connection,
}

#[async_trait]
impl StudentStore for SqliteStudentStore {
    async fn ensure_table(&mut self) -> DbResult<()> {
        self.conn
            .call(|conn| {
                let tx = conn.transaction()?;
                tx.execute_batch(sqlite::CREATE_STUDENTS)?;
                tx.commit()?;
                Ok(())
            })
            .await?;
        debug!("table {} ensured", schema::TABLE_NAME);
        Ok(())
    }

    async fn insert(&mut self, student: &NewStudent) -> DbResult<i32> {
        student.validate()?;
        let NewStudent { name, age } = student.clone();
        let id = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction()?;
                let id: i32 =
                    tx.query_row(sqlite::INSERT_STUDENT, params![name, age], |r| r.get(0))?;
                tx.commit()?;
                Ok(id)
            })
            .await?;
        Ok(id)
    }

    async fn fetch(&mut self, id: i32) -> DbResult<Student> {
        let row = self
            .conn
            .call(move |conn| {
                let row = conn
                    .query_row(sqlite::SELECT_STUDENT, params![id], |r| {
                        Ok(Student {
                            id: r.get(0)?,
                            name: r.get(1)?,
                            age: r.get(2)?,
                        })
                    })
                    .optional()?;
                Ok(row)
            })
            .await?;
        row.ok_or(DbError::NotFound { id })
    }

    async fn close(self) -> DbResult<()> {
        self.conn.close().await?;
        Ok(())
    }
}
