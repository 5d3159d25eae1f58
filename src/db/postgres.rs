// src/db/postgres.rs

use async_trait::async_trait;
use log::{debug, error, info};
use tokio::task::JoinHandle;
use tokio_postgres::{Client, NoTls};

use crate::config::PgSettings;
use crate::db::error::{DbError, DbResult};
use crate::db::schema::{self, pg};
use crate::db::student::{NewStudent, Student};
use crate::db::{Connector, StudentStore};

pub struct PgConnector {
    settings: PgSettings,
}

impl PgConnector {
    pub fn new(settings: PgSettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl Connector for PgConnector {
    type Store = PgStudentStore;

    fn backend_name(&self) -> &'static str {
        "PostgreSQL"
    }

    async fn connect(&self) -> DbResult<PgStudentStore> {
        debug!(
            "connecting to postgres host={} dbname={} user={}",
            self.settings.host, self.settings.dbname, self.settings.user
        );
        let (client, connection) = self.settings.to_pg_config().connect(NoTls).await?;

        // Соединение обслуживается отдельной задачей, клиент только шлёт запросы.
        // Задача завершается, когда клиент закрыт (drop).
        let conn_task = tokio::spawn(async move {
            if let Err(e) = connection.await {
                error!("postgres connection error: {}", e);
            }
        });

        Ok(PgStudentStore { client, conn_task })
    }
}

/// Соединение с PostgreSQL, которым владеет ровно один прогон.
pub struct PgStudentStore {
    client: Client,
    conn_task: JoinHandle<()>,
}

#[async_trait]
impl StudentStore for PgStudentStore {
    async fn ensure_table(&mut self) -> DbResult<()> {
        // DDL в PostgreSQL транзакционный, коммитим явно
        let tx = self.client.transaction().await?;
        tx.batch_execute(pg::CREATE_STUDENTS).await?;
        tx.commit().await?;
        debug!("table {} ensured", schema::TABLE_NAME);
        Ok(())
    }

    async fn insert(&mut self, student: &NewStudent) -> DbResult<i32> {
        student.validate()?;
        let tx = self.client.transaction().await?;
        let row = tx
            .query_one(pg::INSERT_STUDENT, &[&student.name, &student.age])
            .await?;
        let id: i32 = row.try_get(0)?;
        tx.commit().await?;
        Ok(id)
    }

    async fn fetch(&mut self, id: i32) -> DbResult<Student> {
        let row = self
            .client
            .query_opt(pg::SELECT_STUDENT, &[&id])
            .await?
            .ok_or(DbError::NotFound { id })?;

        Ok(Student {
            id: row.try_get(0)?,
            name: row.try_get(1)?,
            age: row.try_get(2)?,
        })
    }

    async fn close(self) -> DbResult<()> {
        let PgStudentStore { client, conn_task } = self;
        // drop клиента отправляет Terminate, после чего задача соединения выходит
        drop(client);
        conn_task.await?;
        info!("postgres connection terminated");
        Ok(())
    }
}
