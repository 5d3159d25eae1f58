// src/runner.rs
//
// Линейная демо-последовательность:
// Start -> Wait -> Connected -> SchemaEnsured -> Inserted -> ReadBack -> Closed
// Любая ошибка после Start обрывает цепочку и уходит в единственный обработчик.

use std::fmt;
use std::io::Write;

use log::{debug, error, info};

use crate::config::DemoConfig;
use crate::db::{Connector, DbResult, Student, StudentStore};
use crate::monitoring::measure_db_operation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    Wait,
    Connected,
    SchemaEnsured,
    Inserted,
    ReadBack,
    Closed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Start => "start",
            Stage::Wait => "wait",
            Stage::Connected => "connected",
            Stage::SchemaEnsured => "schema-ensured",
            Stage::Inserted => "inserted",
            Stage::ReadBack => "read-back",
            Stage::Closed => "closed",
        };
        f.write_str(name)
    }
}

/// Прогоняет всю последовательность, печатая строки статуса в `out`.
///
/// Соединение закрывается явно только на успешном пути. При ошибке оно
/// просто дропается вместе с future, строки "Connection closed" не будет.
pub async fn run<C, W>(connector: &C, config: &DemoConfig, out: &mut W) -> DbResult<Student>
where
    C: Connector + Sync,
    W: Write,
{
    let mut stage = Stage::Start;
    let result = run_stages(connector, config, out, &mut stage).await;
    if let Err(e) = &result {
        error!("demo aborted after stage {}: {}", stage, e);
    }
    result
}

async fn run_stages<C, W>(
    connector: &C,
    config: &DemoConfig,
    out: &mut W,
    stage: &mut Stage,
) -> DbResult<Student>
where
    C: Connector + Sync,
    W: Write,
{
    // 1. Ждём, пока база поднимется
    debug!("warm-up for {:?}", config.warmup);
    tokio::time::sleep(config.warmup).await;
    *stage = Stage::Wait;

    // 2. Подключение
    let mut store = measure_db_operation("connect", connector.connect()).await?;
    *stage = Stage::Connected;
    info!("connected to {}", connector.backend_name());
    writeln!(out, "✅ Connected to {}!", connector.backend_name())?;

    // 3. Таблица
    measure_db_operation("ensure_table", store.ensure_table()).await?;
    *stage = Stage::SchemaEnsured;
    writeln!(out, "✅ Table created or already exists.")?;

    // 4. Вставка
    let id = measure_db_operation("insert", store.insert(&config.student)).await?;
    *stage = Stage::Inserted;
    info!("inserted student id={}", id);
    writeln!(out, "✅ Inserted id = {}", id)?;

    // 5. Чтение
    let row = measure_db_operation("fetch", store.fetch(id)).await?;
    *stage = Stage::ReadBack;
    debug!(
        "fetched {}",
        serde_json::to_string(&row).unwrap_or_else(|_| row.to_string())
    );
    writeln!(out, "✅ Fetched row: {}", row)?;

    // 6. Закрываем
    measure_db_operation("close", store.close()).await?;
    *stage = Stage::Closed;
    writeln!(out, "✅ Connection closed.")?;

    Ok(row)
}

/// Внешняя граница ошибок: ошибка печатается одной строкой и не пробрасывается.
pub async fn run_and_report<C, W>(connector: &C, config: &DemoConfig, out: &mut W)
where
    C: Connector + Sync,
    W: Write,
{
    if let Err(e) = run(connector, config, out).await {
        if let Err(io) = writeln!(out, "❌ Error: {}", e) {
            error!("failed to report error: {}", io);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::SqliteConnector;
    use crate::db::DbError;
    use crate::db::NewStudent;
    use std::time::Duration;

    fn quick_config() -> DemoConfig {
        DemoConfig {
            warmup: Duration::ZERO,
            ..DemoConfig::default()
        }
    }

    fn lines(buf: &[u8]) -> Vec<String> {
        String::from_utf8_lossy(buf).lines().map(str::to_string).collect()
    }

    #[tokio::test]
    async fn success_path_prints_five_lines() {
        let mut out = Vec::new();
        let row = run(&SqliteConnector::in_memory(), &quick_config(), &mut out)
            .await
            .unwrap();

        assert_eq!(row, NewStudent::default().with_id(1));
        assert_eq!(
            lines(&out),
            vec![
                "✅ Connected to SQLite!",
                "✅ Table created or already exists.",
                "✅ Inserted id = 1",
                "✅ Fetched row: (1, 'Sanjay', 22)",
                "✅ Connection closed.",
            ]
        );
    }

    #[tokio::test]
    async fn failure_stops_sequence() {
        let config = DemoConfig {
            student: NewStudent::new("n".repeat(51), 22),
            ..quick_config()
        };
        let mut out = Vec::new();
        let err = run(&SqliteConnector::in_memory(), &config, &mut out)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NameTooLong { len: 51 }));

        // дальше вставки не пошли, закрытия нет
        assert_eq!(
            lines(&out),
            vec!["✅ Connected to SQLite!", "✅ Table created or already exists."]
        );
    }

    #[tokio::test]
    async fn report_prints_single_error_line() {
        let config = DemoConfig {
            student: NewStudent::new("n".repeat(51), 22),
            ..quick_config()
        };
        let mut out = Vec::new();
        run_and_report(&SqliteConnector::in_memory(), &config, &mut out).await;

        let printed = lines(&out);
        assert_eq!(printed.len(), 3);
        assert_eq!(
            printed[2],
            "❌ Error: student name is 51 characters long, at most 50 allowed"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn waits_before_connecting() {
        let started = tokio::time::Instant::now();
        let mut out = Vec::new();
        run(&SqliteConnector::in_memory(), &DemoConfig::default(), &mut out)
            .await
            .unwrap();
        assert!(started.elapsed() >= Duration::from_secs(5));
    }

    #[test]
    fn stage_names() {
        assert_eq!(Stage::SchemaEnsured.to_string(), "schema-ensured");
        assert_eq!(Stage::ReadBack.to_string(), "read-back");
    }
}
