// src/config.rs
//
// Все параметры зашиты в Default: флагов, env и файлов конфигурации нет.

use std::time::Duration;

use crate::db::student::NewStudent;

/// Пауза перед первым обращением к базе (Postgres может ещё подниматься).
pub const WARMUP: Duration = Duration::from_secs(5);

/// Параметры подключения к PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgSettings {
    pub host: String,
    pub dbname: String,
    pub user: String,
    pub password: String,
    /// None = порт драйвера по умолчанию (5432)
    pub port: Option<u16>,
    /// None = таймаут драйвера по умолчанию
    pub connect_timeout: Option<Duration>,
}

impl Default for PgSettings {
    fn default() -> Self {
        Self {
            host: "my-postgres".to_string(),
            dbname: "mydb".to_string(),
            user: "user".to_string(),
            password: "pass".to_string(),
            port: None,
            connect_timeout: None,
        }
    }
}

impl PgSettings {
    pub fn to_pg_config(&self) -> tokio_postgres::Config {
        let mut config = tokio_postgres::Config::new();
        config
            .host(&self.host)
            .dbname(&self.dbname)
            .user(&self.user)
            .password(&self.password);
        if let Some(port) = self.port {
            config.port(port);
        }
        if let Some(timeout) = self.connect_timeout {
            config.connect_timeout(timeout);
        }
        config
    }
}

/// Полная конфигурация демо-прогона.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub warmup: Duration,
    pub pg: PgSettings,
    pub student: NewStudent,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            warmup: WARMUP,
            pg: PgSettings::default(),
            student: NewStudent::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_fixed_target() {
        let cfg = DemoConfig::default();
        assert_eq!(cfg.warmup, Duration::from_secs(5));
        assert_eq!(cfg.student, NewStudent::new("Sanjay", 22));

        let pg = cfg.pg.to_pg_config();
        assert_eq!(pg.get_dbname(), Some("mydb"));
        assert_eq!(pg.get_user(), Some("user"));
        assert_eq!(pg.get_password(), Some(&b"pass"[..]));
        assert_eq!(
            pg.get_hosts(),
            &[tokio_postgres::config::Host::Tcp("my-postgres".to_string())]
        );
        // порт не задан явно
        assert!(pg.get_ports().is_empty());
    }

    #[test]
    fn explicit_port_and_timeout() {
        let settings = PgSettings {
            port: Some(6543),
            connect_timeout: Some(Duration::from_secs(2)),
            ..PgSettings::default()
        };
        let pg = settings.to_pg_config();
        assert_eq!(pg.get_ports(), &[6543]);
        assert_eq!(pg.get_connect_timeout(), Some(&Duration::from_secs(2)));
    }
}
