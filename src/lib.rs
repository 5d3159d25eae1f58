// src/lib.rs

pub mod config;
pub mod db;
pub mod monitoring;
pub mod runner;

pub use config::{DemoConfig, PgSettings};
pub use db::postgres::PgConnector;
pub use db::sqlite::SqliteConnector;
pub use db::{Connector, DbError, DbResult, NewStudent, Student, StudentStore};
pub use runner::{run, run_and_report, Stage};
