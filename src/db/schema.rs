// src/db/schema.rs
//
// SQL для таблицы students. Один и тот же контракт в двух диалектах:
// PostgreSQL (боевой) и SQLite (локальный/тестовый).

pub const TABLE_NAME: &str = "students";

/// Максимальная длина name (VARCHAR(50)).
pub const NAME_MAX_LEN: usize = 50;

pub mod pg {
    pub const CREATE_STUDENTS: &str = r#"
    CREATE TABLE IF NOT EXISTS students (
        id SERIAL PRIMARY KEY,
        name VARCHAR(50),
        age INT
    );
    "#;

    pub const INSERT_STUDENT: &str = r#"
    INSERT INTO students (name, age)
    VALUES ($1, $2)
    RETURNING id;
    "#;

    pub const SELECT_STUDENT: &str = "SELECT id, name, age FROM students WHERE id = $1;";
}

pub mod sqlite {
    // SERIAL в SQLite нет, AUTOINCREMENT не переиспользует удалённые id
    pub const CREATE_STUDENTS: &str = r#"
    CREATE TABLE IF NOT EXISTS students (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name VARCHAR(50),
        age INT
    );
    "#;

    pub const INSERT_STUDENT: &str = r#"
    INSERT INTO students (name, age)
    VALUES (?1, ?2)
    RETURNING id;
    "#;

    pub const SELECT_STUDENT: &str = "SELECT id, name, age FROM students WHERE id = ?1;";
}
