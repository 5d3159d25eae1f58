// src/db/student.rs

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::db::error::{DbError, DbResult};
use crate::db::schema::NAME_MAX_LEN;

/// Строка таблицы students. `id` выдаёт сервер при вставке.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: i32,
    pub name: String,
    pub age: i32,
}

/// Печатается как кортеж: `(1, 'Sanjay', 22)`
impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, '{}', {})", self.id, self.name, self.age)
    }
}

/// Данные для INSERT, без id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStudent {
    pub name: String,
    pub age: i32,
}

impl NewStudent {
    pub fn new(name: impl Into<String>, age: i32) -> Self {
        Self { name: name.into(), age }
    }

    /// Проверка до отправки SQL: name должен влезать в VARCHAR(50).
    pub fn validate(&self) -> DbResult<()> {
        let len = self.name.chars().count();
        if len > NAME_MAX_LEN {
            return Err(DbError::NameTooLong { len });
        }
        Ok(())
    }

    pub fn with_id(self, id: i32) -> Student {
        Student {
            id,
            name: self.name,
            age: self.age,
        }
    }
}

impl Default for NewStudent {
    fn default() -> Self {
        Self::new("Sanjay", 22)
    }
}
