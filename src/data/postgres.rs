use crate::{
    data::{
        StudentRepository,
        student::{COLUMNS, Student, StudentRow, TABLE},
    },
    error::{MakeQuerySnafu, RosterResult},
};
use async_trait::async_trait;
use snafu::ResultExt;
use sqlx::{Pool, Postgres};
use std::sync::LazyLock;

static INSERT: LazyLock<String> = LazyLock::new(|| {
    format!(
        "INSERT INTO {TABLE} (name, email, phone, address) VALUES ($1, $2, $3, $4) RETURNING {COLUMNS}"
    )
});
static UPSERT: LazyLock<String> = LazyLock::new(|| {
    format!(
        "INSERT INTO {TABLE} ({COLUMNS}) VALUES ($1, $2, $3, $4, $5) \
         ON CONFLICT (id) DO UPDATE SET name = EXCLUDED.name, email = EXCLUDED.email, phone = EXCLUDED.phone, address = EXCLUDED.address \
         RETURNING {COLUMNS}"
    )
});
static SELECT_BY_ID: LazyLock<String> =
    LazyLock::new(|| format!("SELECT {COLUMNS} FROM {TABLE} WHERE id = $1"));
static SELECT_ALL: LazyLock<String> =
    LazyLock::new(|| format!("SELECT {COLUMNS} FROM {TABLE} ORDER BY id"));
static EXISTS: LazyLock<String> =
    LazyLock::new(|| format!("SELECT EXISTS(SELECT 1 FROM {TABLE} WHERE id = $1)"));
static DELETE: LazyLock<String> = LazyLock::new(|| format!("DELETE FROM {TABLE} WHERE id = $1"));

#[derive(Clone, Debug)]
pub struct PostgresStudentRepository {
    pool: Pool<Postgres>,
}

impl PostgresStudentRepository {
    pub const fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StudentRepository for PostgresStudentRepository {
    async fn save(&self, student: Student) -> RosterResult<Student> {
        let Student {
            id,
            name,
            email,
            phone,
            address,
        } = student;

        let row = match id {
            None => {
                sqlx::query_as::<_, StudentRow>(INSERT.as_str())
                    .bind(name)
                    .bind(email)
                    .bind(phone)
                    .bind(address)
                    .fetch_one(&self.pool)
                    .await
            }
            Some(id) => {
                sqlx::query_as::<_, StudentRow>(UPSERT.as_str())
                    .bind(id)
                    .bind(name)
                    .bind(email)
                    .bind(phone)
                    .bind(address)
                    .fetch_one(&self.pool)
                    .await
            }
        }
        .context(MakeQuerySnafu)?;

        debug!(id = row.id, "Saved student");
        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> RosterResult<Option<Student>> {
        Ok(sqlx::query_as::<_, StudentRow>(SELECT_BY_ID.as_str())
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context(MakeQuerySnafu)?
            .map(Student::from))
    }

    async fn find_all(&self) -> RosterResult<Vec<Student>> {
        Ok(sqlx::query_as::<_, StudentRow>(SELECT_ALL.as_str())
            .fetch_all(&self.pool)
            .await
            .context(MakeQuerySnafu)?
            .into_iter()
            .map(Student::from)
            .collect())
    }

    async fn exists_by_id(&self, id: i64) -> RosterResult<bool> {
        sqlx::query_scalar::<_, bool>(EXISTS.as_str())
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .context(MakeQuerySnafu)
    }

    async fn delete_by_id(&self, id: i64) -> RosterResult<()> {
        sqlx::query(DELETE.as_str())
            .bind(id)
            .execute(&self.pool)
            .await
            .context(MakeQuerySnafu)?;
        Ok(())
    }
}
