use crate::{
    config::DbConfig,
    data::{PostgresStudentRepository, StudentRepository},
    error::{MigrateSnafu, OpenDatabaseSnafu, RosterResult},
    service::StudentService,
};
use snafu::ResultExt;
use sqlx::{Pool, Postgres, postgres::PgPoolOptions};
use std::{ops::Deref, sync::Arc};

#[derive(Clone)]
pub struct RosterState {
    students: StudentService,
}

impl RosterState {
    pub fn new(repo: Arc<dyn StudentRepository>) -> Self {
        Self {
            students: StudentService::new(repo),
        }
    }

    /// Connects to postgres, brings the schema up to date, and builds state over the pool.
    pub async fn connect(db_config: &DbConfig) -> RosterResult<(Self, Pool<Postgres>)> {
        let pool = PgPoolOptions::new()
            .max_connections(db_config.max_connections())
            .connect(&db_config.get_db_path())
            .await
            .context(OpenDatabaseSnafu)?;

        sqlx::migrate!().run(&pool).await.context(MigrateSnafu)?;

        let repo = PostgresStudentRepository::new(pool.clone());
        Ok((Self::new(Arc::new(repo)), pool))
    }
}

impl Deref for RosterState {
    type Target = StudentService;

    fn deref(&self) -> &Self::Target {
        &self.students
    }
}
