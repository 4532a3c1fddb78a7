use crate::{
    data::{StudentRepository, student::Student},
    error::{IdsExhaustedSnafu, RosterResult},
};
use async_trait::async_trait;
use snafu::OptionExt;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i64, Student>,
    next_id: i64,
}

/// A process-local store. Generated ids start at 1 and are never reused.
///
/// Unlike the postgres identity column, saving with an explicit id moves the counter past that id.
#[derive(Debug, Default)]
pub struct InMemoryStudentRepository {
    table: RwLock<Table>,
}

impl InMemoryStudentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StudentRepository for InMemoryStudentRepository {
    async fn save(&self, mut student: Student) -> RosterResult<Student> {
        let mut table = self.table.write().await;

        let id = match student.id {
            Some(id) => id,
            None => table
                .next_id
                .checked_add(1)
                .context(IdsExhaustedSnafu { last: table.next_id })?,
        };
        table.next_id = table.next_id.max(id);
        student.id = Some(id);

        table.rows.insert(id, student.clone());
        Ok(student)
    }

    async fn find_by_id(&self, id: i64) -> RosterResult<Option<Student>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn find_all(&self) -> RosterResult<Vec<Student>> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn exists_by_id(&self, id: i64) -> RosterResult<bool> {
        Ok(self.table.read().await.rows.contains_key(&id))
    }

    async fn delete_by_id(&self, id: i64) -> RosterResult<()> {
        self.table.write().await.rows.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RosterError;

    fn named(name: &str) -> Student {
        Student {
            name: Some(name.to_string()),
            ..Student::default()
        }
    }

    #[tokio::test]
    async fn assigns_monotonic_ids() {
        let repo = InMemoryStudentRepository::new();

        let first = repo.save(named("a")).await.unwrap();
        let second = repo.save(named("b")).await.unwrap();
        repo.delete_by_id(2).await.unwrap();
        let third = repo.save(named("c")).await.unwrap();

        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
        assert_eq!(third.id, Some(3));
    }

    #[tokio::test]
    async fn save_with_id_overwrites() {
        let repo = InMemoryStudentRepository::new();
        let saved = repo.save(named("a")).await.unwrap();

        let replaced = repo
            .save(Student {
                id: saved.id,
                ..named("z")
            })
            .await
            .unwrap();

        assert_eq!(replaced.id, saved.id);
        assert_eq!(repo.find_all().await.unwrap(), vec![replaced]);
    }

    #[tokio::test]
    async fn save_with_unknown_id_inserts_and_advances_counter() {
        let repo = InMemoryStudentRepository::new();
        repo.save(Student {
            id: Some(10),
            ..named("a")
        })
        .await
        .unwrap();

        let next = repo.save(named("b")).await.unwrap();
        assert_eq!(next.id, Some(11));
    }

    #[tokio::test]
    async fn insert_after_max_id_is_an_error() {
        let repo = InMemoryStudentRepository::new();
        repo.save(Student {
            id: Some(i64::MAX),
            ..named("last")
        })
        .await
        .unwrap();

        assert!(matches!(
            repo.save(named("overflow")).await,
            Err(RosterError::IdsExhausted { last: i64::MAX })
        ));
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn delete_of_absent_id_is_a_noop() {
        let repo = InMemoryStudentRepository::new();
        repo.delete_by_id(42).await.unwrap();
        assert!(!repo.exists_by_id(42).await.unwrap());
        assert!(repo.find_by_id(42).await.unwrap().is_none());
    }
}
