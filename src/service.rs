use crate::{
    data::{Student, StudentRepository},
    error::{MissingStudentSnafu, RosterResult},
};
use snafu::OptionExt;
use std::sync::Arc;

/// Business rules over a [`StudentRepository`]: existence checks and field merging.
#[derive(Clone)]
pub struct StudentService {
    repo: Arc<dyn StudentRepository>,
}

impl StudentService {
    pub fn new(repo: Arc<dyn StudentRepository>) -> Self {
        Self { repo }
    }

    /// Stores a new student, discarding any client-supplied id.
    pub async fn add_student(&self, mut student: Student) -> RosterResult<Student> {
        student.id = None;
        let saved = self.repo.save(student).await?;
        info!(id = ?saved.id, "Added student");
        Ok(saved)
    }

    pub async fn get_student_by_id(&self, id: i64) -> RosterResult<Student> {
        self.repo
            .find_by_id(id)
            .await?
            .context(MissingStudentSnafu { id })
    }

    /// Copies name, email, phone and address onto the stored record. The id never changes.
    pub async fn update_student(&self, id: i64, student: Student) -> RosterResult<Student> {
        let mut existing = self.get_student_by_id(id).await?;
        existing.merge_from(student);

        let saved = self.repo.save(existing).await?;
        info!(id, "Updated student");
        Ok(saved)
    }

    pub async fn get_all_students(&self) -> RosterResult<Vec<Student>> {
        self.repo.find_all().await
    }

    pub async fn delete_student(&self, id: i64) -> RosterResult<()> {
        if !self.repo.exists_by_id(id).await? {
            return MissingStudentSnafu { id }.fail();
        }

        self.repo.delete_by_id(id).await?;
        info!(id, "Deleted student");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{data::InMemoryStudentRepository, error::RosterError};

    fn service() -> (StudentService, Arc<InMemoryStudentRepository>) {
        let repo = Arc::new(InMemoryStudentRepository::new());
        (StudentService::new(repo.clone()), repo)
    }

    fn student(name: &str, email: &str, phone: &str, address: &str) -> Student {
        Student {
            id: None,
            name: Some(name.into()),
            email: Some(email.into()),
            phone: Some(phone.into()),
            address: Some(address.into()),
        }
    }

    #[tokio::test]
    async fn add_ignores_client_id() {
        let (service, _) = service();
        let input = Student {
            id: Some(1234),
            ..student("Bob", "b@x.com", "123", "Somewhere")
        };

        let added = service.add_student(input.clone()).await.unwrap();

        assert_eq!(added.id, Some(1));
        assert_eq!(
            added,
            Student {
                id: Some(1),
                ..input
            }
        );
    }

    #[tokio::test]
    async fn unknown_ids_are_missing() {
        let (service, _) = service();

        assert!(matches!(
            service.get_student_by_id(9).await,
            Err(RosterError::MissingStudent { id: 9 })
        ));
        assert!(matches!(
            service.update_student(9, Student::default()).await,
            Err(RosterError::MissingStudent { id: 9 })
        ));
        assert!(matches!(
            service.delete_student(9).await,
            Err(RosterError::MissingStudent { id: 9 })
        ));
    }

    #[tokio::test]
    async fn update_is_a_field_merge() {
        let (service, _) = service();
        let added = service
            .add_student(student("Old", "old@x.com", "000", "Old Rd"))
            .await
            .unwrap();
        let id = added.id.unwrap();

        let updated = service
            .update_student(
                id,
                Student {
                    id: Some(77),
                    ..student("A", "B", "C", "D")
                },
            )
            .await
            .unwrap();

        assert_eq!(updated, Student {
            id: Some(id),
            ..student("A", "B", "C", "D")
        });
        assert_eq!(service.get_student_by_id(id).await.unwrap(), updated);
        assert_eq!(service.get_all_students().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn delete_then_delete_again_fails() {
        let (service, repo) = service();
        let id = service
            .add_student(student("Gone", "g@x.com", "1", "x"))
            .await
            .unwrap()
            .id
            .unwrap();

        service.delete_student(id).await.unwrap();

        assert!(!repo.exists_by_id(id).await.unwrap());
        assert!(matches!(
            service.delete_student(id).await,
            Err(RosterError::MissingStudent { .. })
        ));
    }

    #[tokio::test]
    async fn list_is_exactly_the_live_records() {
        let (service, _) = service();
        let mut kept = Vec::new();
        for name in ["a", "b", "c", "d"] {
            kept.push(service.add_student(student(name, "", "", "")).await.unwrap());
        }
        let removed = kept.remove(1);
        service.delete_student(removed.id.unwrap()).await.unwrap();

        let mut all = service.get_all_students().await.unwrap();
        all.sort_by_key(|s| s.id);
        assert_eq!(all, kept);
    }

    #[tokio::test]
    async fn alice_lifecycle() {
        let (service, _) = service();

        let added = service
            .add_student(student("Alice", "a@x.com", "555", "1 Main St"))
            .await
            .unwrap();
        assert_eq!(added.id, Some(1));
        assert_eq!(added.name.as_deref(), Some("Alice"));
        assert_eq!(added.address.as_deref(), Some("1 Main St"));

        assert_eq!(service.get_student_by_id(1).await.unwrap(), added);

        let updated = service
            .update_student(1, student("Alicia", "a@x.com", "555", "2 Oak St"))
            .await
            .unwrap();
        assert_eq!(updated.id, Some(1));
        assert_eq!(updated.name.as_deref(), Some("Alicia"));
        assert_eq!(updated.address.as_deref(), Some("2 Oak St"));

        service.delete_student(1).await.unwrap();
        assert!(matches!(
            service.get_student_by_id(1).await,
            Err(RosterError::MissingStudent { id: 1 })
        ));
    }
}
