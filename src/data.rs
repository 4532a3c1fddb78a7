use crate::error::RosterResult;
use async_trait::async_trait;

pub mod memory;
pub mod postgres;
pub mod student;

pub use memory::InMemoryStudentRepository;
pub use postgres::PostgresStudentRepository;
pub use student::Student;

/// Persistence for [`Student`]s, keyed by the storage-assigned id.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Inserts when `student.id` is `None`, otherwise overwrites the record with that id.
    async fn save(&self, student: Student) -> RosterResult<Student>;
    async fn find_by_id(&self, id: i64) -> RosterResult<Option<Student>>;
    async fn find_all(&self) -> RosterResult<Vec<Student>>;
    async fn exists_by_id(&self, id: i64) -> RosterResult<bool>;
    /// Does nothing when no record has `id`.
    async fn delete_by_id(&self, id: i64) -> RosterResult<()>;
}
