use serde::{Deserialize, Serialize};

pub const TABLE: &str = "public.student";
pub const COLUMNS: &str = "id, name, email, phone, address";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Student {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl Student {
    /// Copies the descriptive fields from `other`, keeping our own id.
    pub fn merge_from(&mut self, other: Self) {
        let Self {
            id: _,
            name,
            email,
            phone,
            address,
        } = other;

        self.name = name;
        self.email = email;
        self.phone = phone;
        self.address = address;
    }
}

/// A row of [`TABLE`], where the id is always populated.
#[derive(sqlx::FromRow, Debug)]
pub struct StudentRow {
    pub id: i64,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl From<StudentRow> for Student {
    fn from(row: StudentRow) -> Self {
        let StudentRow {
            id,
            name,
            email,
            phone,
            address,
        } = row;

        Self {
            id: Some(id),
            name,
            email,
            phone,
            address,
        }
    }
}
