use serde::{Deserialize, Serialize};

/// Server-assigned, opaque employee identifier. Never minted client-side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EmployeeId(pub String);

impl EmployeeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn label(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }
}

/// A persisted employee row as returned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub occupation: String,
    pub phone: String,
    pub mail: String,
}

/// Everything except the id: the insert/update payload and the form's
/// validated output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeDraft {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub occupation: String,
    pub phone: String,
    pub mail: String,
}

impl Employee {
    /// Splits a persisted row into its identifier and the editable remainder.
    pub fn into_parts(self) -> (EmployeeId, EmployeeDraft) {
        (
            self.id,
            EmployeeDraft {
                name: self.name,
                age: self.age,
                gender: self.gender,
                occupation: self.occupation,
                phone: self.phone,
                mail: self.mail,
            },
        )
    }
}
