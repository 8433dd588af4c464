//! Employee domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Gender {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            other => Err(DomainError::validation(
                "gender",
                format!("gender must be 'male' or 'female', got '{}'", other),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i32,
    pub identity_number: String,
    pub name: String,
    pub employee_image_uri: String,
    pub gender: Gender,
    pub department_id: i32,
    pub created_at: DateTime<Utc>,
}

impl Employee {
    /// Apply a partial update; absent fields keep their current value.
    pub fn apply(&mut self, changes: EmployeeChanges) {
        if let Some(identity_number) = changes.identity_number {
            self.identity_number = identity_number;
        }
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(uri) = changes.employee_image_uri {
            self.employee_image_uri = uri;
        }
        if let Some(gender) = changes.gender {
            self.gender = gender;
        }
        if let Some(department_id) = changes.department_id {
            self.department_id = department_id;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub identity_number: String,
    pub name: String,
    pub employee_image_uri: String,
    pub gender: Gender,
    pub department_id: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeChanges {
    pub identity_number: Option<String>,
    pub name: Option<String>,
    pub employee_image_uri: Option<String>,
    pub gender: Option<Gender>,
    pub department_id: Option<i32>,
}

/// Employee as returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct EmployeeResponse {
    pub identity_number: String,
    pub name: String,
    pub employee_image_uri: String,
    pub gender: Gender,
    pub department_id: String,
}

impl From<Employee> for EmployeeResponse {
    fn from(employee: Employee) -> Self {
        Self {
            identity_number: employee.identity_number,
            name: employee.name,
            employee_image_uri: employee.employee_image_uri,
            gender: employee.gender,
            department_id: employee.department_id.to_string(),
        }
    }
}
