use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::rules::{gender, image_uri};
use common::{AppError, AppResult};
use domain::{
    EmployeeChanges, EmployeeFilter, Gender, NewEmployee, DEFAULT_LIST_LIMIT, MAX_LIST_OFFSET,
};

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeRequest {
    #[validate(length(min = 5, max = 33, message = "identityNumber must be 5-33 characters"))]
    #[schema(example = "EMP-0001")]
    pub identity_number: String,
    #[validate(length(min = 4, max = 33, message = "name must be 4-33 characters"))]
    #[schema(example = "Budi Santoso")]
    pub name: String,
    #[validate(custom(function = "image_uri"))]
    #[schema(example = "https://cdn.example.com/budi.png")]
    pub employee_image_uri: String,
    #[validate(custom(function = "gender"))]
    #[schema(example = "male")]
    pub gender: String,
    #[validate(length(min = 1, message = "departmentId is required"))]
    #[schema(example = "1")]
    pub department_id: String,
}

impl CreateEmployeeRequest {
    pub fn into_new_employee(self) -> AppResult<NewEmployee> {
        Ok(NewEmployee {
            identity_number: self.identity_number,
            name: self.name,
            employee_image_uri: self.employee_image_uri,
            gender: self.gender.parse()?,
            department_id: parse_department_id(&self.department_id)?,
        })
    }
}

/// Partial update: absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeRequest {
    #[validate(length(min = 5, max = 33, message = "identityNumber must be 5-33 characters"))]
    pub identity_number: Option<String>,
    #[validate(length(min = 4, max = 33, message = "name must be 4-33 characters"))]
    pub name: Option<String>,
    #[validate(custom(function = "image_uri"))]
    pub employee_image_uri: Option<String>,
    #[validate(custom(function = "super::rules::gender"))]
    pub gender: Option<String>,
    pub department_id: Option<String>,
}

impl UpdateEmployeeRequest {
    pub fn into_changes(self) -> AppResult<EmployeeChanges> {
        Ok(EmployeeChanges {
            identity_number: self.identity_number,
            name: self.name,
            employee_image_uri: self.employee_image_uri,
            gender: self.gender.as_deref().map(str::parse::<Gender>).transpose()?,
            department_id: self
                .department_id
                .as_deref()
                .map(parse_department_id)
                .transpose()?,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct EmployeeListParams {
    /// Prefix of the identity number
    pub identity_number: Option<String>,
    /// Case-insensitive substring of the name
    pub name: Option<String>,
    #[validate(custom(function = "super::rules::gender"))]
    pub gender: Option<String>,
    pub department_id: Option<String>,
    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    pub limit: Option<u64>,
    #[validate(range(max = MAX_LIST_OFFSET, message = "offset must be at most 1000000000"))]
    pub offset: Option<u64>,
}

impl EmployeeListParams {
    pub fn into_filter(self) -> AppResult<EmployeeFilter> {
        Ok(EmployeeFilter {
            identity_number: self.identity_number,
            name: self.name,
            gender: self.gender.as_deref().map(str::parse::<Gender>).transpose()?,
            department_id: self
                .department_id
                .as_deref()
                .filter(|id| !id.is_empty())
                .map(parse_department_id)
                .transpose()?,
            limit: self.limit.unwrap_or(DEFAULT_LIST_LIMIT),
            offset: self.offset.unwrap_or(0),
        })
    }
}

fn parse_department_id(raw: &str) -> AppResult<i32> {
    raw.trim()
        .parse::<i32>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::field("departmentId", "departmentId must be a department id"))
}
