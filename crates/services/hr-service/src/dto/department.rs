use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use domain::{DepartmentFilter, DEFAULT_LIST_LIMIT, MAX_LIST_OFFSET};

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateDepartmentRequest {
    #[validate(length(min = 4, max = 33, message = "Name must be 4-33 characters"))]
    #[schema(example = "Engineering")]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateDepartmentRequest {
    #[validate(length(min = 4, max = 33, message = "Name must be 4-33 characters"))]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DepartmentListParams {
    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    pub limit: Option<u64>,
    #[validate(range(max = MAX_LIST_OFFSET, message = "offset must be at most 1000000000"))]
    pub offset: Option<u64>,
    /// Case-insensitive substring of the department name
    pub name: Option<String>,
}

impl From<DepartmentListParams> for DepartmentFilter {
    fn from(params: DepartmentListParams) -> Self {
        Self {
            name: params.name,
            limit: params.limit.unwrap_or(DEFAULT_LIST_LIMIT),
            offset: params.offset.unwrap_or(0),
        }
    }
}
