use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use super::rules::{image_uri, printable_ascii};
use domain::ProfileChanges;

/// Partial update of the caller's profile: absent fields keep their value.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "manager@example.com")]
    pub email: Option<String>,
    #[validate(
        length(min = 3, max = 100, message = "Name must be 3-100 characters"),
        custom(function = "printable_ascii")
    )]
    pub name: Option<String>,
    #[validate(custom(function = "image_uri"))]
    #[schema(example = "https://cdn.example.com/me.png")]
    pub user_image_uri: Option<String>,
    #[validate(
        length(min = 4, max = 52, message = "companyName must be 4-52 characters"),
        custom(function = "printable_ascii")
    )]
    #[schema(example = "Acme Corp")]
    pub company_name: Option<String>,
    #[validate(custom(function = "image_uri"))]
    pub company_image_uri: Option<String>,
}

impl From<UpdateProfileRequest> for ProfileChanges {
    fn from(request: UpdateProfileRequest) -> Self {
        Self {
            name: request.name,
            email: request.email,
            user_image_uri: request.user_image_uri,
            company_name: request.company_name,
            company_image_uri: request.company_image_uri,
        }
    }
}
