mod api_key;
mod auth;
mod security_headers;

pub use api_key::api_key_middleware;
pub use auth::{auth_middleware, require_role, CurrentUser};
pub use security_headers::security_headers;
