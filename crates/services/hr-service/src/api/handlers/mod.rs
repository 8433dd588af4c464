//! HTTP handlers.

pub mod auth_handler;
pub mod department_handler;
pub mod employee_handler;
pub mod file_handler;
pub mod health_handler;
pub mod profile_handler;
pub mod user_handler;

pub use auth_handler::auth_routes;
pub use department_handler::department_routes;
pub use employee_handler::employee_routes;
pub use file_handler::file_routes;
pub use health_handler::health_routes;
pub use profile_handler::profile_routes;
pub use user_handler::user_routes;
