//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Roles
// =============================================================================

/// Display name of the highest privilege role
pub const ROLE_SUPERADMIN: &str = "Superadmin";

/// Display name of the lead administrator role
pub const ROLE_LEAD_ADMIN: &str = "Lead Admin";

/// Display name of the administrator role
pub const ROLE_ADMIN: &str = "Admin";

/// Display name of the default role assigned on registration
pub const ROLE_USER: &str = "User";

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 8;

// =============================================================================
// Pagination
// =============================================================================

/// Default page size for account listings
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// First page number (pages are 1-based)
pub const DEFAULT_PAGE: u64 = 1;

/// Default limit for department and employee listings
pub const DEFAULT_LIST_LIMIT: u64 = 5;

/// Highest accepted page number for account listings
pub const MAX_PAGE: u64 = 10_000_000;

/// Highest accepted offset for department and employee listings
pub const MAX_LIST_OFFSET: u64 = 1_000_000_000;

/// Postgres binds OFFSET as a signed 64-bit integer
pub const MAX_QUERY_OFFSET: u64 = i64::MAX as u64;

// =============================================================================
// Authentication
// =============================================================================

/// Default JWT token expiration in hours
pub const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 24;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Seconds per hour (for token expiration calculation)
pub const SECONDS_PER_HOUR: i64 = 3600;

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

/// JWT token type identifier
pub const TOKEN_TYPE_BEARER: &str = "Bearer";

/// Default `iss` claim
pub const DEFAULT_JWT_ISSUER: &str = "hr-service";

/// Default `aud` claim
pub const DEFAULT_JWT_AUDIENCE: &str = "hr-service-api";

/// Header carrying the static API key outside development
pub const API_KEY_HEADER: &str = "x-api-key";

// =============================================================================
// File upload
// =============================================================================

/// Largest accepted upload (100 KiB)
pub const MAX_UPLOAD_BYTES: usize = 100 * 1024;

/// Request body cap for uploads: one file plus multipart framing
pub const MAX_UPLOAD_BODY_BYTES: usize = MAX_UPLOAD_BYTES + 16 * 1024;

/// Extensions accepted by the upload endpoint (lowercase)
pub const ALLOWED_UPLOAD_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Content type used when the client sends none
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Check if a file name carries an accepted image extension
pub fn has_allowed_extension(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ALLOWED_UPLOAD_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_extensions() {
        assert!(has_allowed_extension("photo.jpg"));
        assert!(has_allowed_extension("photo.JPEG"));
        assert!(has_allowed_extension("archive.tar.png"));
        assert!(!has_allowed_extension("photo.gif"));
        assert!(!has_allowed_extension("photo"));
    }
}
