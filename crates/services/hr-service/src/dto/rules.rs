//! Custom validator functions shared by request types.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;
use validator::ValidationError;

use domain::{AccountSortField, Gender, SortOrder};

static PRINTABLE_ASCII: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\x20-\x7E]*$").expect("printable ASCII pattern is valid"));

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

pub(crate) fn printable_ascii(value: &str) -> Result<(), ValidationError> {
    if PRINTABLE_ASCII.is_match(value) {
        Ok(())
    } else {
        Err(invalid("ascii", "Must contain only printable ASCII characters"))
    }
}

pub(crate) fn sortable_field(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<AccountSortField>()
        .map(|_| ())
        .map_err(|_| invalid("sort_by", "sort_by must be one of created_at, updated_at, name, email, id"))
}

pub(crate) fn sort_order(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<SortOrder>()
        .map(|_| ())
        .map_err(|_| invalid("order", "order must be 'asc' or 'desc'"))
}

pub(crate) fn gender(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<Gender>()
        .map(|_| ())
        .map_err(|_| invalid("gender", "gender must be 'male' or 'female'"))
}

/// Absolute http(s) URL whose host contains at least one dot.
pub(crate) fn image_uri(value: &str) -> Result<(), ValidationError> {
    let url = Url::parse(value).map_err(|_| invalid("url", "Must be a valid URL"))?;
    let host_ok = url.host_str().is_some_and(|host| {
        host.contains('.') && !host.starts_with('.') && !host.ends_with('.')
    });

    if matches!(url.scheme(), "http" | "https") && host_ok {
        Ok(())
    } else {
        Err(invalid("url", "Must be a valid URL"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_printable_ascii() {
        assert!(printable_ascii("Alice Doe ~!").is_ok());
        assert!(printable_ascii("tab\there").is_err());
        assert!(printable_ascii("Zoë").is_err());
    }

    #[test]
    fn test_image_uri() {
        assert!(image_uri("https://cdn.example.com/a.png").is_ok());
        assert!(image_uri("http://localhost/a.png").is_err());
        assert!(image_uri("ftp://files.example.com/a.png").is_err());
        assert!(image_uri("not a url").is_err());
    }

    #[test]
    fn test_sort_rules() {
        assert!(sortable_field("updated_at").is_ok());
        assert!(sortable_field("password").is_err());
        assert!(sort_order("asc").is_ok());
        assert!(sort_order("ASC").is_err());
    }
}
