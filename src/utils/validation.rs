use crate::utils::error::{BookingError, Result};
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

#[allow(clippy::expect_used)] // static pattern, checked by the tests below
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static email regex should compile")
});

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: impl ToString, reason: impl Into<String>) -> BookingError {
    BookingError::InvalidValue {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(invalid(field_name, url_str, "URL cannot be empty"));
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(invalid(
                field_name,
                url_str,
                format!("Unsupported URL scheme: {}", scheme),
            )),
        },
        Err(e) => Err(invalid(
            field_name,
            url_str,
            format!("Invalid URL format: {}", e),
        )),
    }
}

/// Endpoint paths are joined onto the base URL, so they must be absolute.
pub fn validate_url_path(field_name: &str, path: &str) -> Result<()> {
    if !path.starts_with('/') {
        return Err(invalid(field_name, path, "Path must start with '/'"));
    }
    if path.contains(char::is_whitespace) {
        return Err(invalid(field_name, path, "Path cannot contain whitespace"));
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

pub fn validate_email(field_name: &str, value: &str) -> Result<()> {
    validate_non_empty_string(field_name, value)?;
    if !EMAIL_REGEX.is_match(value.trim()) {
        return Err(invalid(field_name, value, "Value is not a valid email address"));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(invalid(
            field_name,
            value,
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(invalid(
            field_name,
            value,
            format!("Value must be one of: {}", allowed.join(", ")),
        ));
    }
    Ok(())
}
