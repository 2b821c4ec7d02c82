use crate::utils::error::{ImportError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field: &str, value: impl ToString, reason: impl Into<String>) -> ImportError {
    ImportError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// Parse a customer repository endpoint. Only `http`/`https` URLs with a host
/// can receive customers.
pub fn endpoint_url(field: &str, value: &str) -> Result<Url> {
    if value.trim().is_empty() {
        return Err(invalid(field, value, "Endpoint cannot be empty"));
    }

    let url = Url::parse(value).map_err(|e| invalid(field, value, format!("Invalid URL format: {}", e)))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => return Err(invalid(field, value, format!("Unsupported URL scheme: {}", scheme))),
    }

    if url.host_str().is_none() {
        return Err(invalid(field, value, "Endpoint has no host"));
    }

    Ok(url)
}

/// The application root must name some directory; it does not have to exist yet
/// when the configuration is checked.
pub fn root_dir(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(invalid(field, value, "Root directory cannot be empty"));
    }
    if value.contains('\0') {
        return Err(invalid(field, value.escape_default(), "Root directory contains null bytes"));
    }
    Ok(())
}

pub fn at_least(field: &str, value: u64, min: u64) -> Result<()> {
    if value < min {
        return Err(invalid(field, value, format!("Value must be at least {}", min)));
    }
    Ok(())
}

/// Settings the REST repository cannot run without.
pub fn required<'a, T>(field: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| ImportError::MissingConfigError {
        field: field.to_string(),
    })
}

pub fn not_blank(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field, value, "Value cannot be empty or whitespace-only"));
    }
    Ok(())
}
