use url::Url;

use crate::error::MonitorError;

/// Longest accepted endpoint name, in characters
pub const MAX_NAME_LENGTH: usize = 100;

/// Validation results with specific error messages
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self { is_valid: true, error: None }
    }

    pub fn err(msg: impl Into<String>) -> Self {
        Self { is_valid: false, error: Some(msg.into()) }
    }

    pub fn into_result(self) -> Result<(), MonitorError> {
        if self.is_valid {
            Ok(())
        } else {
            Err(MonitorError::validation(
                self.error.unwrap_or_else(|| "Validation failed".to_string()),
            ))
        }
    }
}

/// Validate endpoint display name
pub fn validate_endpoint_name(name: &str) -> ValidationResult {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return ValidationResult::err("Name is required");
    }

    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return ValidationResult::err(format!("Name too long (max {MAX_NAME_LENGTH} characters)"));
    }

    ValidationResult::ok()
}

/// Validate HTTP/HTTPS target URL
pub fn validate_endpoint_url(target: &str) -> ValidationResult {
    let target = target.trim();
    if target.is_empty() {
        return ValidationResult::err("URL is required");
    }

    match Url::parse(target) {
        Ok(url) => {
            let scheme = url.scheme();
            if scheme != "http" && scheme != "https" {
                return ValidationResult::err(format!(
                    "Invalid scheme '{scheme}'. Must be http or https"
                ));
            }

            if url.host_str().is_none_or(str::is_empty) {
                return ValidationResult::err("URL must have a valid host");
            }

            ValidationResult::ok()
        }
        Err(e) => {
            if !target.contains("://") {
                ValidationResult::err("URL must include scheme (http:// or https://)")
            } else {
                ValidationResult::err(format!("Invalid URL: {e}"))
            }
        }
    }
}

/// Validate the status code a healthy endpoint answers with
pub fn validate_expected_status(status: u16) -> ValidationResult {
    if !(100..=599).contains(&status) {
        return ValidationResult::err(format!(
            "Expected status {status} is not a valid HTTP status code"
        ));
    }

    ValidationResult::ok()
}

/// Validate sweep interval
pub fn validate_interval(interval: u64) -> ValidationResult {
    if interval == 0 {
        return ValidationResult::err("Interval must be at least 1 second");
    }

    if interval > 86400 {
        return ValidationResult::err("Interval too long (max 24 hours)");
    }

    ValidationResult::ok()
}

/// Validate probe timeout
pub fn validate_timeout(timeout: u64, interval: u64) -> ValidationResult {
    if timeout == 0 {
        return ValidationResult::err("Timeout must be at least 1 second");
    }

    if timeout >= interval {
        return ValidationResult::err("Timeout must be less than interval");
    }

    ValidationResult::ok()
}

/// Validate per-endpoint history size
pub fn validate_history_capacity(capacity: usize) -> ValidationResult {
    if capacity == 0 {
        return ValidationResult::err("History capacity must be at least 1");
    }

    ValidationResult::ok()
}
