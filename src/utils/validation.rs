use crate::utils::error::{GreensError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(GreensError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(GreensError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(GreensError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(GreensError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(GreensError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(GreensError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| GreensError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(GreensError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
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
        return Err(GreensError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Segment ids are the numeric ids Strava assigns.
pub fn validate_segment_ids(field_name: &str, ids: &[String]) -> Result<()> {
    if ids.is_empty() {
        return Err(GreensError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: String::new(),
            reason: "At least one segment id is required".to_string(),
        });
    }

    for id in ids {
        if id.is_empty() || !id.chars().all(|c| c.is_ascii_digit()) {
            return Err(GreensError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: id.clone(),
                reason: "Segment ids must be numeric".to_string(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("api_base", "https://www.strava.com/api/v3").is_ok());
        assert!(validate_url("api_base", "http://localhost:8080").is_ok());
        assert!(validate_url("api_base", "").is_err());
        assert!(validate_url("api_base", "invalid-url").is_err());
        assert!(validate_url("api_base", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("concurrent_requests", 4, 1).is_ok());
        assert!(validate_positive_number("concurrent_requests", 0, 1).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("page_size", 200, 1, 200).is_ok());
        assert!(validate_range("page_size", 201, 1, 200).is_err());
        assert!(validate_range("page_size", 0, 1, 200).is_err());
    }

    #[test]
    fn test_validate_segment_ids() {
        let ids = vec!["30545810".to_string(), "7492562".to_string()];
        assert!(validate_segment_ids("segments", &ids).is_ok());
        assert!(validate_segment_ids("segments", &[]).is_err());

        let bad = vec!["30545810".to_string(), "green-4".to_string()];
        assert!(validate_segment_ids("segments", &bad).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let token = Some("abc".to_string());
        assert_eq!(validate_required_field("access_token", &token).unwrap(), "abc");

        let missing: Option<String> = None;
        let err = validate_required_field("access_token", &missing).unwrap_err();
        assert!(matches!(err, GreensError::MissingConfigError { .. }));
    }

    #[test]
    fn test_validate_path_and_strings() {
        assert!(validate_path("effort_log", "efforts.csv").is_ok());
        assert!(validate_path("effort_log", "").is_err());
        assert!(validate_non_empty_string("access_token", "   ").is_err());
    }
}
