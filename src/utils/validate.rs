use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::classes::entities::{ClassType, Location};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    // 邮箱格式校验：必须包含 @ 和 .
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 必填字段校验，返回去掉首尾空白后的值
pub fn require_field<'a>(value: &'a str, field: &str) -> Result<&'a str, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(format!("{field} is required"))
    } else {
        Ok(trimmed)
    }
}

pub fn validate_location(location: &str) -> Result<(), String> {
    location.parse::<Location>().map(|_| ()).map_err(|_| {
        format!(
            "Invalid location: {location}. Supported: {}",
            Location::all().join(", ")
        )
    })
}

pub fn validate_class_type(class_type: &str) -> Result<(), String> {
    class_type.parse::<ClassType>().map(|_| ()).map_err(|_| {
        format!(
            "Invalid class type: {class_type}. Supported: {}",
            ClassType::all().join(", ")
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("ana@x.com").is_ok());
        assert!(validate_email("ana.silva+pt@school.pt").is_ok());
        assert!(validate_email("ana@x").is_err());
        assert!(validate_email("not-an-email").is_err());
    }

    #[test]
    fn test_require_field() {
        assert_eq!(require_field("  Ana ", "name"), Ok("Ana"));
        assert_eq!(
            require_field("   ", "name"),
            Err("name is required".to_string())
        );
    }

    #[test]
    fn test_known_options() {
        assert!(validate_location("Sintra").is_ok());
        assert!(validate_location("Faro").is_err());
        assert!(validate_class_type("Advanced").is_ok());
        assert!(validate_class_type("Basic").is_err());
    }
}
