//! 电话号码校验与规范化
//!
//! 解析和校验完全交给 `phonenumber`，这里只负责固定地区和输出格式。

use phonenumber::{Mode, country};

/// 号码所属地区
pub const PHONE_REGION: country::Id = country::Id::PT;

/// 校验电话号码并返回国内格式的规范化字符串
///
/// 以下情况返回 `None`：
/// - 输入中含有字母
/// - 不是可能的号码（长度或前缀不合理）
/// - 无法按地区解析
/// - 带国际区号但不属于本地区
/// - 不是有效号码
///
/// 输出格式与输入格式无关，例如 `"912345678"` 会变成 `"912 345 678"`。
pub fn validate_phone_number(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() || input.chars().any(char::is_alphabetic) {
        return None;
    }

    if !phonenumber::is_viable(input) {
        return None;
    }

    let number = phonenumber::parse(Some(PHONE_REGION), input).ok()?;
    // 国内格式会丢掉区号，外地号码输出后无法再次通过校验
    if number.country().id() != Some(PHONE_REGION) {
        return None;
    }
    if !phonenumber::is_valid(&number) {
        return None;
    }

    Some(number.format().mode(Mode::National).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_are_rejected() {
        assert_eq!(validate_phone_number("91234567a"), None);
        assert_eq!(validate_phone_number("call 912345678"), None);
        assert_eq!(validate_phone_number("abc"), None);
    }

    #[test]
    fn test_portuguese_mobile_is_formatted() {
        assert_eq!(
            validate_phone_number("912345678").as_deref(),
            Some("912 345 678")
        );
    }

    #[test]
    fn test_international_prefix_is_normalized() {
        assert_eq!(
            validate_phone_number("+351 912 345 678").as_deref(),
            Some("912 345 678")
        );
    }

    #[test]
    fn test_validation_is_idempotent() {
        let first = validate_phone_number("912345678").expect("valid number");
        let second = validate_phone_number(&first).expect("still valid");
        assert_eq!(first, second);
    }

    #[test]
    fn test_foreign_numbers_are_rejected() {
        assert_eq!(validate_phone_number("+44 20 7946 0958"), None);
        assert_eq!(validate_phone_number("+34 612 345 678"), None);
        assert_eq!(
            validate_phone_number("00351 912 345 678").as_deref(),
            Some("912 345 678")
        );
    }

    #[test]
    fn test_impossible_and_invalid_numbers() {
        assert_eq!(validate_phone_number(""), None);
        assert_eq!(validate_phone_number("12"), None);
        assert_eq!(validate_phone_number("000000000"), None);
    }
}
