use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

static TELEPHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^1[3-9]\d{9}$").expect("Invalid telephone regex"));

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 大陆手机号：1 开头、第二位 3-9 的 11 位数字
pub fn validate_telephone(telephone: &str) -> Result<(), &'static str> {
    if !TELEPHONE_RE.is_match(telephone) {
        return Err("Telephone must be a valid 11-digit mobile number");
    }
    Ok(())
}

/// 验证密码强度
///
/// 要求至少 8 位，且同时包含大写字母、小写字母和数字；
/// 命中常见弱密码表时直接拒绝。
pub fn validate_password(password: &str) -> Result<(), String> {
    let mut errors: Vec<&str> = Vec::new();

    if password.len() < 8 {
        errors.push("Password must be at least 8 characters long");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one digit");
    }

    const WEAK_PASSWORDS: [&str; 9] = [
        "password",
        "12345678",
        "123456789",
        "qwerty123",
        "admin123",
        "password1",
        "Password1",
        "Qwerty123",
        "Abcd1234",
    ];
    if WEAK_PASSWORDS
        .iter()
        .any(|&weak| password.eq_ignore_ascii_case(weak))
    {
        errors.push("Password is too common, please choose a stronger password");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_password() {
        assert!(validate_password("SecureP@ss1").is_ok());
        assert!(validate_password("MyP@ssw0rd").is_ok());
        assert!(validate_password("SecurePass123").is_ok());
    }

    #[test]
    fn test_short_password_lists_all_problems() {
        let err = validate_password("Ab1").unwrap_err();
        assert!(err.contains("at least 8 characters"));
    }

    #[test]
    fn test_password_requires_mixed_case_and_digit() {
        assert!(validate_password("abcd1234").is_err());
        assert!(validate_password("ABCD1234").is_err());
        assert!(validate_password("AbcdEfgh").is_err());
    }

    #[test]
    fn test_common_password_rejected() {
        let err = validate_password("Password1").unwrap_err();
        assert!(err.contains("too common"));
        // 大小写变体也在弱密码表内
        assert!(validate_password("PASSWORD1").is_err());
    }

    #[test]
    fn test_telephone() {
        assert!(validate_telephone("13812345678").is_ok());
        assert!(validate_telephone("19912345678").is_ok());
        assert!(validate_telephone("12345678901").is_err());
        assert!(validate_telephone("138123").is_err());
        assert!(validate_telephone("1381234567a").is_err());
    }

    #[test]
    fn test_email() {
        assert!(validate_email("teacher@example.com").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("missing@tld").is_err());
    }
}
