use once_cell::sync::Lazy;
use regex::Regex;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.-]+$").expect("Invalid username regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9]{7,15}$").expect("Invalid phone regex"));

static NATIONAL_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]{4,20}$").expect("Invalid national id regex"));

pub fn validate_username(username: &str) -> Result<(), &'static str> {
    if username.len() < 3 || username.len() > 32 {
        return Err("Username length must be between 3 and 32 characters");
    }
    if !USERNAME_RE.is_match(username) {
        return Err("Username must contain only letters, numbers, dots, underscores or hyphens");
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 手机号：7-15 位数字，可带 `+` 前缀
pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    if !PHONE_RE.is_match(phone) {
        return Err("Phone number must be 7 to 15 digits, optionally prefixed with +");
    }
    Ok(())
}

pub fn validate_national_id(national_id: &str) -> Result<(), &'static str> {
    if !NATIONAL_ID_RE.is_match(national_id) {
        return Err("National ID must be 4 to 20 letters or digits");
    }
    Ok(())
}

/// 必填字符串：去掉首尾空白后不能为空
pub fn require_non_blank(value: &str, field: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} is required"));
    }
    Ok(())
}

/// 密码策略验证结果
#[derive(Debug, Clone)]
pub struct PasswordValidationResult {
    pub is_valid: bool,
    pub errors: Vec<&'static str>,
}

impl PasswordValidationResult {
    pub fn error_message(&self) -> String {
        self.errors.join("; ")
    }
}

/// 用户自设密码的策略：至少 8 位，含大小写字母与数字，不在弱密码表中
///
/// 系统生成的默认密码（如 `Abebe#123`）不经过此校验。
pub fn validate_password(password: &str) -> PasswordValidationResult {
    let mut errors = Vec::new();

    if password.chars().count() < 8 {
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

    const WEAK: [&str; 7] = [
        "password1",
        "qwerty123",
        "admin1234",
        "abcd1234",
        "school123",
        "student123",
        "teacher123",
    ];
    if WEAK.iter().any(|weak| password.eq_ignore_ascii_case(weak)) {
        errors.push("Password is too common, please choose a stronger password");
    }

    PasswordValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

pub fn validate_password_simple(password: &str) -> Result<(), String> {
    let result = validate_password(password);
    if result.is_valid {
        Ok(())
    } else {
        Err(result.error_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usernames() {
        assert!(validate_username("abebe0001").is_ok());
        assert!(validate_username("t.kebede").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username("abebe kebede").is_err());
    }

    #[test]
    fn test_emails() {
        assert!(validate_email("record.office@school.et").is_ok());
        assert!(validate_email("no-at-sign.et").is_err());
    }

    #[test]
    fn test_phones() {
        assert!(validate_phone("0911223344").is_ok());
        assert!(validate_phone("+251911223344").is_ok());
        assert!(validate_phone("12-34").is_err());
    }

    #[test]
    fn test_national_ids() {
        assert!(validate_national_id("ET12345678").is_ok());
        assert!(validate_national_id("12").is_err());
        assert!(validate_national_id("12 34 56").is_err());
    }

    #[test]
    fn test_blank_fields() {
        assert!(require_non_blank("Grade 10", "class_section").is_ok());
        assert_eq!(
            require_non_blank("   ", "admission_no").unwrap_err(),
            "admission_no is required"
        );
    }

    #[test]
    fn test_password_policy() {
        assert!(validate_password("SecurePass123").is_valid);

        let short = validate_password("Ab1");
        assert!(short.errors.contains(&"Password must be at least 8 characters long"));

        let no_upper = validate_password("abcd12345");
        assert!(
            no_upper
                .errors
                .contains(&"Password must contain at least one uppercase letter")
        );

        let weak = validate_password("School123");
        assert!(
            weak.errors
                .contains(&"Password is too common, please choose a stronger password")
        );
    }
}
