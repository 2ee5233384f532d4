//! 账号派生规则：顺序编号、用户名、默认密码
//!
//! 这里只放纯函数，查重所需的已有用户名由调用方从存储层取出后传入。

use rand::Rng;
use std::collections::HashSet;

/// 学生编号前缀
pub const STUDENT_ID_PREFIX: &str = "STUD";
/// 职员编号前缀
pub const STAFF_ID_PREFIX: &str = "STF";
/// 教师工号前缀
pub const TEACHER_ID_PREFIX: &str = "T";

/// 根据最近一个编号生成下一个编号
///
/// 去掉前缀后剩余部分全为数字则加一，否则从 1 开始；数字部分至少补齐 4 位。
pub fn next_sequential_id(prefix: &str, last: Option<&str>) -> String {
    let next = last
        .and_then(|id| sequence_number(prefix, id))
        .map_or(1, |n| n + 1);
    format!("{prefix}{next:04}")
}

/// 编号去掉前缀后的序号，`STF0007` → 7
pub fn sequence_number(prefix: &str, id: &str) -> Option<u64> {
    id.strip_prefix(prefix)
        .filter(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()))
        .and_then(|rest| rest.parse::<u64>().ok())
}

/// 用户名只保留小写字母、数字、下划线与连字符
pub fn sanitize_username(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_' || *c == '-')
        .collect()
}

/// 取字符串末尾 n 个字符，不足时返回全部
fn tail(value: &str, n: usize) -> &str {
    let count = value.chars().count();
    if count <= n {
        return value;
    }
    let skip = count - n;
    value
        .char_indices()
        .nth(skip)
        .map_or(value, |(idx, _)| &value[idx..])
}

fn name_or<'a>(name: &'a str, fallback: &'a str) -> &'a str {
    let trimmed = name.trim();
    if trimmed.is_empty() { fallback } else { trimmed }
}

/// 学生：名 + 学号末 4 位
pub fn student_username(first_name: &str, student_id: &str) -> String {
    sanitize_username(&format!(
        "{}{}",
        name_or(first_name, "student"),
        tail(student_id, 4)
    ))
}

/// 职员：名 + 手机号末 5 位
pub fn staff_username(first_name: &str, phone: &str) -> String {
    sanitize_username(&format!("{}{}", name_or(first_name, "staff"), tail(phone, 5)))
}

/// 教师：名 + 身份证号末 4 位
pub fn teacher_username(first_name: &str, national_id: &str) -> String {
    sanitize_username(&format!(
        "{}{}",
        name_or(first_name, "teacher"),
        tail(national_id, 4)
    ))
}

/// 区教育官员：名 + 手机号末 5 位；手机号不足 5 位时改用新职员编号的序号
pub fn wereda_officer_username(first_name: &str, phone: Option<&str>, staff_id: &str) -> String {
    let suffix = match phone.map(str::trim) {
        Some(phone) if phone.chars().count() >= 5 => tail(phone, 5).to_string(),
        _ => sequence_number(STAFF_ID_PREFIX, staff_id)
            .map_or_else(|| staff_id.to_string(), |n| n.to_string()),
    };
    sanitize_username(&format!("{}{}", name_or(first_name, "officer"), suffix))
}

/// 学校管理员 / 督导：名首字母 + 姓 + 100..=999 随机数
pub fn manager_username(first_name: &str, last_name: &str) -> String {
    let initial = first_name.trim().chars().next().map(String::from).unwrap_or_default();
    let number: u16 = rand::rng().random_range(100..=999);
    sanitize_username(&format!(
        "{initial}{}{number}",
        name_or(last_name, "manager")
    ))
}

/// 用户名查重：已存在时依次尝试 `base1`、`base2`……
pub fn pick_available_username(base: &str, taken: &HashSet<String>) -> String {
    if !taken.contains(base) {
        return base.to_string();
    }
    (1u64..)
        .map(|n| format!("{base}{n}"))
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or_else(|| base.to_string())
}

/// 首字母大写，其余小写
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// 默认密码：首字母大写的姓 + 后缀（如 `Kebede#123`）
pub fn default_password(last_name: &str, fallback: &str, suffix: &str) -> String {
    format!("{}{suffix}", capitalize(name_or(last_name, fallback)))
}

/// 管理员 / 督导默认密码：姓的末 3 个字符 + 后缀
pub fn manager_password(last_name: &str, suffix: &str) -> String {
    format!("{}{suffix}", tail(name_or(last_name, "Manager"), 3))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_sequential_id() {
        assert_eq!(next_sequential_id("STUD", None), "STUD0001");
        assert_eq!(next_sequential_id("STUD", Some("STUD0041")), "STUD0042");
        assert_eq!(next_sequential_id("STF", Some("STF9999")), "STF10000");
        assert_eq!(next_sequential_id("T", Some("T0007")), "T0008");
        // 非数字后缀从 1 重新开始
        assert_eq!(next_sequential_id("STUD", Some("STUD-A12")), "STUD0001");
        assert_eq!(next_sequential_id("STUD", Some("LEGACY17")), "STUD0001");
    }

    #[test]
    fn test_derived_usernames() {
        assert_eq!(student_username("Abebe", "STUD0042"), "abebe0042");
        assert_eq!(student_username("", "STUD0042"), "student0042");
        assert_eq!(staff_username("Sara", "0911223344"), "sara23344");
        assert_eq!(staff_username("Sara", "123"), "sara123");
        assert_eq!(teacher_username("Kebede", "ET98761234"), "kebede1234");
        assert_eq!(student_username("Mary Jane", "STUD0001"), "maryjane0001");
    }

    #[test]
    fn test_wereda_officer_username() {
        assert_eq!(
            wereda_officer_username("Hana", Some("0911556677"), "STF0012"),
            "hana56677"
        );
        assert_eq!(wereda_officer_username("Hana", Some("123"), "STF0012"), "hana12");
        assert_eq!(wereda_officer_username("Hana", None, "STF0007"), "hana7");
    }

    #[test]
    fn test_manager_username_shape() {
        let username = manager_username("Tigist", "Alemu");
        assert!(username.starts_with("talemu"));
        let number: u16 = username["talemu".len()..].parse().unwrap();
        assert!((100..=999).contains(&number));
    }

    #[test]
    fn test_pick_available_username() {
        let mut taken = HashSet::new();
        assert_eq!(pick_available_username("abebe0042", &taken), "abebe0042");

        taken.insert("abebe0042".to_string());
        taken.insert("abebe00421".to_string());
        assert_eq!(pick_available_username("abebe0042", &taken), "abebe00422");
    }

    #[test]
    fn test_default_passwords() {
        assert_eq!(capitalize("kEBEDE"), "Kebede");
        assert_eq!(default_password("kebede", "Student", "#123"), "Kebede#123");
        assert_eq!(default_password("  ", "Staff", "#123"), "Staff#123");
        assert_eq!(manager_password("Alemu", "#123"), "emu#123");
        assert_eq!(manager_password("Li", "#123"), "Li#123");
    }
}
