//! 宽松日期解析，兼容前端与导入文件的多种写法

use chrono::NaiveDate;

const FORMATS: [&str; 3] = ["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y"];

/// 依次尝试 `YYYY-MM-DD`、`DD/MM/YYYY`、`MM/DD/YYYY`
///
/// 空串或无法识别时返回 `None`。`03/04/2020` 这类两种写法都合法的值按日在前解析。
pub fn parse_flexible_date(raw: &str) -> Option<NaiveDate> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }
    FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

/// 服务器本地日期，用于缺省的借还日期与逾期判断
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// 请求中的可选日期字段：未提供时不修改，提供但无法解析时置空
pub fn parse_optional_date(raw: Option<&str>) -> Option<Option<NaiveDate>> {
    raw.map(parse_flexible_date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_supported_formats() {
        assert_eq!(parse_flexible_date("2010-09-01"), Some(ymd(2010, 9, 1)));
        assert_eq!(parse_flexible_date("25/12/2009"), Some(ymd(2009, 12, 25)));
        assert_eq!(parse_flexible_date("12/25/2009"), Some(ymd(2009, 12, 25)));
        assert_eq!(parse_flexible_date("03/04/2020"), Some(ymd(2020, 4, 3)));
    }

    #[test]
    fn test_unparseable_values_become_none() {
        assert_eq!(parse_flexible_date(""), None);
        assert_eq!(parse_flexible_date("yesterday"), None);
        assert_eq!(parse_flexible_date("31/31/2020"), None);
    }

    #[test]
    fn test_optional_date() {
        assert_eq!(parse_optional_date(None), None);
        assert_eq!(parse_optional_date(Some("bad")), Some(None));
        assert_eq!(
            parse_optional_date(Some("2021-01-05")),
            Some(Some(ymd(2021, 1, 5)))
        );
    }
}
