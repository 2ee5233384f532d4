//! 成绩与考勤统计的舍入规则

/// 四舍五入到指定小数位
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// 得分百分比，保留 1 位小数
pub fn percentage(score: f64, full_mark: f64) -> f64 {
    if full_mark <= 0.0 {
        return 0.0;
    }
    round_to(score / full_mark * 100.0, 1)
}

/// 出勤率等比例，保留 1 位小数；无记录时为 0
pub fn rate(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_to(part as f64 / total as f64 * 100.0, 1)
}

/// 平均值，保留 2 位小数；空集合为 0
pub fn average(values: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        return 0.0;
    }
    round_to(sum / count as f64, 2)
}

/// 等级：A ≥ 90，B ≥ 80，C ≥ 70，D ≥ 60，其余 F
pub fn letter_grade(percentage: f64) -> &'static str {
    match percentage {
        p if p >= 90.0 => "A",
        p if p >= 80.0 => "B",
        p if p >= 70.0 => "C",
        p if p >= 60.0 => "D",
        _ => "F",
    }
}

/// 综合表现评级（平均分 + 出勤率）
pub fn performance_status(average_grade: f64, attendance_rate: f64) -> &'static str {
    if average_grade >= 85.0 && attendance_rate >= 90.0 {
        "Excellent"
    } else if average_grade >= 70.0 && attendance_rate >= 80.0 {
        "Good"
    } else if average_grade >= 60.0 && attendance_rate >= 70.0 {
        "Satisfactory"
    } else if average_grade >= 50.0 && attendance_rate >= 60.0 {
        "Needs Improvement"
    } else {
        "At Risk"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_and_rate() {
        assert_eq!(percentage(45.0, 50.0), 90.0);
        assert_eq!(percentage(1.0, 3.0), 33.3);
        assert_eq!(percentage(5.0, 0.0), 0.0);
        assert_eq!(rate(2, 3), 66.7);
        assert_eq!(rate(0, 0), 0.0);
    }

    #[test]
    fn test_average() {
        assert_eq!(average([70.0, 80.0, 95.5]), 81.83);
        assert_eq!(average(Vec::<f64>::new()), 0.0);
    }

    #[test]
    fn test_letter_grade() {
        assert_eq!(letter_grade(90.0), "A");
        assert_eq!(letter_grade(89.99), "B");
        assert_eq!(letter_grade(60.0), "D");
        assert_eq!(letter_grade(59.9), "F");
    }

    #[test]
    fn test_performance_status_thresholds() {
        assert_eq!(performance_status(85.0, 90.0), "Excellent");
        assert_eq!(performance_status(95.0, 85.0), "Good");
        assert_eq!(performance_status(65.0, 95.0), "Satisfactory");
        assert_eq!(performance_status(55.0, 60.0), "Needs Improvement");
        assert_eq!(performance_status(90.0, 40.0), "At Risk");
    }
}
