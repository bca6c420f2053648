use chrono::{Duration, NaiveDate, NaiveTime};

// Convert an Excel serial date (1900 system) to an ISO date or datetime string
pub fn excel_date_to_iso_string(excel_date: f64) -> Option<String> {
    if !excel_date.is_finite() || excel_date < 0.0 {
        return None;
    }

    // Excel counts the non-existent 1900-02-29
    let days = if excel_date > 59.0 {
        excel_date - 1.0
    } else {
        excel_date
    };

    let base_date = NaiveDate::from_ymd_opt(1899, 12, 31)?;
    let date = base_date.checked_add_signed(Duration::days(days.trunc() as i64))?;

    let seconds = (days.fract() * 86_400.0).round() as u32;
    if seconds == 0 {
        return Some(date.format("%Y-%m-%d").to_string());
    }

    let time = NaiveTime::from_num_seconds_from_midnight_opt(seconds.min(86_399), 0)?;
    Some(date.and_time(time).format("%Y-%m-%dT%H:%M:%S").to_string())
}

// Integral floats print without a trailing ".0"
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        (value as i64).to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excel_dates() {
        assert_eq!(excel_date_to_iso_string(1.0).as_deref(), Some("1900-01-01"));
        assert_eq!(excel_date_to_iso_string(61.0).as_deref(), Some("1900-03-01"));
        assert_eq!(excel_date_to_iso_string(45000.0).as_deref(), Some("2023-03-15"));
        assert_eq!(
            excel_date_to_iso_string(45000.5).as_deref(),
            Some("2023-03-15T12:00:00")
        );
        assert_eq!(excel_date_to_iso_string(-1.0), None);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(-12.0), "-12");
        assert_eq!(format_number(0.25), "0.25");
    }
}
