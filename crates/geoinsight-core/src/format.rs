// crates/geoinsight-core/src/format.rs

//! Display helpers for country figures.
//!
//! Missing values and zero both render as [`NOT_AVAILABLE`]; the backend
//! uses `0` for figures it could not source.

use std::fmt;

pub const NOT_AVAILABLE: &str = "N/A";

/// en-US grouping with up to three fraction digits (`83240525` -> `83,240,525`).
pub fn format_number(value: Option<f64>) -> String {
    match usable(value) {
        Some(v) => format_grouped(v, 3),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Whole US dollars (`48717.99` -> `$48,718`).
pub fn format_currency(value: Option<f64>) -> String {
    match usable(value) {
        Some(v) => {
            let body = format_grouped(v.abs(), 0);
            if v < 0.0 && body != "0" {
                format!("-${body}")
            } else {
                format!("${body}")
            }
        }
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Area in square kilometres.
pub fn format_area(value: Option<f64>) -> String {
    match usable(value) {
        Some(_) => format!("{} km²", format_number(value)),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Risk index with one decimal (`2.14` -> `2.1`).
pub fn format_risk_index(value: Option<f64>) -> String {
    match usable(value) {
        Some(v) => format!("{v:.1}"),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn usable(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v != 0.0)
}

fn format_grouped(value: f64, max_fraction_digits: usize) -> String {
    // Round half away from zero before printing; `{:.N}` alone rounds half to even.
    let scale = 10f64.powi(max_fraction_digits as i32);
    let rounded = (value.abs() * scale).round() / scale;
    let printed = format!("{rounded:.max_fraction_digits$}");
    let (int_part, frac_part) = printed.split_once('.').unwrap_or((printed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(printed.len() + int_part.len() / 3 + 1);
    if value < 0.0 && (int_part != "0" || !frac_part.is_empty()) {
        out.push('-');
    }
    out.push_str(&group_digits(int_part));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Banding of the 0–10 geopolitical risk index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RiskLevel {
    Unknown,
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl RiskLevel {
    pub fn from_index(index: Option<f64>) -> Self {
        match usable(index) {
            None => RiskLevel::Unknown,
            Some(v) if v <= 2.0 => RiskLevel::VeryLow,
            Some(v) if v <= 3.5 => RiskLevel::Low,
            Some(v) if v <= 5.0 => RiskLevel::Medium,
            Some(v) if v <= 7.0 => RiskLevel::High,
            Some(_) => RiskLevel::VeryHigh,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Unknown => "Unknown",
            RiskLevel::VeryLow => "Very Low Risk",
            RiskLevel::Low => "Low Risk",
            RiskLevel::Medium => "Medium Risk",
            RiskLevel::High => "High Risk",
            RiskLevel::VeryHigh => "Very High Risk",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            RiskLevel::Unknown => "Risk assessment unavailable",
            RiskLevel::VeryLow => "Highly stable political environment",
            RiskLevel::Low => "Stable with low political risk",
            RiskLevel::Medium => "Moderate political uncertainty",
            RiskLevel::High => "Significant political risks present",
            RiskLevel::VeryHigh => "High political instability and risks",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_are_grouped() {
        assert_eq!(format_number(Some(83_240_525.0)), "83,240,525");
        assert_eq!(format_number(Some(999.0)), "999");
        assert_eq!(format_number(Some(1000.0)), "1,000");
        assert_eq!(format_number(Some(357_114.25)), "357,114.25");
        assert_eq!(format_number(Some(0.12345)), "0.123");
        assert_eq!(format_number(Some(-1234.5)), "-1,234.5");
    }

    #[test]
    fn zero_and_missing_are_not_available() {
        assert_eq!(format_number(None), "N/A");
        assert_eq!(format_number(Some(0.0)), "N/A");
        assert_eq!(format_currency(Some(0.0)), "N/A");
        assert_eq!(format_area(None), "N/A");
        assert_eq!(format_risk_index(None), "N/A");
    }

    #[test]
    fn currency_rounds_to_whole_dollars() {
        assert_eq!(format_currency(Some(48_717.99)), "$48,718");
        assert_eq!(format_currency(Some(2.5)), "$3");
        assert_eq!(format_currency(Some(-1500.0)), "-$1,500");
    }

    #[test]
    fn area_and_risk() {
        assert_eq!(format_area(Some(357_114.0)), "357,114 km²");
        assert_eq!(format_risk_index(Some(2.14)), "2.1");
    }

    #[test]
    fn risk_bands_include_upper_bounds() {
        assert_eq!(RiskLevel::from_index(None), RiskLevel::Unknown);
        assert_eq!(RiskLevel::from_index(Some(2.0)), RiskLevel::VeryLow);
        assert_eq!(RiskLevel::from_index(Some(2.01)), RiskLevel::Low);
        assert_eq!(RiskLevel::from_index(Some(3.5)), RiskLevel::Low);
        assert_eq!(RiskLevel::from_index(Some(5.0)), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_index(Some(7.0)), RiskLevel::High);
        assert_eq!(RiskLevel::from_index(Some(9.3)), RiskLevel::VeryHigh);
        assert_eq!(RiskLevel::High.to_string(), "High Risk");
        assert_eq!(
            RiskLevel::VeryLow.description(),
            "Highly stable political environment"
        );
    }
}
