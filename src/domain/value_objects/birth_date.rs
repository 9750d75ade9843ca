//! Birth date value object
//!
//! A birth date is built from the three raw text fields the user typed. Each
//! part must parse as an integer and fall inside its range; the year range is
//! configurable through [`YearBounds`].

use serde::{Deserialize, Serialize};

/// Accepted year range for a birth date (inclusive on both ends)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearBounds {
    pub min: i32,
    pub max: i32,
}

impl Default for YearBounds {
    fn default() -> Self {
        Self {
            min: 1920,
            max: 2025,
        }
    }
}

/// A validated birth date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthDate {
    day: u32,
    month: u32,
    year: i32,
}

impl BirthDate {
    /// Build a birth date from already-numeric parts
    pub fn new(day: u32, month: u32, year: i32, bounds: YearBounds) -> Result<Self, ValidationError> {
        if !(1..=31).contains(&day) {
            return Err(ValidationError::DayOutOfRange(day));
        }
        if !(1..=12).contains(&month) {
            return Err(ValidationError::MonthOutOfRange(month));
        }
        if year < bounds.min || year > bounds.max {
            return Err(ValidationError::YearOutOfRange {
                year,
                min: bounds.min,
                max: bounds.max,
            });
        }
        Ok(Self { day, month, year })
    }

    /// Parse the raw text fields entered by the user
    pub fn parse(
        raw_day: &str,
        raw_month: &str,
        raw_year: &str,
        bounds: YearBounds,
    ) -> Result<Self, ValidationError> {
        let day = parse_part("day", raw_day)?;
        let month = parse_part("month", raw_month)?;
        let year = parse_part("year", raw_year)?;
        Self::new(day, month, year, bounds)
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }
}

impl std::fmt::Display for BirthDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.day, self.month, self.year)
    }
}

fn parse_part<T: std::str::FromStr>(field: &'static str, raw: &str) -> Result<T, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Missing(field));
    }
    trimmed
        .parse()
        .map_err(|_| ValidationError::NotANumber {
            field,
            value: trimmed.to_string(),
        })
}

/// Errors produced when raw date input is rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("{field} must be a number, got '{value}'")]
    NotANumber { field: &'static str, value: String },
    #[error("day {0} is outside 1-31")]
    DayOutOfRange(u32),
    #[error("month {0} is outside 1-12")]
    MonthOutOfRange(u32),
    #[error("year {year} is outside {min}-{max}")]
    YearOutOfRange { year: i32, min: i32, max: i32 },
}

impl ValidationError {
    /// Message shown to the user regardless of which part was wrong
    pub fn user_message(&self) -> &'static str {
        "Vui lòng nhập bát tự (ngày sinh) chính xác!"
    }
}
