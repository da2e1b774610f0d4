use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Column names of the output file, in write order.
pub const HEADER: [&str; 5] = ["id_cliente", "nombre", "edad", "ciudad", "fecha_registro"];

/// One synthetic customer row as it is written to the output file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Record {
    #[serde(rename = "id_cliente")]
    pub customer_id: u64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "edad")]
    pub age: u8,
    #[serde(rename = "ciudad")]
    pub city: String,
    /// Already rendered in one of the [`DateFormat`]s
    #[serde(rename = "fecha_registro")]
    pub registration_date: String,
}

impl Record {
    #[must_use]
    pub fn new(
        customer_id: u64,
        name: String,
        age: u8,
        city: String,
        registration_date: String,
    ) -> Self {
        Record {
            customer_id,
            name,
            age,
            city,
            registration_date,
        }
    }
}

/// The three competing ways a registration date is written down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateFormat {
    /// `2024-01-30`
    Iso,
    /// `30/01/2024`
    European,
    /// `01-30-24`
    Us,
}

impl DateFormat {
    pub const ALL: [DateFormat; 3] = [DateFormat::Iso, DateFormat::European, DateFormat::Us];

    #[must_use]
    pub fn pattern(self) -> &'static str {
        match self {
            DateFormat::Iso => "%Y-%m-%d",
            DateFormat::European => "%d/%m/%Y",
            DateFormat::Us => "%m-%d-%y",
        }
    }

    #[must_use]
    pub fn render(self, date: NaiveDate) -> String {
        date.format(self.pattern()).to_string()
    }

    /// Strict match: the string must have this format's exact shape (width and
    /// separator positions) and parse to a real calendar date.
    #[must_use]
    pub fn matches(self, value: &str) -> bool {
        let (len, sep, positions): (usize, u8, [usize; 2]) = match self {
            DateFormat::Iso => (10, b'-', [4, 7]),
            DateFormat::European => (10, b'/', [2, 5]),
            DateFormat::Us => (8, b'-', [2, 5]),
        };
        let bytes = value.as_bytes();
        if bytes.len() != len {
            return false;
        }
        let shaped = bytes.iter().enumerate().all(|(i, b)| {
            if positions.contains(&i) {
                *b == sep
            } else {
                b.is_ascii_digit()
            }
        });
        shaped && NaiveDate::parse_from_str(value, self.pattern()).is_ok()
    }

    /// Returns the single format that accepts `value`, if any.
    #[must_use]
    pub fn detect(value: &str) -> Option<DateFormat> {
        let mut found = DateFormat::ALL.iter().filter(|f| f.matches(value));
        match (found.next(), found.next()) {
            (Some(format), None) => Some(*format),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_formats() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 30).unwrap();
        assert_eq!(DateFormat::Iso.render(date), "2024-01-30");
        assert_eq!(DateFormat::European.render(date), "30/01/2024");
        assert_eq!(DateFormat::Us.render(date), "01-30-24");
    }

    #[test]
    fn test_detect_is_exclusive() {
        // Ambiguous under a lax ISO parser (year 1, May 24)
        assert_eq!(DateFormat::detect("01-05-24"), Some(DateFormat::Us));
        assert_eq!(DateFormat::detect("2023-12-01"), Some(DateFormat::Iso));
        assert_eq!(DateFormat::detect("01/12/2023"), Some(DateFormat::European));
    }

    #[test]
    fn test_detect_rejects_garbage() {
        assert_eq!(DateFormat::detect(""), None);
        assert_eq!(DateFormat::detect("2023-13-01"), None);
        assert_eq!(DateFormat::detect("31/02/2023"), None);
        assert_eq!(DateFormat::detect("1-5-24"), None);
        assert_eq!(DateFormat::detect("2023/12/01"), None);
    }

    #[test]
    fn test_every_day_renders_to_one_format() {
        let mut date = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        while date <= end {
            for format in DateFormat::ALL {
                assert_eq!(DateFormat::detect(&format.render(date)), Some(format));
            }
            date = date.succ_opt().unwrap();
        }
    }
}
