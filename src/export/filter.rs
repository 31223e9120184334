//! Date range filtering of posts

use chrono::NaiveDate;

/// Inclusive date bounds, each meaning midnight UTC of that day.
///
/// A post is kept unless it lies strictly after `before` or strictly before
/// `after`; a post stamped exactly at either bound is kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub after: Option<NaiveDate>,
    pub before: Option<NaiveDate>,
}

fn midnight_utc_millis(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .unwrap_or_default()
        .and_utc()
        .timestamp_millis()
}

impl DateRange {
    pub fn new(after: Option<NaiveDate>, before: Option<NaiveDate>) -> Self {
        Self { after, before }
    }

    /// No bounds at all
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn is_unbounded(&self) -> bool {
        self.after.is_none() && self.before.is_none()
    }

    /// Whether a post created at `create_at` (ms since epoch) is exported
    pub fn contains(&self, create_at: i64) -> bool {
        if let Some(before) = self.before {
            if create_at > midnight_utc_millis(before) {
                return false;
            }
        }
        if let Some(after) = self.after {
            if create_at < midnight_utc_millis(after) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // 2024-03-01T00:00:00Z
    const MARCH_1: i64 = 1_709_251_200_000;

    #[test]
    fn test_unbounded_keeps_everything() {
        let range = DateRange::unbounded();
        assert!(range.is_unbounded());
        assert!(range.contains(0));
        assert!(range.contains(MARCH_1));
    }

    #[test]
    fn test_after_boundary() {
        let range = DateRange::new(Some(date(2024, 3, 1)), None);
        assert!(range.contains(MARCH_1));
        assert!(!range.contains(MARCH_1 - 1));
        assert!(range.contains(MARCH_1 + 86_400_000));
    }

    #[test]
    fn test_before_boundary() {
        let range = DateRange::new(None, Some(date(2024, 3, 1)));
        assert!(range.contains(MARCH_1));
        assert!(!range.contains(MARCH_1 + 1));
        assert!(range.contains(MARCH_1 - 86_400_000));
    }

    #[test]
    fn test_both_bounds() {
        let range = DateRange::new(Some(date(2024, 2, 29)), Some(date(2024, 3, 1)));
        assert!(range.contains(MARCH_1 - 1));
        assert!(!range.contains(MARCH_1 - 86_400_001));
        assert!(!range.contains(MARCH_1 + 1));
    }
}
