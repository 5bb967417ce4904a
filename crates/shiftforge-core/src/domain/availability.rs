//! Availability records (§3).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityType {
    Unavailable,
    Preferred,
    Required,
}

/// A per-worker, per-date-range availability record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub worker_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub availability_type: AvailabilityType,
    #[serde(default)]
    pub shift_type_id: Option<String>,
}

impl Availability {
    pub fn new(
        worker_id: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        availability_type: AvailabilityType,
        shift_type_id: Option<String>,
    ) -> Self {
        Self {
            worker_id: worker_id.into(),
            start_date,
            end_date,
            availability_type,
            shift_type_id,
        }
    }

    /// Whether `date` falls within `[start_date, end_date]` (inclusive).
    #[inline]
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Whether this record applies to `shift_type_id` (None on the record
    /// means it applies to every shift type).
    #[inline]
    pub fn applies_to_shift(&self, shift_type_id: &str) -> bool {
        match &self.shift_type_id {
            None => true,
            Some(id) => id == shift_type_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_inclusive_range() {
        let a = Availability::new(
            "w1",
            NaiveDate::from_ymd_opt(2026, 2, 2).unwrap(),
            NaiveDate::from_ymd_opt(2026, 2, 2).unwrap(),
            AvailabilityType::Unavailable,
            None,
        );
        assert!(a.covers(NaiveDate::from_ymd_opt(2026, 2, 2).unwrap()));
        assert!(!a.covers(NaiveDate::from_ymd_opt(2026, 2, 3).unwrap()));
    }
}
