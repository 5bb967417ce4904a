//! ShiftType value type (§3).

use std::collections::HashSet;
use std::fmt;

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result, ValidationErrorKind};

/// A type of shift that can be staffed in each period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftType {
    pub id: String,
    pub name: String,
    pub category: String,
    pub start_time: NaiveTime,
    pub duration_hours: f64,
    pub workers_required: u32,
    pub is_undesirable: bool,
    #[serde(default)]
    pub applicable_days: Option<HashSet<Weekday>>,
    pub max_workers: u32,
}

impl ShiftType {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        start_time: NaiveTime,
        duration_hours: f64,
        workers_required: u32,
        is_undesirable: bool,
        applicable_days: Option<HashSet<Weekday>>,
        max_workers: Option<u32>,
    ) -> Result<Self> {
        let id = id.into();
        if duration_hours <= 0.0 {
            return Err(CoreError::validation(
                ValidationErrorKind::InvalidShiftType,
                format!("shift type {id}: duration_hours must be > 0, got {duration_hours}"),
            ));
        }
        let max_workers = max_workers.unwrap_or(workers_required);
        if max_workers < workers_required {
            return Err(CoreError::validation(
                ValidationErrorKind::InvalidShiftType,
                format!(
                    "shift type {id}: max_workers ({max_workers}) < workers_required ({workers_required})"
                ),
            ));
        }
        Ok(Self {
            id,
            name: name.into(),
            category: category.into(),
            start_time,
            duration_hours,
            workers_required,
            is_undesirable,
            applicable_days,
            max_workers,
        })
    }

    /// Parses `HH:MM`, 0<=H<=23, 0<=M<=59, per §3.
    pub fn parse_time(s: &str) -> Result<NaiveTime> {
        let (h, m) = s.split_once(':').ok_or_else(|| {
            CoreError::config(
                crate::error::ConfigErrorKind::InvalidTime,
                format!("expected HH:MM, got {s:?}"),
            )
        })?;
        let hour: u32 = h.parse().map_err(|_| {
            CoreError::config(
                crate::error::ConfigErrorKind::InvalidTime,
                format!("invalid hour in {s:?}"),
            )
        })?;
        let minute: u32 = m.parse().map_err(|_| {
            CoreError::config(
                crate::error::ConfigErrorKind::InvalidTime,
                format!("invalid minute in {s:?}"),
            )
        })?;
        if hour > 23 || minute > 59 {
            return Err(CoreError::config(
                crate::error::ConfigErrorKind::InvalidTime,
                format!("time out of range: {s:?}"),
            ));
        }
        NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| {
            CoreError::config(
                crate::error::ConfigErrorKind::InvalidTime,
                format!("could not construct time from {s:?}"),
            )
        })
    }

    /// Whether this shift applies on the given weekday, per §4.5.1.
    #[inline]
    pub fn applies_on(&self, weekday: Weekday) -> bool {
        match &self.applicable_days {
            None => true,
            Some(days) => days.contains(&weekday),
        }
    }
}

impl fmt::Display for ShiftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} @ {}, {}h, req={})",
            self.name, self.id, self.start_time, self.duration_hours, self.workers_required
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_time() {
        let t = ShiftType::parse_time("08:30").unwrap();
        assert_eq!(t, NaiveTime::from_hms_opt(8, 30, 0).unwrap());
    }

    #[test]
    fn rejects_out_of_range_time() {
        assert!(ShiftType::parse_time("24:00").is_err());
        assert!(ShiftType::parse_time("10:60").is_err());
        assert!(ShiftType::parse_time("bogus").is_err());
    }

    #[test]
    fn defaults_max_workers_to_required() {
        let s = ShiftType::new(
            "night",
            "Night",
            "night",
            NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
            8.0,
            2,
            true,
            None,
            None,
        )
        .unwrap();
        assert_eq!(s.max_workers, 2);
    }

    #[test]
    fn rejects_zero_duration() {
        let err = ShiftType::new(
            "x",
            "X",
            "x",
            NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
            0.0,
            1,
            false,
            None,
            None,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation {
                kind: ValidationErrorKind::InvalidShiftType,
                ..
            }
        ));
    }
}
