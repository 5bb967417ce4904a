//! Period calendar (§4.1).
//!
//! Maps a `(start_date, end_date, period_length_days)` horizon to an ordered
//! sequence of equal-length periods.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, ConfigErrorKind, Result};

/// The derived label for a period's length, per §3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodType {
    Day,
    Week,
    Biweek,
    Month,
    Custom,
}

impl PeriodType {
    fn from_length_days(days: i64) -> PeriodType {
        match days {
            1 => PeriodType::Day,
            7 => PeriodType::Week,
            14 => PeriodType::Biweek,
            28..=31 => PeriodType::Month,
            _ => PeriodType::Custom,
        }
    }
}

/// An ordered, equal-length sequence of periods covering a horizon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodCalendar {
    periods: Vec<(NaiveDate, NaiveDate)>,
    period_length_days: i64,
    period_type: PeriodType,
}

impl PeriodCalendar {
    /// Builds the calendar. The total span must be a positive multiple of
    /// `period_length_days`, else `ConfigError(BadHorizon)` (§4.1, §4.4.6).
    pub fn new(
        start_date: NaiveDate,
        end_date: NaiveDate,
        period_length_days: i64,
    ) -> Result<Self> {
        if period_length_days < 1 {
            return Err(CoreError::config(
                ConfigErrorKind::BadHorizon,
                "period_length_days must be >= 1",
            ));
        }
        if end_date < start_date {
            return Err(CoreError::config(
                ConfigErrorKind::BadHorizon,
                "end_date precedes start_date",
            ));
        }
        let total_days = (end_date - start_date).num_days() + 1;
        if total_days % period_length_days != 0 {
            return Err(CoreError::config(
                ConfigErrorKind::BadHorizon,
                format!(
                    "horizon of {total_days} day(s) is not a multiple of period_length_days={period_length_days}"
                ),
            ));
        }
        let num_periods = (total_days / period_length_days) as usize;
        if num_periods < 1 {
            return Err(CoreError::config(
                ConfigErrorKind::BadHorizon,
                "horizon must contain at least one period",
            ));
        }
        let mut periods = Vec::with_capacity(num_periods);
        let mut cursor = start_date;
        for _ in 0..num_periods {
            let period_end = cursor + chrono::Duration::days(period_length_days - 1);
            periods.push((cursor, period_end));
            cursor = period_end + chrono::Duration::days(1);
        }
        Ok(Self {
            period_type: PeriodType::from_length_days(period_length_days),
            periods,
            period_length_days,
        })
    }

    #[inline]
    pub fn num_periods(&self) -> usize {
        self.periods.len()
    }

    #[inline]
    pub fn period_type(&self) -> PeriodType {
        self.period_type
    }

    #[inline]
    pub fn period_length_days(&self) -> i64 {
        self.period_length_days
    }

    pub fn start_date(&self) -> NaiveDate {
        self.periods[0].0
    }

    pub fn end_date(&self) -> NaiveDate {
        self.periods[self.periods.len() - 1].1
    }

    /// Returns `(start, end)` of period `p`, inclusive.
    pub fn period_bounds(&self, p: usize) -> Option<(NaiveDate, NaiveDate)> {
        self.periods.get(p).copied()
    }

    /// Returns the index of the period containing `date`, if any.
    pub fn period_for_date(&self, date: NaiveDate) -> Option<usize> {
        self.periods
            .iter()
            .position(|(start, end)| *start <= date && date <= *end)
    }

    /// Returns every date within period `p`.
    pub fn dates_in_period(&self, p: usize) -> Vec<NaiveDate> {
        match self.period_bounds(p) {
            Some((start, end)) => {
                let mut dates = Vec::new();
                let mut cursor = start;
                while cursor <= end {
                    dates.push(cursor);
                    cursor += chrono::Duration::days(1);
                }
                dates
            }
            None => Vec::new(),
        }
    }

    /// Weekdays contained in period `p`.
    pub fn weekdays_in_period(&self, p: usize) -> Vec<Weekday> {
        self.dates_in_period(p).iter().map(|d| d.weekday()).collect()
    }

    /// Iterates `(index, start, end)` for every period.
    pub fn iter(&self) -> impl Iterator<Item = (usize, NaiveDate, NaiveDate)> + '_ {
        self.periods
            .iter()
            .enumerate()
            .map(|(i, (s, e))| (i, *s, *e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_daily_calendar() {
        let start = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 2, 3).unwrap();
        let cal = PeriodCalendar::new(start, end, 1).unwrap();
        assert_eq!(cal.num_periods(), 3);
        assert_eq!(cal.period_type(), PeriodType::Day);
        assert_eq!(cal.period_for_date(start), Some(0));
        assert_eq!(cal.dates_in_period(1), vec![start + chrono::Duration::days(1)]);
    }

    #[test]
    fn builds_weekly_calendar() {
        let start = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let end = start + chrono::Duration::days(13);
        let cal = PeriodCalendar::new(start, end, 7).unwrap();
        assert_eq!(cal.num_periods(), 2);
        assert_eq!(cal.period_type(), PeriodType::Week);
    }

    #[test]
    fn rejects_non_multiple_horizon() {
        let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let end = start + chrono::Duration::days(9);
        assert!(PeriodCalendar::new(start, end, 7).is_err());
    }

    #[test]
    fn date_outside_horizon_has_no_period() {
        let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let end = start + chrono::Duration::days(6);
        let cal = PeriodCalendar::new(start, end, 7).unwrap();
        assert_eq!(cal.period_for_date(end + chrono::Duration::days(1)), None);
    }

    proptest::proptest! {
        #[test]
        fn period_count_matches_span(periods in 1usize..20, length in 1i64..10) {
            let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
            let end = start + chrono::Duration::days(periods as i64 * length - 1);
            let cal = PeriodCalendar::new(start, end, length).unwrap();
            proptest::prop_assert_eq!(cal.num_periods(), periods);
        }
    }
}
