//! `SchedulingInput` — the immutable bag of domain objects every constraint
//! receives as `context` in §4.5. Promoted from an implicit parameter list
//! to a named, constructible type (SPEC_FULL.md §3).

use indexmap::IndexMap;

use super::availability::Availability;
use super::config::ConstraintConfig;
use super::frequency::ShiftFrequencyRequirement;
use super::request::SchedulingRequest;
use super::shift_type::ShiftType;
use super::worker::Worker;
use crate::calendar::PeriodCalendar;

/// Everything a constraint or the feasibility checker needs to read.
#[derive(Debug, Clone)]
pub struct SchedulingInput {
    pub workers: IndexMap<String, Worker>,
    pub shift_types: IndexMap<String, ShiftType>,
    pub calendar: PeriodCalendar,
    pub availabilities: Vec<Availability>,
    pub requests: Vec<SchedulingRequest>,
    pub shift_frequency_requirements: Vec<ShiftFrequencyRequirement>,
    pub constraint_configs: IndexMap<String, ConstraintConfig>,
}

impl SchedulingInput {
    pub fn new(
        workers: Vec<Worker>,
        shift_types: Vec<ShiftType>,
        calendar: PeriodCalendar,
    ) -> Self {
        Self {
            workers: workers.into_iter().map(|w| (w.id.clone(), w)).collect(),
            shift_types: shift_types
                .into_iter()
                .map(|s| (s.id.clone(), s))
                .collect(),
            calendar,
            availabilities: Vec::new(),
            requests: Vec::new(),
            shift_frequency_requirements: Vec::new(),
            constraint_configs: IndexMap::new(),
        }
    }

    pub fn with_availabilities(mut self, availabilities: Vec<Availability>) -> Self {
        self.availabilities = availabilities;
        self
    }

    pub fn with_requests(mut self, requests: Vec<SchedulingRequest>) -> Self {
        self.requests = requests;
        self
    }

    pub fn with_shift_frequency_requirements(
        mut self,
        reqs: Vec<ShiftFrequencyRequirement>,
    ) -> Self {
        self.shift_frequency_requirements = reqs;
        self
    }

    pub fn with_constraint_config(
        mut self,
        name: impl Into<String>,
        config: ConstraintConfig,
    ) -> Self {
        self.constraint_configs.insert(name.into(), config);
        self
    }

    #[inline]
    pub fn num_periods(&self) -> usize {
        self.calendar.num_periods()
    }

    #[inline]
    pub fn active_workers(&self) -> impl Iterator<Item = &Worker> {
        self.workers.values().filter(|w| w.is_active)
    }

    pub fn worker(&self, id: &str) -> Option<&Worker> {
        self.workers.get(id)
    }

    pub fn shift_type(&self, id: &str) -> Option<&ShiftType> {
        self.shift_types.get(id)
    }

    /// Availability records overlapping `date` for `worker_id`, optionally
    /// filtered to ones that apply to `shift_type_id`.
    pub fn unavailable_for(
        &self,
        worker_id: &str,
        date: chrono::NaiveDate,
        shift_type_id: &str,
    ) -> bool {
        self.availabilities.iter().any(|a| {
            a.worker_id == worker_id
                && a.availability_type == super::availability::AvailabilityType::Unavailable
                && a.covers(date)
                && a.applies_to_shift(shift_type_id)
        })
    }
}
